//! # API Error Type
//!
//! Unified error type for quote-desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Quote Desk                             │
//! │                                                                         │
//! │  Form edit / export click                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Renderer failed? ─── ExportError::Io("...") ──────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad state edit? ──── CoreError::UnknownPlaceholder ─ ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing math never reaches this file: bad prices are zero, not errors.

use serde::Serialize;
use thiserror::Error;

use quote_core::{CoreError, ValidationError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "pricePlaceholder 'P1' already exists"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced item does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Document generation failed
    ExportError,

    /// Reading or parsing an input file failed
    InputError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an input error.
    pub fn input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InputError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

// =============================================================================
// Export Error
// =============================================================================

/// Failures of a [`crate::export::DocumentRenderer`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the document failed.
    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer returned something other than what the mode asked for.
    #[error("{document} generation for {mode} did not return {expected}")]
    UnexpectedOutput {
        /// "Quotation" or "Receipt".
        document: &'static str,
        mode: &'static str,
        expected: &'static str,
    },
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownPlaceholder(key) => ApiError::new(
                ErrorCode::NotFound,
                format!("No scope item uses price placeholder: {}", key),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts renderer errors to API errors.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        tracing::error!("Document export failed: {}", err);
        ApiError::new(ErrorCode::ExportError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
