//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                         │
//! │  ├── CoreError        - Quotation state errors                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote-desk errors (app)                                               │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note
//! None of these are produced by the pricing math itself. Parsing, sorting
//! and totals normalize bad input to safe defaults. Errors only come from
//! loading a quotation or editing state that does not exist.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised when editing quotation state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A unit price was written for a placeholder no scope item carries.
    ///
    /// ## When This Occurs
    /// - The UI kept a stale input after a new quotation was loaded
    /// - A saved price sheet references items that were removed
    #[error("No scope item uses price placeholder: {0}")]
    UnknownPlaceholder(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., NaN, letters in an amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two items sharing a price placeholder).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
