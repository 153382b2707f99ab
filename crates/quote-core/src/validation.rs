//! # Validation Module
//!
//! Input checks shared by every form binding.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Keystroke mask                                               │
//! │  ├── is_valid_amount_input: digits, one dot, two decimals              │
//! │  └── Rejected keystrokes are simply not applied                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Quotation load                                               │
//! │  └── validate_unique_placeholders                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing math                                                 │
//! │  └── No validation at all: bad text becomes 0                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::types::ScopeItem;
use crate::MAX_TAX_PERCENTAGE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static AMOUNT_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]{0,2}$").expect("valid amount input pattern"));

// =============================================================================
// Keystroke Mask
// =============================================================================

/// Whether the new content of a price or tax-rate box may be accepted.
///
/// ## Rules
/// - Digits, at most one decimal point, at most two decimals
/// - Empty is allowed (the user cleared the box)
///
/// ## Example
/// ```rust
/// use quote_core::validation::is_valid_amount_input;
///
/// assert!(is_valid_amount_input(""));
/// assert!(is_valid_amount_input("12."));
/// assert!(is_valid_amount_input("12.50"));
/// assert!(!is_valid_amount_input("12.505"));
/// assert!(!is_valid_amount_input("1,200"));
/// ```
pub fn is_valid_amount_input(value: &str) -> bool {
    AMOUNT_INPUT.is_match(value)
}

// =============================================================================
// Structural Checks
// =============================================================================

/// Rejects empty or repeated price placeholders.
///
/// Two items sharing a placeholder would silently share one price, so a
/// quotation with duplicates is refused at load time.
pub fn validate_unique_placeholders(items: &[ScopeItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if item.price_placeholder.trim().is_empty() {
            return Err(ValidationError::Required {
                field: format!("pricePlaceholder (item {})", item.id),
            });
        }
        if !seen.insert(item.price_placeholder.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "pricePlaceholder".to_string(),
                value: item.price_placeholder.clone(),
            });
        }
    }

    Ok(())
}

/// Checks a tax percentage against what the form accepts (0 to 100).
pub fn validate_tax_percentage(pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "taxRate".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if !(0.0..=MAX_TAX_PERCENTAGE).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0.0,
            max: MAX_TAX_PERCENTAGE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
