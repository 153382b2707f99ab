//! # Currency Parser
//!
//! Turns whatever is in a price box into a number.
//!
//! ## Parsing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "$1,234.50"                                                            │
//! │      │                                                                  │
//! │      ▼  strip everything except 0-9 . -                                 │
//! │  "1234.50"                                                              │
//! │      │                                                                  │
//! │      ▼  longest valid decimal prefix  -?([0-9]+(\.[0-9]*)?|\.[0-9]+)     │
//! │  "1234.50"                                                              │
//! │      │                                                                  │
//! │      ▼  f64, non-finite or no match → 0                                 │
//! │  1234.5                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fixed Vectors
//! | input         | result |
//! |---------------|--------|
//! | `""`          | 0      |
//! | `"abc"`       | 0      |
//! | `"$1,234.50"` | 1234.5 |
//! | `"-5"`        | -5     |
//! | `"12."`       | 12     |
//! | `"12.5.6"`    | 12.5   |
//! | `"1-2"`       | 1      |
//! | `"--5"`       | 0      |
//!
//! The sign is kept. Rejecting negative prices is the caller's business.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that can never be part of an amount.
static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.\-]+").expect("valid non-numeric pattern"));

/// Longest decimal prefix of the stripped text.
static DECIMAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("valid decimal pattern"));

/// Parses a free-text price. Total: never panics, never NaN.
///
/// ## Example
/// ```rust
/// use quote_core::parse_currency;
///
/// assert_eq!(parse_currency("$1,234.50"), 1234.50);
/// assert_eq!(parse_currency("SAR 99"), 99.0);
/// assert_eq!(parse_currency(""), 0.0);
/// ```
pub fn parse_currency(value: &str) -> f64 {
    if value.is_empty() {
        return 0.0;
    }

    let stripped = NON_NUMERIC.replace_all(value, "");
    let Some(prefix) = DECIMAL_PREFIX.find(&stripped) else {
        return 0.0;
    };

    match prefix.as_str().parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_vectors() {
        let vectors: &[(&str, f64)] = &[
            ("", 0.0),
            ("abc", 0.0),
            ("$1,234.50", 1234.50),
            ("$1,234.56", 1234.56),
            ("-5", -5.0),
            ("12.", 12.0),
            (".5", 0.5),
            ("-.5", -0.5),
            ("12.5.6", 12.5),
            ("1-2", 1.0),
            ("-", 0.0),
            (".", 0.0),
            ("--5", 0.0),
            ("0", 0.0),
            ("  42  ", 42.0),
            ("SAR 1 500", 1500.0),
        ];

        for (input, expected) in vectors {
            assert_eq!(parse_currency(input), *expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_no_digit_is_zero() {
        for input in ["$", "N/A", "..", "-.-", "twelve", "€"] {
            assert_eq!(parse_currency(input), 0.0, "input {:?}", input);
        }
    }

    #[test]
    fn test_overflow_is_zero() {
        let huge = "9".repeat(400);
        assert_eq!(parse_currency(&huge), 0.0);
    }

    #[test]
    fn test_partial_typing_states() {
        // What the price box holds while the user types "12.50"
        let states = ["1", "12", "12.", "12.5", "12.50"];
        let parsed: Vec<f64> = states.iter().map(|s| parse_currency(s)).collect();
        assert_eq!(parsed, vec![1.0, 12.0, 12.0, 12.5, 12.5]);
    }
}
