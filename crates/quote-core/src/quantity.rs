//! # Quantity Resolver
//!
//! Derives the billable quantity of a scope item from its free-text
//! quantity ("5", "5 units", "approx. 1,200 sqm").
//!
//! ## Rules
//! - The first ASCII numeric token wins: `[0-9][0-9,]*(\.[0-9]+)?` or `\.[0-9]+`
//! - Commas inside the token are thousands separators
//! - A minus sign is never part of the token, so the result is `>= 0`
//! - No token (or an overflowing one) resolves to 0, which prices the
//!   line at zero instead of interrupting the user

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ScopeItem;

static QUANTITY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9][0-9,]*(?:\.[0-9]+)?|\.[0-9]+").expect("valid quantity pattern"));

/// Billable quantity of `item`.
///
/// ## Example
/// ```rust
/// use quote_core::{resolve_quantity, ScopeItem};
///
/// let item = ScopeItem::new("1", "Paint", "FINISHES", "approx. 120.5 sqm", Some("sqm"), "P1");
/// assert_eq!(resolve_quantity(&item), 120.5);
/// ```
pub fn resolve_quantity(item: &ScopeItem) -> f64 {
    parse_quantity(&item.quantity)
}

/// Parses a free-text quantity. Total, never negative.
pub fn parse_quantity(text: &str) -> f64 {
    let Some(token) = QUANTITY_TOKEN.find(text) else {
        return 0.0;
    };

    let digits: String = token.as_str().chars().filter(|c| *c != ',').collect();
    match digits.parse::<f64>() {
        Ok(qty) if qty.is_finite() => qty,
        _ => 0.0,
    }
}
