//! # quote-core: Pure Pricing Logic for Quote Desk
//!
//! This crate is the **heart** of Quote Desk. It turns a list of scope items,
//! the unit prices typed by the user and a tax rate into a sorted display
//! list and the quotation totals. Everything is a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Form / Pricing Modal (UI)                    │   │
//! │  │    Scope items ──► Unit price inputs ──► Tax rate ──► Export    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 quote-desk (session state)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ currency │ │ quantity │ │ sorting  │ │  totals  │          │   │
//! │  │   │  parser  │ │ resolver │ │  engine  │ │  & tax   │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CACHING • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ScopeItem, UnitPriceMap, TaxRate, ...)
//! - [`currency`] - Free-text price parsing
//! - [`quantity`] - Billable quantity extraction
//! - [`sorting`] - Unit-of-measure display ordering
//! - [`totals`] - Line totals, subtotal, tax and grand total
//! - [`receipt`] - Bilingual payment receipt fields
//! - [`validation`] - Input masks and structural checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Fail Soft**: malformed prices, quantities and units become 0 / last,
//!    the pricing functions never return an error
//! 2. **Recompute Everything**: totals are derived on every call, never stored
//! 3. **No Mutation**: sorting returns a new sequence, inputs stay untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use quote_core::{calculate_totals, ScopeItem, TaxRate, UnitPriceMap};
//!
//! let items = vec![ScopeItem::new("1", "Tiling", "FLOORING", "3", Some("pcs"), "P1")];
//! let mut prices = UnitPriceMap::new();
//! prices.set("P1", "10.00");
//!
//! let totals = calculate_totals(&items, &prices, TaxRate::from_fraction(0.10).unwrap());
//! assert_eq!(totals.subtotal, 30.0);
//! assert!((totals.grand_total - 33.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod quantity;
pub mod receipt;
pub mod sorting;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::parse_currency;
pub use error::{CoreError, CoreResult, ValidationError};
pub use quantity::{parse_quantity, resolve_quantity};
pub use receipt::{ReceiptDetails, ReceiptFlag, ReceiptTextField};
pub use sorting::{compare_items, sort_items_by_unit, UnitPriority};
pub use totals::{calculate_totals, line_total, price_quotation, PricedLine, PricedQuotation, QuotationTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Units ranked first in the pricing modal, in display order.
///
/// Area and length units come first because they dominate fit-out
/// quotations; lump-sum lines are listed last.
pub const DEFAULT_UNIT_ORDER: &[&str] = &[
    "SQM", "SQFT", "LM", "RM", "M", "PCS", "NOS", "SET", "LOT", "KG", "TON", "LS",
];

/// Label shown next to the price input when an item has no unit.
pub const FALLBACK_UNIT_LABEL: &str = "Item";

/// Highest tax percentage the form accepts.
pub const MAX_TAX_PERCENTAGE: f64 = 100.0;
