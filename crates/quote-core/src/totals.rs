//! # Totals & Line-Total Computation
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ScopeItem ──► resolve_quantity ──┐                                     │
//! │                                   ├──► line_total = price × quantity    │
//! │  UnitPriceMap ─► parse_currency ──┘          │                          │
//! │                                              ▼                          │
//! │                                  subtotal = Σ line_total                │
//! │                                              │                          │
//! │  TaxRate ──────────────────────► tax_amount = subtotal × rate           │
//! │                                              │                          │
//! │                                  grand_total = subtotal + tax_amount    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached. Every call walks the full item list, which is a
//! handful of human-entered rows, so staleness is impossible by construction.
//! Values are raw numbers; turning them into "$1,234.50" is the formatter's job.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::parse_currency;
use crate::quantity::resolve_quantity;
use crate::sorting::{sort_items_by_unit, UnitPriority};
use crate::types::{QuotationStructure, ScopeItem, TaxRate, UnitPriceMap};

// =============================================================================
// Result Types
// =============================================================================

/// Aggregate totals of a quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotationTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

impl QuotationTotals {
    /// Derives tax and grand total from a subtotal.
    pub fn from_subtotal(subtotal: f64, tax_rate: TaxRate) -> Self {
        let tax_amount = tax_rate.apply(subtotal);
        QuotationTotals {
            subtotal,
            tax_amount,
            grand_total: subtotal + tax_amount,
        }
    }
}

/// One row of the pricing modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedLine {
    pub item: ScopeItem,
    /// Parsed unit price (the raw text stays in the UnitPriceMap).
    pub unit_price: f64,
    pub quantity: f64,
    pub line_total: f64,
}

impl PricedLine {
    pub fn new(item: &ScopeItem, prices: &UnitPriceMap) -> Self {
        let unit_price = parse_currency(prices.get(&item.price_placeholder));
        let quantity = resolve_quantity(item);
        PricedLine {
            item: item.clone(),
            unit_price,
            quantity,
            line_total: unit_price * quantity,
        }
    }
}

/// Sorted lines plus totals: everything the modal and the renderer show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedQuotation {
    pub lines: Vec<PricedLine>,
    pub tax_rate: TaxRate,
    pub totals: QuotationTotals,
}

// =============================================================================
// Computation
// =============================================================================

/// `unit price × quantity` for one item. Absent or garbage prices give 0.
///
/// ## Example
/// ```rust
/// use quote_core::{line_total, ScopeItem, UnitPriceMap};
///
/// let item = ScopeItem::new("1", "Tiles", "FLOORING", "2", Some("sqm"), "P1");
/// let prices: UnitPriceMap = [("P1", "5.00")].into_iter().collect();
/// assert_eq!(line_total(&item, &prices), 10.0);
/// assert_eq!(line_total(&item, &UnitPriceMap::new()), 0.0);
/// ```
pub fn line_total(item: &ScopeItem, prices: &UnitPriceMap) -> f64 {
    parse_currency(prices.get(&item.price_placeholder)) * resolve_quantity(item)
}

/// Subtotal, tax and grand total over all `items`.
pub fn calculate_totals(items: &[ScopeItem], prices: &UnitPriceMap, tax_rate: TaxRate) -> QuotationTotals {
    let subtotal: f64 = items.iter().map(|item| line_total(item, prices)).sum();
    let totals = QuotationTotals::from_subtotal(subtotal, tax_rate);

    tracing::debug!(
        items = items.len(),
        subtotal = totals.subtotal,
        tax_amount = totals.tax_amount,
        grand_total = totals.grand_total,
        "recomputed quotation totals"
    );

    totals
}

/// Sorts the quotation for display and prices every line.
///
/// The subtotal is summed over the returned lines, in display order, so
/// `Σ lines[i].line_total == totals.subtotal` holds exactly.
pub fn price_quotation(
    structure: &QuotationStructure,
    prices: &UnitPriceMap,
    tax_rate: TaxRate,
    priority: &UnitPriority,
) -> PricedQuotation {
    let lines: Vec<PricedLine> = sort_items_by_unit(&structure.items, priority)
        .iter()
        .map(|item| PricedLine::new(item, prices))
        .collect();

    let subtotal: f64 = lines.iter().map(|l| l.line_total).sum();

    PricedQuotation {
        lines,
        tax_rate,
        totals: QuotationTotals::from_subtotal(subtotal, tax_rate),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
