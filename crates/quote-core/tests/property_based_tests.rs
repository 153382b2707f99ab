//! Property-Based Tests
//!
//! Invariants of the pricing core, explored with proptest:
//! - The currency parser is total and finite
//! - Sorting is independent of input order and idempotent
//! - Line totals always add up to the subtotal, tax follows the rate

use proptest::prelude::*;
use quote_core::{
    calculate_totals, parse_currency, parse_quantity, price_quotation, sort_items_by_unit,
    QuotationStructure, ScopeItem, TaxRate, UnitPriceMap, UnitPriority,
};

const TOLERANCE: f64 = 1e-9;

fn unit_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        prop::sample::select(vec!["sqm", "PCS", "kg", "Lm", "ls", "bag", "zone", "roll"])
            .prop_map(|u| Some(u.to_string())),
    ]
}

fn items_strategy() -> impl Strategy<Value = Vec<ScopeItem>> {
    prop::collection::vec(
        (
            unit_strategy(),
            prop::sample::select(vec!["FLOORING", "CEILING", "MEP", "GENERAL"]),
            "[a-z ]{0,12}",
            "[0-9]{0,4}(\\.[0-9]{1,2})?( units)?",
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (unit, category, description, quantity))| {
                ScopeItem::new(
                    i.to_string(),
                    description,
                    category,
                    quantity,
                    unit.as_deref(),
                    format!("PRICE_{i}"),
                )
            })
            .collect()
    })
}

fn prices_for(items: &[ScopeItem], raw: &[String]) -> UnitPriceMap {
    items
        .iter()
        .zip(raw.iter())
        .map(|(item, price)| (item.price_placeholder.clone(), price.clone()))
        .collect()
}

/// Property: the parser never panics and never returns NaN or infinity
#[test]
fn proptest_currency_parser_total() {
    proptest!(|(text in "\\PC{0,40}")| {
        let value = parse_currency(&text);
        prop_assert!(value.is_finite());
    });
}

/// Property: a string without any digit parses to exactly zero
#[test]
fn proptest_currency_without_digit_is_zero() {
    proptest!(|(text in "[^0-9]{0,30}")| {
        prop_assert_eq!(parse_currency(&text), 0.0);
    });
}

/// Property: quantities are never negative
#[test]
fn proptest_quantity_non_negative() {
    proptest!(|(text in "\\PC{0,30}")| {
        let qty = parse_quantity(&text);
        prop_assert!(qty.is_finite());
        prop_assert!(qty >= 0.0);
    });
}

/// Property: sorting twice, or sorting a reversed copy, yields the same order
#[test]
fn proptest_sort_is_deterministic() {
    proptest!(|(items in items_strategy())| {
        let priority = UnitPriority::default();
        let once = sort_items_by_unit(&items, &priority);
        let twice = sort_items_by_unit(&once, &priority);
        prop_assert_eq!(&once, &twice);

        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(&once, &sort_items_by_unit(&reversed, &priority));
    });
}

/// Property: Σ line totals == subtotal, tax and grand total follow the rate
#[test]
fn proptest_totals_invariants() {
    proptest!(|(
        items in items_strategy(),
        raw_prices in prop::collection::vec("[0-9]{0,5}(\\.[0-9]{0,2})?", 12),
        pct in 0u32..=100
    )| {
        let prices = prices_for(&items, &raw_prices);
        let tax = TaxRate::from_fraction(pct as f64 / 100.0).unwrap();

        let structure = QuotationStructure::new(items.clone());
        let priced = price_quotation(&structure, &prices, tax, &UnitPriority::default());
        let totals = priced.totals;

        let line_sum: f64 = priced.lines.iter().map(|l| l.line_total).sum();
        prop_assert!((line_sum - totals.subtotal).abs() < TOLERANCE);
        prop_assert!((totals.tax_amount - totals.subtotal * tax.fraction()).abs() < TOLERANCE);
        prop_assert!((totals.grand_total - (totals.subtotal + totals.tax_amount)).abs() < TOLERANCE);

        // Same numbers whether or not the list is sorted first
        let direct = calculate_totals(&items, &prices, tax);
        let scale = totals.subtotal.abs().max(1.0);
        prop_assert!((direct.subtotal - totals.subtotal).abs() / scale < TOLERANCE);
    });
}
