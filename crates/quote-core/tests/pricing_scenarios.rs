//! Scenario tests for the pricing modal: the worked examples a reviewer
//! checks by hand.

use quote_core::{
    calculate_totals, price_quotation, sort_items_by_unit, QuotationStructure, ScopeItem, TaxRate,
    UnitPriceMap, UnitPriority,
};

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_two_item_quotation_with_ten_percent_tax() {
    let structure = QuotationStructure::new(vec![
        ScopeItem::new("1", "Ceiling panels", "CEILING", "3", Some("pcs"), "P1"),
        ScopeItem::new("2", "Floor tiles", "FLOORING", "2", Some("sqm"), "P2"),
    ]);
    let prices: UnitPriceMap = [("P1", "10.00"), ("P2", "5.00")].into_iter().collect();
    let tax = TaxRate::from_fraction(0.10).unwrap();

    let priced = price_quotation(&structure, &prices, tax, &UnitPriority::default());

    let order: Vec<&str> = priced.lines.iter().map(|l| l.item.id.as_str()).collect();
    assert_eq!(order, vec!["2", "1"], "sqm line is listed first");
    assert_close(priced.lines[0].line_total, 10.0);
    assert_close(priced.lines[1].line_total, 30.0);

    assert_close(priced.totals.subtotal, 40.0);
    assert_close(priced.totals.tax_amount, 4.0);
    assert_close(priced.totals.grand_total, 44.0);

    let direct = calculate_totals(&structure.items, &prices, tax);
    assert_close(direct.grand_total, 44.0);
}

#[test]
fn test_unit_priority_regardless_of_input_order() {
    let priority = UnitPriority::new(["SQM", "PCS", "KG"]);
    let pcs = ScopeItem::new("1", "Brackets", "STEEL", "4", Some("PCS"), "P1");
    let sqm = ScopeItem::new("2", "Cladding", "FACADE", "9", Some("SQM"), "P2");
    let kg = ScopeItem::new("3", "Rebar", "STEEL", "250", Some("KG"), "P3");

    let permutations = [
        vec![pcs.clone(), sqm.clone(), kg.clone()],
        vec![kg.clone(), pcs.clone(), sqm.clone()],
        vec![sqm.clone(), kg.clone(), pcs.clone()],
        vec![kg.clone(), sqm.clone(), pcs.clone()],
    ];

    for items in permutations {
        let sorted = sort_items_by_unit(&items, &priority);
        let units: Vec<String> = sorted.iter().filter_map(|i| i.normalized_unit()).collect();
        assert_eq!(units, vec!["SQM", "PCS", "KG"]);
    }
}

#[test]
fn test_partially_priced_quotation() {
    let structure = QuotationStructure::new(vec![
        ScopeItem::new("1", "Demolition", "GENERAL", "lump sum", Some("LS"), "P1"),
        ScopeItem::new("2", "Paint", "FINISHES", "120 sqm", Some("sqm"), "P2"),
        ScopeItem::new("3", "Skirting", "FINISHES", "45.5", Some("lm"), "P3"),
    ]);
    // P3 not typed yet, P1 has a price but no numeric quantity
    let prices: UnitPriceMap = [("P1", "2500"), ("P2", "18.5")].into_iter().collect();

    let priced = price_quotation(&structure, &prices, TaxRate::zero(), &UnitPriority::default());

    let totals_by_id: Vec<(&str, f64)> = priced
        .lines
        .iter()
        .map(|l| (l.item.id.as_str(), l.line_total))
        .collect();
    assert_eq!(totals_by_id, vec![("2", 2220.0), ("3", 0.0), ("1", 0.0)]);
    assert_close(priced.totals.grand_total, 2220.0);
}

#[test]
fn test_priced_quotation_serializes_camel_case() {
    let structure = QuotationStructure::new(vec![ScopeItem::new(
        "1", "Tiles", "FLOORING", "2", Some("sqm"), "P1",
    )]);
    let prices: UnitPriceMap = [("P1", "5")].into_iter().collect();
    let priced = price_quotation(&structure, &prices, TaxRate::zero(), &UnitPriority::default());

    let json = serde_json::to_value(&priced).unwrap();
    assert_eq!(json["totals"]["grandTotal"], 10.0);
    assert_eq!(json["lines"][0]["lineTotal"], 10.0);
    assert_eq!(json["lines"][0]["item"]["pricePlaceholder"], "P1");
}
