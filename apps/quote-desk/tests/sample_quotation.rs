//! End-to-end run over the bundled sample quotation.

use std::path::PathBuf;

use clap::Parser;
use quote_desk_lib::cli::{execute, Cli};
use quote_desk_lib::state::ConfigState;

fn sample() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/sample-quotation.json")
        .display()
        .to_string()
}

#[test]
fn test_sample_text_quotation() {
    let cli = Cli::parse_from(["quote-desk", &sample()]);
    let out = execute(&cli, ConfigState::default()).unwrap();

    assert!(out.contains("Project:  PRJ-2026-014"));
    assert!(out.contains("Price per SQM: $120.00 | Item Total: $7,500.00"));
    assert!(out.contains("Price per Item: $1,500.00 | Item Total: $1,500.00"));
    assert!(out.contains("Subtotal:     $14,172.00"));
    assert!(out.contains("Tax (15%):    $2,125.80"));
    assert!(out.contains("Grand Total:  $16,297.80"));

    // SQM lines (category order), then PCS, then the unitless line
    let positions: Vec<usize> = ["Gypsum board", "Porcelain floor", "LED downlights", "Site cleaning"]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_sample_json_totals() {
    let cli = Cli::parse_from(["quote-desk", &sample(), "--format", "json"]);
    let out = execute(&cli, ConfigState::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    let ids: Vec<&str> = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["item"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    let subtotal = json["totals"]["subtotal"].as_f64().unwrap();
    let tax = json["totals"]["taxAmount"].as_f64().unwrap();
    let grand = json["totals"]["grandTotal"].as_f64().unwrap();
    assert!((subtotal - 14172.0).abs() < 1e-9);
    assert!((grand - (subtotal + tax)).abs() < 1e-9);
    assert_eq!(json["formatted"]["grandTotal"], "$16,297.80");
    assert_eq!(json["taxRateInput"], "15");
}

#[test]
fn test_sample_env_currency() {
    let config = ConfigState::from_lookup(|key| (key == "QUOTE_CURRENCY_SYMBOL").then(|| "SAR ".to_string()));
    let cli = Cli::parse_from(["quote-desk", &sample()]);
    let out = execute(&cli, config).unwrap();

    assert!(out.contains("Grand Total:  SAR 16,297.80"));
}

#[test]
fn test_sample_preview_matches_text() {
    let text = execute(&Cli::parse_from(["quote-desk", &sample()]), ConfigState::default()).unwrap();
    let preview = execute(&Cli::parse_from(["quote-desk", &sample(), "--preview"]), ConfigState::default()).unwrap();

    let encoded = preview
        .trim_end()
        .strip_prefix("data:text/plain;charset=utf-8;base64,")
        .unwrap();
    let decoded = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, encoded).unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), text);
}
