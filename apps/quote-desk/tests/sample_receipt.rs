//! End-to-end run over the bundled sample receipt.

use std::path::PathBuf;

use clap::Parser;
use quote_desk_lib::cli::{execute, Cli};
use quote_desk_lib::state::ConfigState;

fn sample() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/sample-receipt.json")
        .display()
        .to_string()
}

#[test]
fn test_sample_receipt_text() {
    let cli = Cli::parse_from(["quote-desk", &sample(), "--document", "receipt"]);
    let out = execute(&cli, ConfigState::default()).unwrap();

    assert!(out.contains("DATE / تاريخ الاستلام:  07/03/2025"));
    assert!(out.contains("RECEIVED FROM / وصلنا من السادة:  AL NOOR TRADING"));
    assert!(out.contains("AMOUNT / مبلغ وقدره:  2,500 LYD"));
    assert!(out.contains("FOR TENT RENTAL AND TRACK ADS / وذلك بدل إيجار خيمة وإعلانات"));
    assert!(out.contains("USAGE PURPOSE / جهة الاستعمال:  FOOD COURT"));
    assert!(out.contains("  [x] ELECTRICITY / توفير كهرباء"));
    assert!(out.contains("  [ ] TABLE / توفير طاولات"));
    assert!(out.contains("  ZONES:  A, D"));
    assert!(out.contains("NOTES / ملاحظات:  BALANCE DUE BEFORE RACE DAY"));
    assert!(out.contains("SIGNATURE / الإمضاء:  OMAR"));
}

#[test]
fn test_sample_receipt_json() {
    let cli = Cli::parse_from(["quote-desk", &sample(), "--document", "receipt", "--format", "json"]);
    let out = execute(&cli, ConfigState::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["receiptDate"], "2025-03-07");
    assert_eq!(json["day"], "07");
    assert_eq!(json["payerName"], "OMAR");
    assert_eq!(json["adsZoneD"], true);
    assert_eq!(json["adsZoneB"], false);
}
