//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (applied by the binary)
//! 2. Environment variables (`QUOTE_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use quote_core::{parse_currency, TaxRate, UnitPriority};

/// Decimal places beyond this are ignored when formatting.
pub const MAX_CURRENCY_DECIMALS: u8 = 8;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency (at most [`MAX_CURRENCY_DECIMALS`])
    pub currency_decimals: u8,

    /// Tax rate a fresh quotation starts with
    pub default_tax_rate: TaxRate,

    /// Unit-of-measure display order
    pub unit_priority: UnitPriority,

    /// Where saved documents are written
    pub output_dir: PathBuf,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Currency: "$" with 2 decimals
    /// - Tax: 0%
    /// - Units: SQM, SQFT, LM, RM, M, PCS, NOS, SET, LOT, KG, TON, LS
    /// - Output: current directory
    fn default() -> Self {
        ConfigState {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            default_tax_rate: TaxRate::zero(),
            unit_priority: UnitPriority::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `QUOTE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `QUOTE_TAX_RATE`: Default tax rate as a percentage (e.g., "15")
    /// - `QUOTE_UNIT_ORDER`: Comma separated unit order (e.g., "SQM,PCS,KG")
    /// - `QUOTE_OUTPUT_DIR`: Directory for saved documents
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(symbol) = lookup("QUOTE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(rate) = lookup("QUOTE_TAX_RATE") {
            config.default_tax_rate = TaxRate::from_percentage_input(&rate);
        }

        if let Some(order) = lookup("QUOTE_UNIT_ORDER") {
            config.unit_priority = UnitPriority::new(order.split(','));
        }

        if let Some(dir) = lookup("QUOTE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }

    /// Formats an amount as a currency string.
    ///
    /// Accepts a number, raw text (parsed like a price box) or nothing.
    ///
    /// ## Example
    /// ```rust
    /// use quote_desk_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234.5), "$1,234.50");
    /// assert_eq!(config.format_currency("12."), "$12.00");
    /// assert_eq!(config.format_currency(None::<f64>), "$0.00");
    /// ```
    pub fn format_currency(&self, value: impl Into<CurrencyValue>) -> String {
        let amount = value.into().amount();
        let decimals = self.currency_decimals.min(MAX_CURRENCY_DECIMALS) as usize;
        let fixed = format!("{:.*}", decimals, amount.abs());
        let (whole, frac) = match fixed.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (fixed.as_str(), None),
        };

        // "-0.00" prints without a sign
        let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 4);
        if negative {
            out.push('-');
        }
        out.push_str(&self.currency_symbol);
        out.push_str(&group_thousands(whole));
        if let Some(frac) = frac {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

/// Anything the UI may hand to the currency formatter.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CurrencyValue {
    /// Numeric value; text goes through the price parser, the rest is 0.
    pub fn amount(&self) -> f64 {
        match self {
            CurrencyValue::Number(n) if n.is_finite() => *n,
            CurrencyValue::Number(_) | CurrencyValue::Missing => 0.0,
            CurrencyValue::Text(text) => parse_currency(text),
        }
    }
}

impl From<f64> for CurrencyValue {
    fn from(value: f64) -> Self {
        CurrencyValue::Number(value)
    }
}

impl From<&str> for CurrencyValue {
    fn from(value: &str) -> Self {
        CurrencyValue::Text(value.to_string())
    }
}

impl From<String> for CurrencyValue {
    fn from(value: String) -> Self {
        CurrencyValue::Text(value)
    }
}

impl From<Option<f64>> for CurrencyValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CurrencyValue::Missing, CurrencyValue::Number)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(12.34), "$12.34");
        assert_eq!(config.format_currency(1.0), "$1.00");
        assert_eq!(config.format_currency(0.01), "$0.01");
        assert_eq!(config.format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-12.34), "-$12.34");
        assert_eq!(config.format_currency("-5"), "-$5.00");
    }

    #[test]
    fn test_format_currency_large() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234567.89), "$1,234,567.89");
        assert_eq!(config.format_currency(100000.0), "$100,000.00");
    }

    #[test]
    fn test_format_currency_text_and_missing() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency("$1,234.56"), "$1,234.56");
        assert_eq!(config.format_currency("abc"), "$0.00");
        assert_eq!(config.format_currency(None::<f64>), "$0.00");
        assert_eq!(config.format_currency(f64::NAN), "$0.00");
    }

    #[test]
    fn test_format_currency_no_decimals() {
        let config = ConfigState {
            currency_symbol: "SAR ".to_string(),
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(config.format_currency(1499.6), "SAR 1,500");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ConfigState::from_lookup(|key| match key {
            "QUOTE_CURRENCY_SYMBOL" => Some("€".to_string()),
            "QUOTE_TAX_RATE" => Some("15".to_string()),
            "QUOTE_UNIT_ORDER" => Some("kg, sqm".to_string()),
            _ => None,
        });
        assert_eq!(config.currency_symbol, "€");
        assert!((config.default_tax_rate.fraction() - 0.15).abs() < 1e-12);
        assert_eq!(config.unit_priority.rank("KG"), Some(0));
        assert_eq!(config.unit_priority.rank("SQM"), Some(1));
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_format_currency_beyond_i64_range() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1e17), "$100,000,000,000,000,000.00");
        assert_eq!(config.format_currency(1e20), "$100,000,000,000,000,000,000.00");
        assert_eq!(
            config.format_currency("99999999999999999999"),
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(config.format_currency(-1e17), "-$100,000,000,000,000,000.00");
    }

    #[test]
    fn test_format_currency_rounds_to_zero_without_sign() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(-0.001), "$0.00");
        assert_eq!(config.format_currency(-0.0), "$0.00");
    }

    #[test]
    fn test_format_currency_decimals_clamped() {
        let config: ConfigState = serde_json::from_value(serde_json::json!({
            "currencySymbol": "$",
            "currencyDecimals": 200,
            "defaultTaxRate": 0.0,
            "unitPriority": ["SQM"],
            "outputDir": "."
        }))
        .unwrap();
        assert_eq!(config.format_currency(1.5), "$1.50000000");
    }
}
