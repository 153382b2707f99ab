//! # Domain Types
//!
//! Core domain types used throughout Quote Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │     ScopeItem       │   │  UnitPriceMap   │   │    TaxRate      │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id                 │   │  placeholder →  │   │  fraction (f64) │   │
//! │  │  description        │   │    "12.50"      │   │  0.10 = 10%     │   │
//! │  │  category           │   │  (raw text)     │   └─────────────────┘   │
//! │  │  quantity (text)    │   └─────────────────┘                         │
//! │  │  unit_of_measure    │                                               │
//! │  │  price_placeholder ─┼──── key into UnitPriceMap                     │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every scope item has:
//! - `price_placeholder`: unique key for price lookup
//! - `id`: human-facing line number, last tie-break of the display order

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::parse_currency;
use crate::error::ValidationError;
use crate::FALLBACK_UNIT_LABEL;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate stored as a decimal fraction.
///
/// ## Why a Fraction?
/// The totals formula is `tax = subtotal × rate`, so storing 0.10 instead
/// of 10 keeps the arithmetic free of scaling. The UI edits it as a
/// percentage string and goes through [`TaxRate::from_percentage_input`].
///
/// ## Invariant
/// Always finite and `>= 0`. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(try_from = "f64", into = "f64")]
#[ts(export)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a fraction (0.10 = 10%).
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::TaxRate;
    ///
    /// assert!(TaxRate::from_fraction(0.10).is_ok());
    /// assert!(TaxRate::from_fraction(-0.01).is_err());
    /// assert!(TaxRate::from_fraction(f64::NAN).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> Result<Self, ValidationError> {
        if !fraction.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "taxRate".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        if fraction < 0.0 {
            return Err(ValidationError::MustNotBeNegative {
                field: "taxRate".to_string(),
            });
        }
        Ok(TaxRate(fraction))
    }

    /// Interprets what the user typed in the "Tax Rate (%)" box.
    ///
    /// Soft by design of the form: `""` and garbage become 0%, negative
    /// percentages are clamped to 0%.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_percentage_input("10").fraction(), 0.10);
    /// assert_eq!(TaxRate::from_percentage_input("").fraction(), 0.0);
    /// assert_eq!(TaxRate::from_percentage_input("-5").fraction(), 0.0);
    /// ```
    pub fn from_percentage_input(input: &str) -> Self {
        let pct = parse_currency(input);
        if pct < 0.0 {
            tracing::warn!(input, "negative tax percentage clamped to zero");
            return TaxRate::zero();
        }
        TaxRate(pct / 100.0)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Tax owed on `subtotal`.
    #[inline]
    pub fn apply(&self, subtotal: f64) -> f64 {
        subtotal * self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        TaxRate::from_fraction(value)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

// =============================================================================
// Scope Item
// =============================================================================

/// A single billable line of a quotation.
///
/// Loaded once from the extracted scope of work and never edited. The
/// quantity and unit stay free text because the source document may say
/// "5 units" or "approx. 12".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScopeItem {
    /// Line number shown in the modal ("3. Gypsum ceiling").
    pub id: String,

    pub description: String,

    /// Work category, e.g. "FLOORING" or "MEP".
    pub category: String,

    /// Free-text quantity, see [`crate::quantity`].
    pub quantity: String,

    /// Free-text unit, matched case-insensitively.
    #[serde(default)]
    pub unit_of_measure: Option<String>,

    #[serde(default)]
    pub material_or_finish: String,

    /// Unique key into the [`UnitPriceMap`].
    pub price_placeholder: String,
}

impl ScopeItem {
    /// Creates a scope item with an empty material/finish.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        quantity: impl Into<String>,
        unit_of_measure: Option<&str>,
        price_placeholder: impl Into<String>,
    ) -> Self {
        ScopeItem {
            id: id.into(),
            description: description.into(),
            category: category.into(),
            quantity: quantity.into(),
            unit_of_measure: unit_of_measure.map(str::to_string),
            material_or_finish: String::new(),
            price_placeholder: price_placeholder.into(),
        }
    }

    /// Sets the material/finish text.
    pub fn with_material(mut self, material_or_finish: impl Into<String>) -> Self {
        self.material_or_finish = material_or_finish.into();
        self
    }

    /// Trimmed, upper-cased unit. Blank units count as absent.
    pub fn normalized_unit(&self) -> Option<String> {
        self.unit_of_measure
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_uppercase)
    }

    /// Label next to the price input: "Price per SQM", or "Price per Item".
    pub fn unit_label(&self) -> String {
        self.normalized_unit()
            .unwrap_or_else(|| FALLBACK_UNIT_LABEL.to_string())
    }
}

/// The item list of a quotation as extracted from the scope document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuotationStructure {
    pub items: Vec<ScopeItem>,
}

impl QuotationStructure {
    pub fn new(items: Vec<ScopeItem>) -> Self {
        QuotationStructure { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks whether any item carries `placeholder`.
    pub fn has_placeholder(&self, placeholder: &str) -> bool {
        self.items.iter().any(|i| i.price_placeholder == placeholder)
    }
}

// =============================================================================
// Unit Price Map
// =============================================================================

/// Unit prices exactly as typed, keyed by price placeholder.
///
/// Values are kept as text ("12." is a valid intermediate state while
/// typing). Absent entries price the item at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct UnitPriceMap(BTreeMap<String, String>);

impl UnitPriceMap {
    pub fn new() -> Self {
        UnitPriceMap(BTreeMap::new())
    }

    /// Raw price text for `placeholder`, `""` when nothing was entered.
    pub fn get(&self, placeholder: &str) -> &str {
        self.0.get(placeholder).map(String::as_str).unwrap_or("")
    }

    /// Overwrites the price text for `placeholder`.
    pub fn set(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.0.insert(placeholder.into(), value.into());
    }

    pub fn remove(&mut self, placeholder: &str) -> Option<String> {
        self.0.remove(placeholder)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UnitPriceMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        UnitPriceMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// =============================================================================
// Client Details
// =============================================================================

/// Client and project block printed at the top of the quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClientDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(default)]
    pub project_id: String,
}

impl ClientDetails {
    /// Empty client block dated `date`.
    pub fn dated(date: NaiveDate) -> Self {
        ClientDetails {
            name: String::new(),
            address: String::new(),
            date,
            project_id: String::new(),
        }
    }
}

/// Editable fields of [`ClientDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ClientField {
    Name,
    Address,
    Date,
    ProjectId,
}

// =============================================================================
// Unit Tests
// =============================================================================
