//! # Pricing Commands
//!
//! The pricing modal: load the extracted items, then recompute everything
//! on each edit.
//!
//! ## Modal Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pricing Modal                                        │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────────┐     ┌──────────────┐                │
//! │  │  Scope   │────►│   Pricing    │────►│   Preview /  │                │
//! │  │ extracted│     │   (editing)  │     │   Download   │                │
//! │  └──────────┘     └──────────────┘     └──────────────┘                │
//! │       │                  │                    │                         │
//! │  load_quotation   update_unit_price      (export.rs)                    │
//! │                   update_tax_rate                                       │
//! │                   update_client_detail                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Keystroke Mask
//! Price and tax boxes only accept `digits[.digits{0,2}]`. A rejected
//! keystroke leaves the state untouched and returns the current pricing,
//! so the box snaps back to its previous value.

use quote_core::validation::is_valid_amount_input;
use quote_core::{ClientDetails, ClientField, PricedQuotation, QuotationStructure, QuotationTotals, ScopeItem};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, QuotationState};

/// One row of the pricing table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRow {
    pub item: ScopeItem,
    /// "SQM", or "Item" when the unit is missing.
    pub unit_label: String,
    /// Price box content as typed.
    pub unit_price_input: String,
    pub quantity: f64,
    pub line_total: f64,
    pub formatted_line_total: String,
}

/// Totals rendered with the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax_amount: String,
    pub grand_total: String,
}

/// Everything the pricing modal displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub rows: Vec<PricingRow>,
    pub totals: QuotationTotals,
    pub formatted: FormattedTotals,
    pub tax_rate_input: String,
    pub client: ClientDetails,
}

impl PricingResponse {
    fn build(
        priced: &PricedQuotation,
        prices: impl Fn(&str) -> String,
        tax_rate_input: String,
        client: ClientDetails,
        config: &ConfigState,
    ) -> Self {
        let rows = priced
            .lines
            .iter()
            .map(|line| PricingRow {
                unit_label: line.item.unit_label(),
                unit_price_input: prices(&line.item.price_placeholder),
                quantity: line.quantity,
                line_total: line.line_total,
                formatted_line_total: config.format_currency(line.line_total),
                item: line.item.clone(),
            })
            .collect();

        PricingResponse {
            rows,
            totals: priced.totals,
            formatted: FormattedTotals {
                subtotal: config.format_currency(priced.totals.subtotal),
                tax_amount: config.format_currency(priced.totals.tax_amount),
                grand_total: config.format_currency(priced.totals.grand_total),
            },
            tax_rate_input,
            client,
        }
    }
}

/// Gets the pricing table for the current quotation.
///
/// Recomputed from the live state on every call; nothing is cached.
pub fn get_pricing(quotation: &QuotationState, config: &ConfigState) -> PricingResponse {
    quotation.with_quotation(|q| {
        let priced = q.summary(&config.unit_priority);
        PricingResponse::build(
            &priced,
            |key| q.prices.get(key).to_string(),
            q.tax_rate_input.clone(),
            q.client.clone(),
            config,
        )
    })
}

/// Loads extracted scope items; every price starts empty.
///
/// ## Errors
/// `VALIDATION_ERROR` when placeholders are duplicated or empty.
pub fn load_quotation(
    quotation: &QuotationState,
    config: &ConfigState,
    structure: QuotationStructure,
) -> Result<PricingResponse, ApiError> {
    let item_count = structure.items.len();
    quotation.load(structure)?;
    info!(item_count, "quotation loaded into pricing modal");
    Ok(get_pricing(quotation, config))
}

/// Updates the text of one unit price box.
///
/// ## Errors
/// `NOT_FOUND` when no item uses `placeholder`.
pub fn update_unit_price(
    quotation: &QuotationState,
    config: &ConfigState,
    placeholder: &str,
    value: &str,
) -> Result<PricingResponse, ApiError> {
    if !is_valid_amount_input(value) {
        debug!(placeholder, value, "unit price keystroke rejected");
        return Ok(get_pricing(quotation, config));
    }

    quotation.set_unit_price(placeholder, value)?;
    Ok(get_pricing(quotation, config))
}

/// Updates the tax rate box (a percentage, "10" for 10%).
pub fn update_tax_rate(quotation: &QuotationState, config: &ConfigState, value: &str) -> PricingResponse {
    if !is_valid_amount_input(value) {
        debug!(value, "tax rate keystroke rejected");
        return get_pricing(quotation, config);
    }

    quotation.set_tax_rate_input(value);
    get_pricing(quotation, config)
}

/// Updates one field of the client block.
///
/// ## Errors
/// `VALIDATION_ERROR` for a date that is not `YYYY-MM-DD`.
pub fn update_client_detail(
    quotation: &QuotationState,
    field: ClientField,
    value: &str,
) -> Result<ClientDetails, ApiError> {
    debug!(?field, "update_client_detail command");
    quotation.set_client_detail(field, value)?;
    Ok(quotation.with_quotation(|q| q.client.clone()))
}
