//! # Command Line
//!
//! Prices a quotation file, or fills a receipt, without the form. Every
//! value from the file goes through the same commands the form calls, so
//! a price the form would refuse is refused here too.
//!
//! # Usage
//!
//! ```bash
//! # Print the text quotation
//! quote-desk demos/sample-quotation.json
//!
//! # Pricing table as JSON, custom unit order
//! quote-desk demos/sample-quotation.json --format json --unit-order pcs,sqm
//!
//! # Also write quotation-<project>.txt
//! quote-desk demos/sample-quotation.json --save --output-dir ./out
//!
//! # Print the preview data URI instead of the document
//! quote-desk demos/sample-quotation.json --preview
//!
//! # Bilingual receipt
//! quote-desk demos/sample-receipt.json --document receipt --save
//! ```
//!
//! ## Quotation File
//! ```json
//! {
//!   "items": [ { "id": "1", "description": "...", "category": "FLOORING",
//!                "quantity": "2", "unitOfMeasure": "sqm",
//!                "pricePlaceholder": "P1" } ],
//!   "unitPrices": { "P1": "5.00" },
//!   "taxRate": "10",
//!   "client": { "name": "...", "date": "2026-10-19", "projectId": "PRJ-7" }
//! }
//! ```
//!
//! ## Receipt File
//! ```json
//! {
//!   "date": "2025-03-07",
//!   "text": { "receivedFromName": "al noor", "subscriptionPurpose": "tent rental / إيجار خيمة" },
//!   "flags": { "electricityAvailable": true, "adsZoneC": true }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use quote_core::validation::validate_tax_percentage;
use quote_core::{
    parse_currency, ClientDetails, ClientField, QuotationStructure, ReceiptFlag, ReceiptTextField, ScopeItem,
    UnitPriceMap, UnitPriority,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::commands::export::{quotation_document, DownloadResponse};
use crate::commands::pricing::{get_pricing, load_quotation, update_client_detail, update_tax_rate, update_unit_price};
use crate::commands::receipt::{get_receipt, update_receipt_date, update_receipt_field, update_receipt_flag};
use crate::error::ApiError;
use crate::export::TextRenderer;
use crate::session::Session;
use crate::state::{ConfigState, TracingReleaser};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Price a quotation or fill a receipt, then print or save it
#[derive(Parser, Debug)]
#[command(name = "quote-desk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Quotation or receipt JSON file
    pub input: PathBuf,

    /// Which document the input file describes
    #[arg(long, value_enum, default_value_t = DocumentKind::Quotation)]
    pub document: DocumentKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the preview data URI instead of the document
    #[arg(long)]
    pub preview: bool,

    /// Write the text document to the output directory
    #[arg(long)]
    pub save: bool,

    /// Unit display order, e.g. "SQM,PCS,KG"
    #[arg(long, value_delimiter = ',')]
    pub unit_order: Vec<String>,

    /// Directory for saved documents (overrides QUOTE_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    Quotation,
    Receipt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// =============================================================================
// Input Files
// =============================================================================

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, ApiError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ApiError::input(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ApiError::input(format!("Invalid {} file {}: {}", what, path.display(), e)))
}

/// Quotation file contents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationFile {
    pub items: Vec<ScopeItem>,
    #[serde(default)]
    pub unit_prices: UnitPriceMap,
    /// Percentage, as typed in the tax box.
    #[serde(default)]
    pub tax_rate: Option<String>,
    #[serde(default)]
    pub client: Option<ClientDetails>,
}

impl QuotationFile {
    pub fn read(path: &Path) -> Result<Self, ApiError> {
        read_json(path, "quotation")
    }
}

/// Receipt file contents. Missing fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptFile {
    /// `YYYY-MM-DD`; today when absent.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub text: BTreeMap<ReceiptTextField, String>,
    #[serde(default)]
    pub flags: BTreeMap<ReceiptFlag, bool>,
}

impl ReceiptFile {
    pub fn read(path: &Path) -> Result<Self, ApiError> {
        read_json(path, "receipt")
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Flags win over the environment.
pub fn apply_overrides(mut config: ConfigState, cli: &Cli) -> ConfigState {
    if !cli.unit_order.is_empty() {
        config.unit_priority = UnitPriority::new(&cli.unit_order);
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    config
}

/// Feeds a quotation file through the pricing commands.
///
/// ## Errors
/// `VALIDATION_ERROR` for a price or tax rate the input mask refuses, or a
/// tax rate above 100; `NOT_FOUND` for a price keyed by an unknown
/// placeholder.
fn fill_quotation(session: &Session, file: QuotationFile) -> Result<(), ApiError> {
    let quotation = session.quotation();
    let config = session.config();

    load_quotation(quotation, config, QuotationStructure::new(file.items))?;

    for (placeholder, value) in file.unit_prices.iter() {
        update_unit_price(quotation, config, placeholder, value)?;
        let stored = quotation.with_quotation(|q| q.prices.get(placeholder).to_string());
        if stored != *value {
            return Err(ApiError::validation(format!(
                "unitPrices.{placeholder} has invalid format: '{value}' is not a plain amount"
            )));
        }
    }

    if let Some(rate) = &file.tax_rate {
        validate_tax_percentage(parse_currency(rate))?;
        let response = update_tax_rate(quotation, config, rate);
        if response.tax_rate_input != *rate {
            return Err(ApiError::validation(format!(
                "taxRate has invalid format: '{rate}' is not a plain percentage"
            )));
        }
    }

    if let Some(client) = file.client {
        update_client_detail(quotation, ClientField::Name, &client.name)?;
        update_client_detail(quotation, ClientField::Address, &client.address)?;
        update_client_detail(quotation, ClientField::Date, &client.date.format("%Y-%m-%d").to_string())?;
        update_client_detail(quotation, ClientField::ProjectId, &client.project_id)?;
    }

    Ok(())
}

/// Feeds a receipt file through the receipt commands.
fn fill_receipt(session: &Session, file: ReceiptFile) -> Result<(), ApiError> {
    let receipt = session.receipt();

    if let Some(date) = &file.date {
        update_receipt_date(receipt, date)?;
    }
    for (field, value) in &file.text {
        update_receipt_field(receipt, *field, value);
    }
    for (flag, checked) in &file.flags {
        update_receipt_flag(receipt, *flag, *checked);
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| ApiError::internal(format!("Failed to serialize output: {}", e)))
}

/// Runs one invocation and returns what goes to stdout.
pub fn execute(cli: &Cli, config: ConfigState) -> Result<String, ApiError> {
    let config = apply_overrides(config, cli);
    let session = Session::new(
        config.clone(),
        Box::new(TextRenderer::new(config.clone())),
        Arc::new(TracingReleaser),
        Box::new(|| debug!("cli session closed")),
    );

    match cli.document {
        DocumentKind::Quotation => {
            let file = QuotationFile::read(&cli.input)?;
            info!(input = %cli.input.display(), items = file.items.len(), "pricing quotation file");
            fill_quotation(&session, file)?;
        }
        DocumentKind::Receipt => {
            let file = ReceiptFile::read(&cli.input)?;
            info!(input = %cli.input.display(), fields = file.text.len(), "filling receipt file");
            fill_receipt(&session, file)?;
        }
    }

    let mut out = if cli.preview {
        let uri = match cli.document {
            DocumentKind::Quotation => session.preview()?,
            DocumentKind::Receipt => session.preview_receipt()?,
        };
        session.close_preview();
        uri + "\n"
    } else {
        match (cli.document, cli.format) {
            (DocumentKind::Quotation, OutputFormat::Text) => {
                TextRenderer::new(config.clone()).render_document(&quotation_document(session.quotation(), &config))
            }
            (DocumentKind::Quotation, OutputFormat::Json) => to_json(&get_pricing(session.quotation(), &config))?,
            (DocumentKind::Receipt, OutputFormat::Text) => {
                TextRenderer::new(config.clone()).render_receipt_text(&get_receipt(session.receipt()))
            }
            (DocumentKind::Receipt, OutputFormat::Json) => to_json(&get_receipt(session.receipt()))?,
        }
    };

    if cli.save {
        let saved = match cli.document {
            DocumentKind::Quotation => session.download()?,
            DocumentKind::Receipt => session.download_receipt()?,
        };
        match saved {
            DownloadResponse::Saved(path) => {
                let _ = writeln!(out, "Saved: {path}");
            }
            DownloadResponse::DataUri(_) => {
                return Err(ApiError::internal("Renderer did not write a file"));
            }
        }
    }

    session.logout();
    Ok(out)
}
