//! # Export Module
//!
//! Document generation seen from the session: a renderer takes a
//! quotation or a receipt and either returns a data URI for the preview
//! pane or saves a file.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quotation ──► QuotationDocument ─┐                                     │
//! │                (sorted + priced)  ├─► Document ──► render(doc, mode)    │
//! │  Receipt ────► ReceiptDetails ────┘                    │                │
//! │                                                        ├── DataUriString│
//! │                                                        │     → preview  │
//! │                                                        └── Save → file  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The PDF renderer of the browser build implements the same trait; the
//! workspace ships [`TextRenderer`], the plain-text export.

mod text;

use std::path::PathBuf;

use quote_core::{ClientDetails, PricedQuotation, ReceiptDetails, UnitPriority};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::state::Quotation;

pub use text::TextRenderer;

/// What the caller wants back from a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Return the document inline, for the preview pane.
    #[serde(rename = "datauristring")]
    DataUriString,
    /// Write the document for download.
    Save,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::DataUriString => "datauristring",
            OutputMode::Save => "save",
        }
    }
}

/// What a renderer produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    DataUri(String),
    Saved(PathBuf),
}

/// Everything printed on a quotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDocument {
    pub client: ClientDetails,
    pub priced: PricedQuotation,
}

impl QuotationDocument {
    /// Snapshot of `quotation`, sorted and priced right now.
    pub fn from_quotation(quotation: &Quotation, priority: &UnitPriority) -> Self {
        QuotationDocument {
            client: quotation.client.clone(),
            priced: quotation.summary(priority),
        }
    }
}

/// Anything the session can preview or download.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Quotation(QuotationDocument),
    Receipt(ReceiptDetails),
}

impl Document {
    /// "quotation" / "receipt", for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Quotation(_) => "quotation",
            Document::Receipt(_) => "receipt",
        }
    }

    /// "Quotation" / "Receipt", for error messages.
    pub fn title(&self) -> &'static str {
        match self {
            Document::Quotation(_) => "Quotation",
            Document::Receipt(_) => "Receipt",
        }
    }
}

/// Turns a document into output.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, document: &Document, mode: OutputMode) -> Result<RenderOutput, ExportError>;
}
