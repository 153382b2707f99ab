//! # Receipt Commands
//!
//! The receipt form: text edits, checkboxes and the date picker, then
//! preview / download through the same renderer as the quotation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  onInput(receivedFromName, "al noor") ──► update_receipt_field          │
//! │                                             stored "AL NOOR"            │
//! │  onChange(adsZoneC, true) ──────────────► update_receipt_flag           │
//! │  onChange(receiptDate, "2025-03-07") ───► update_receipt_date           │
//! │                                             day "07", month "03"        │
//! │  Preview / Download ────────────────────► preview_receipt               │
//! │                                           download_receipt              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use quote_core::{ReceiptDetails, ReceiptFlag, ReceiptTextField, ValidationError};
use tracing::debug;

use super::export::{download_document, preview_document, DownloadResponse};
use crate::error::ApiError;
use crate::export::{Document, DocumentRenderer};
use crate::state::{PreviewSlot, ReceiptState};

pub fn get_receipt(receipt: &ReceiptState) -> ReceiptDetails {
    receipt.snapshot()
}

/// Updates one text field; see [`ReceiptTextField::is_uppercased`].
pub fn update_receipt_field(receipt: &ReceiptState, field: ReceiptTextField, value: &str) -> ReceiptDetails {
    debug!(?field, "update_receipt_field command");
    receipt.set_text(field, value);
    receipt.snapshot()
}

pub fn update_receipt_flag(receipt: &ReceiptState, flag: ReceiptFlag, checked: bool) -> ReceiptDetails {
    receipt.set_flag(flag, checked);
    receipt.snapshot()
}

/// Sets the receipt date and re-derives day, month and year from it.
///
/// ## Errors
/// `VALIDATION_ERROR` for a date that is not `YYYY-MM-DD`.
pub fn update_receipt_date(receipt: &ReceiptState, value: &str) -> Result<ReceiptDetails, ApiError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ValidationError::InvalidFormat {
        field: "receiptDate".to_string(),
        reason: e.to_string(),
    })?;
    receipt.set_date(date);
    Ok(receipt.snapshot())
}

pub fn preview_receipt(
    renderer: &dyn DocumentRenderer,
    receipt: &ReceiptState,
    preview: &PreviewSlot,
) -> Result<String, ApiError> {
    preview_document(renderer, &Document::Receipt(receipt.snapshot()), preview)
}

pub fn download_receipt(renderer: &dyn DocumentRenderer, receipt: &ReceiptState) -> Result<DownloadResponse, ApiError> {
    download_document(renderer, &Document::Receipt(receipt.snapshot()))
}
