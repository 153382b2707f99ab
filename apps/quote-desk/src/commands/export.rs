//! # Export Commands
//!
//! Preview and download of the rendered quotation or receipt.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Preview click                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Document snapshot (quotation sorted + priced now, or the receipt)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  renderer.render(doc, DataUriString)                                    │
//! │       │                                                                 │
//! │       ├── Ok(DataUri) ──► PreviewSlot::replace ──► old preview released │
//! │       ├── Ok(other) ────► ExportError::UnexpectedOutput                 │
//! │       └── Err(e) ───────► logged, returned as EXPORT_ERROR              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed render leaves the previous preview open. Quotation and receipt
//! share the one preview slot.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{ApiError, ExportError};
use crate::export::{Document, DocumentRenderer, OutputMode, QuotationDocument, RenderOutput};
use crate::state::{ConfigState, PreviewSlot, QuotationState};

/// Result of a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DownloadResponse {
    /// The renderer handed the document back inline.
    DataUri(String),
    /// The renderer wrote a file.
    Saved(String),
}

fn render(
    renderer: &dyn DocumentRenderer,
    document: &Document,
    mode: OutputMode,
) -> Result<RenderOutput, ExportError> {
    debug!(document = document.kind(), mode = mode.as_str(), "rendering document");

    renderer.render(document, mode).map_err(|e| {
        error!(document = document.kind(), mode = mode.as_str(), error = %e, "Error generating document");
        e
    })
}

/// Snapshot of the quotation, sorted and priced right now.
pub fn quotation_document(quotation: &QuotationState, config: &ConfigState) -> Document {
    Document::Quotation(quotation.with_quotation(|q| QuotationDocument::from_quotation(q, &config.unit_priority)))
}

/// Renders `document` inline and opens it in the preview pane.
///
/// ## Returns
/// The data URI now held by the preview slot.
pub fn preview_document(
    renderer: &dyn DocumentRenderer,
    document: &Document,
    preview: &PreviewSlot,
) -> Result<String, ApiError> {
    match render(renderer, document, OutputMode::DataUriString)? {
        RenderOutput::DataUri(uri) => {
            preview.replace(uri.clone());
            info!(document = document.kind(), "preview opened");
            Ok(uri)
        }
        RenderOutput::Saved(_) => Err(ExportError::UnexpectedOutput {
            document: document.title(),
            mode: "preview",
            expected: "a data URI",
        }
        .into()),
    }
}

/// Renders `document` for download.
pub fn download_document(renderer: &dyn DocumentRenderer, document: &Document) -> Result<DownloadResponse, ApiError> {
    let output = render(renderer, document, OutputMode::Save)?;
    info!(document = document.kind(), "document downloaded");

    Ok(match output {
        RenderOutput::DataUri(uri) => DownloadResponse::DataUri(uri),
        RenderOutput::Saved(path) => DownloadResponse::Saved(path.display().to_string()),
    })
}

/// Previews the quotation.
pub fn preview_quotation(
    renderer: &dyn DocumentRenderer,
    quotation: &QuotationState,
    config: &ConfigState,
    preview: &PreviewSlot,
) -> Result<String, ApiError> {
    preview_document(renderer, &quotation_document(quotation, config), preview)
}

/// Downloads the quotation.
pub fn download_quotation(
    renderer: &dyn DocumentRenderer,
    quotation: &QuotationState,
    config: &ConfigState,
) -> Result<DownloadResponse, ApiError> {
    download_document(renderer, &quotation_document(quotation, config))
}

/// Closes the preview pane. Returns whether a preview was open.
pub fn close_preview(preview: &PreviewSlot) -> bool {
    let was_open = preview.clear();
    debug!(was_open, "close_preview command");
    was_open
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use quote_core::{QuotationStructure, ReceiptDetails, ScopeItem, TaxRate};

    use crate::error::ErrorCode;
    use crate::export::TextRenderer;
    use crate::state::{Quotation, RecordingReleaser};

    /// Renderer returning a fixed output, or failing.
    struct FixedRenderer(Option<RenderOutput>);

    impl DocumentRenderer for FixedRenderer {
        fn render(&self, _: &Document, _: OutputMode) -> Result<RenderOutput, ExportError> {
            self.0.clone().ok_or_else(|| {
                ExportError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            })
        }
    }

    fn state() -> QuotationState {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let state = QuotationState::new(Quotation::new(date, TaxRate::zero()));
        state
            .load(QuotationStructure::new(vec![ScopeItem::new(
                "1", "Floor tiles", "FLOORING", "2", Some("sqm"), "P1",
            )]))
            .unwrap();
        state.set_unit_price("P1", "5").unwrap();
        state
    }

    #[test]
    fn test_preview_replaces_previous() {
        let releaser = Arc::new(RecordingReleaser::default());
        let preview = PreviewSlot::new(releaser.clone());
        let quotation = state();
        let config = ConfigState::default();
        let renderer = TextRenderer::new(config.clone());

        let first = preview_quotation(&renderer, &quotation, &config, &preview).unwrap();
        assert!(first.starts_with("data:text/plain"));
        assert!(releaser.released.lock().unwrap().is_empty());

        quotation.set_unit_price("P1", "6").unwrap();
        let second = preview_quotation(&renderer, &quotation, &config, &preview).unwrap();
        assert_ne!(first, second);
        assert_eq!(*releaser.released.lock().unwrap(), vec![first]);
        assert_eq!(preview.current_handle(), Some(second));
    }

    #[test]
    fn test_preview_rejects_saved_output() {
        let preview = PreviewSlot::default();
        let renderer = FixedRenderer(Some(RenderOutput::Saved(PathBuf::from("x.txt"))));

        let err = preview_quotation(&renderer, &state(), &ConfigState::default(), &preview).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert_eq!(err.message, "Quotation generation for preview did not return a data URI");
        assert!(!preview.is_open());
    }

    #[test]
    fn test_failed_render_keeps_open_preview() {
        let preview = PreviewSlot::default();
        preview.replace("data:text/plain;base64,AAAA");

        let err = preview_quotation(&FixedRenderer(None), &state(), &ConfigState::default(), &preview)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(err.message.contains("disk full"));
        assert_eq!(preview.current_handle().as_deref(), Some("data:text/plain;base64,AAAA"));
    }

    #[test]
    fn test_download_passes_through_output() {
        let renderer = FixedRenderer(Some(RenderOutput::Saved(PathBuf::from("out/q.txt"))));
        let response = download_quotation(&renderer, &state(), &ConfigState::default()).unwrap();
        assert_eq!(response, DownloadResponse::Saved(PathBuf::from("out/q.txt").display().to_string()));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "saved");
    }

    #[test]
    fn test_receipt_preview_shares_slot() {
        let releaser = Arc::new(RecordingReleaser::default());
        let preview = PreviewSlot::new(releaser.clone());
        let config = ConfigState::default();
        let renderer = TextRenderer::new(config.clone());

        let quotation_uri = preview_quotation(&renderer, &state(), &config, &preview).unwrap();
        let receipt = Document::Receipt(ReceiptDetails::dated(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()));
        let receipt_uri = preview_document(&renderer, &receipt, &preview).unwrap();

        assert_eq!(*releaser.released.lock().unwrap(), vec![quotation_uri]);
        assert_eq!(preview.current_handle(), Some(receipt_uri));

        let saved = FixedRenderer(Some(RenderOutput::Saved(PathBuf::from("r.txt"))));
        let err = preview_document(&saved, &receipt, &preview).unwrap_err();
        assert_eq!(err.message, "Receipt generation for preview did not return a data URI");
    }

    #[test]
    fn test_close_preview() {
        let preview = PreviewSlot::default();
        assert!(!close_preview(&preview));
        preview.replace("data:,");
        assert!(close_preview(&preview));
        assert!(!preview.is_open());
    }
}
