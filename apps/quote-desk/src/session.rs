//! # Session
//!
//! Root object of one signed-in quotation session. Owns every state type
//! and the collaborators the host injects.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session                                                                │
//! │  ├── id           Uuid (tracing field)                                  │
//! │  ├── config       ConfigState                                           │
//! │  ├── quotation    QuotationState                                        │
//! │  ├── receipt      ReceiptState                                          │
//! │  ├── preview      PreviewSlot ─────────► ResourceReleaser (host)        │
//! │  ├── renderer     Box<dyn DocumentRenderer> (host)                      │
//! │  └── on_logout    LogoutHook (host)                                     │
//! │                                                                         │
//! │  logout(): close preview ──► on_logout()                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Local;
use tracing::info;
use uuid::Uuid;

use quote_core::ReceiptDetails;

use crate::commands::export::{self, DownloadResponse};
use crate::commands::receipt;
use crate::error::ApiError;
use crate::export::DocumentRenderer;
use crate::state::{ConfigState, PreviewSlot, Quotation, QuotationState, ReceiptState, ResourceReleaser};

/// Called once the session has been torn down.
pub type LogoutHook = Box<dyn Fn() + Send + Sync>;

pub struct Session {
    id: Uuid,
    config: ConfigState,
    quotation: QuotationState,
    receipt: ReceiptState,
    preview: PreviewSlot,
    renderer: Box<dyn DocumentRenderer>,
    on_logout: LogoutHook,
}

impl Session {
    /// Starts a session with an empty quotation and receipt, both dated today.
    pub fn new(
        config: ConfigState,
        renderer: Box<dyn DocumentRenderer>,
        releaser: Arc<dyn ResourceReleaser>,
        on_logout: LogoutHook,
    ) -> Self {
        let today = Local::now().date_naive();
        let quotation = Quotation::new(today, config.default_tax_rate);
        let id = Uuid::new_v4();
        info!(session = %id, "session started");

        Session {
            id,
            config,
            quotation: QuotationState::new(quotation),
            receipt: ReceiptState::new(ReceiptDetails::dated(today)),
            preview: PreviewSlot::new(releaser),
            renderer,
            on_logout,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn quotation(&self) -> &QuotationState {
        &self.quotation
    }

    pub fn receipt(&self) -> &ReceiptState {
        &self.receipt
    }

    pub fn preview_slot(&self) -> &PreviewSlot {
        &self.preview
    }

    /// See [`export::preview_quotation`].
    pub fn preview(&self) -> Result<String, ApiError> {
        export::preview_quotation(self.renderer.as_ref(), &self.quotation, &self.config, &self.preview)
    }

    /// See [`export::download_quotation`].
    pub fn download(&self) -> Result<DownloadResponse, ApiError> {
        export::download_quotation(self.renderer.as_ref(), &self.quotation, &self.config)
    }

    /// See [`receipt::preview_receipt`].
    pub fn preview_receipt(&self) -> Result<String, ApiError> {
        receipt::preview_receipt(self.renderer.as_ref(), &self.receipt, &self.preview)
    }

    /// See [`receipt::download_receipt`].
    pub fn download_receipt(&self) -> Result<DownloadResponse, ApiError> {
        receipt::download_receipt(self.renderer.as_ref(), &self.receipt)
    }

    /// See [`export::close_preview`].
    pub fn close_preview(&self) -> bool {
        export::close_preview(&self.preview)
    }

    /// Closes any open preview, then hands control to the host.
    pub fn logout(&self) {
        self.preview.clear();
        info!(session = %self.id, "session logged out");
        (self.on_logout)();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}
