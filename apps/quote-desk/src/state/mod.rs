//! # State Module
//!
//! Manages session state for the quotation form.
//!
//! ## Why Multiple State Types?
//! Each command takes exactly the state it needs instead of one big
//! `AppState`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────┐  ┌──────────────────┐          │
//! │  │  QuotationState  │  │ PreviewSlot  │  │   ConfigState    │          │
//! │  │                  │  │              │  │                  │          │
//! │  │  Arc<Mutex<      │  │  Option<     │  │  currency        │          │
//! │  │    Quotation     │  │   Preview    │  │  unit order      │          │
//! │  │  >> + listeners  │  │   Guard>     │  │  default tax     │          │
//! │  └──────────────────┘  └──────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • QuotationState: Mutex for exclusive access, events after unlock     │
//! │  • PreviewSlot: Mutex around the RAII guard                            │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • ReceiptState: Mutex around the receipt form                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod preview;
mod quotation;
mod receipt;

pub use config::{ConfigState, CurrencyValue};
pub use preview::{PreviewGuard, PreviewSlot, ResourceReleaser, TracingReleaser};
pub use quotation::{Quotation, QuotationEvent, QuotationState, SubscriptionId};
pub use receipt::ReceiptState;

#[cfg(test)]
pub(crate) use preview::tests::RecordingReleaser;
