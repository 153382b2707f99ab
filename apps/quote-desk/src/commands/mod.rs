//! # Commands Module
//!
//! Every operation the quotation form can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── pricing.rs  ◄─── Load items, edit prices / tax / client block
//! ├── receipt.rs  ◄─── Receipt fields, flags and date
//! └── export.rs   ◄─── Preview, download, close preview
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Form input event                                                       │
//! │  ────────────────                                                       │
//! │  onInput(P3, "12.")                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  update_unit_price(                                                     │
//! │      quotation: &QuotationState,  ◄── the live quotation               │
//! │      config: &ConfigState,        ◄── currency + unit order            │
//! │      placeholder, value,          ◄── from the event                   │
//! │  ) -> Result<PricingResponse, ApiError>                                 │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Form re-renders rows and totals from the response                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they need, so each one is testable with a
//! bare `QuotationState` and a default `ConfigState`.

pub mod export;
pub mod pricing;
pub mod receipt;
