//! # Quote Desk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote-desk <FILE.json>                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lib.rs ─────► logging, config, session                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote-core ─► parse, resolve, sort, total                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stdout (text | json), optional saved quotation                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    quote_desk_lib::run()
}
