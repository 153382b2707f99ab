//! # Quote Desk Library
//!
//! Session side of the quotation and receipt forms: live state, the
//! commands the forms invoke, document export, and the command line entry
//! point.
//!
//! ## Module Organization
//! ```text
//! quote_desk_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── session.rs      ◄─── Session root (state + injected collaborators)
//! ├── cli.rs          ◄─── quote-desk command line
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── quotation.rs◄─── Live quotation + change listeners
//! │   ├── receipt.rs  ◄─── Receipt being filled in
//! │   ├── preview.rs  ◄─── Preview resource ownership
//! │   └── config.rs   ◄─── Configuration + currency formatting
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── pricing.rs  ◄─── Load / edit / recompute
//! │   ├── receipt.rs  ◄─── Receipt fields / flags / date
//! │   └── export.rs   ◄─── Preview / download / close
//! ├── export/
//! │   ├── mod.rs      ◄─── Renderer trait, output modes
//! │   └── text.rs     ◄─── Plain-text quotation and receipt
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! All pricing math lives in `quote-core`; nothing here computes a total
//! by itself.

pub mod cli;
pub mod commands;
pub mod error;
pub mod export;
pub mod session;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use state::ConfigState;

/// Runs the command line application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap derive, exits with usage on bad flags                        │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • QUOTE_* environment variables over defaults                       │
/// │     • Flags over environment                                            │
/// │                                                                         │
/// │  4. Price & Print ────────────────────────────────────────────────────► │
/// │     • Session with the text renderer                                    │
/// │     • Summary on stdout, errors on stderr, exit code 1                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Quote Desk");
    let config = ConfigState::from_env();

    match cli::execute(&cli, config) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quote_core=trace` - Show trace for the pricing core only
/// - Default: INFO level, DEBUG for quote crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quote_core=debug,quote_desk_lib=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
