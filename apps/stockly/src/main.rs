//! # Stockly Entry Point
//!
//! ```text
//! $ stockly products list
//! $ stockly sales complete sale.json
//! $ stockly --db ./shop.db sales summary --from 2026-04-01
//! ```
//!
//! Results are printed to stdout as JSON; failures print an
//! `{ "code", "message" }` object to stderr and exit non-zero.
//! The actual setup is in lib.rs for testability.

use clap::Parser;
use std::process::ExitCode;

use stockly_app::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    stockly_app::run(Cli::parse()).await
}
