//! refcheck - cross-reference checker for AsciiDoc documents
//!
//! refcheck provides:
//! - Anchor and reference extraction that skips comments
//! - Internal reference validation against each document's anchors
//! - Concurrent external reference validation against other files
//! - Unified output format (text/jsonl/json/md)

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod backends;
mod cli;
mod core;
mod refs;

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("refcheck=warn"),
        1 => EnvFilter::new("refcheck=info"),
        _ => EnvFilter::new("refcheck=debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    if cli::run(cli).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
