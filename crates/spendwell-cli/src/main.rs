//! Spendwell CLI - Receipt extraction and wastage detection
//!
//! Usage:
//!   spendwell parse --file receipt.txt       Parse a scanned receipt
//!   spendwell categorize "Caffe Latte"       Categorize an expense
//!   spendwell wastage --file expenses.csv    Detect wasteful habits

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Parse { file, json } => commands::cmd_parse(&file, json),
        Commands::Categorize { text, merchant } => {
            commands::cmd_categorize(&text, merchant.as_deref())
        }
        Commands::Wastage {
            file,
            json,
            min_severity,
        } => commands::cmd_wastage(&file, json, min_severity),
    }
}
