//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use spendwell_core::Severity;

/// Spendwell - Turn receipts into expenses and spot wasteful habits
#[derive(Parser)]
#[command(name = "spendwell")]
#[command(about = "Receipt extraction and recurring-wastage detection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a receipt text file into structured expense data
    Parse {
        /// Receipt text file (OCR output or plain text)
        #[arg(short, long)]
        file: PathBuf,

        /// Emit the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Categorize a single expense description
    Categorize {
        /// Item or expense description
        text: String,

        /// Merchant name, used as additional categorization context
        #[arg(short, long)]
        merchant: Option<String>,
    },

    /// Detect recurring-wastage patterns in a month of expense history
    Wastage {
        /// Expense history CSV (date,description,amount,category)
        #[arg(short, long)]
        file: PathBuf,

        /// Emit alerts as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Hide alerts below this severity: low, medium, high
        #[arg(long, default_value = "low")]
        min_severity: Severity,
    },
}
