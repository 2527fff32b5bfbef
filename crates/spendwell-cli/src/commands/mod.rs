//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categorize` - One-off expense categorization
//! - `parse` - Receipt parsing command
//! - `wastage` - Wastage detection report command

pub mod categorize;
pub mod parse;
pub mod wastage;

// Re-export command functions for main.rs
pub use categorize::*;
pub use parse::*;
pub use wastage::*;
