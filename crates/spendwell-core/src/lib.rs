//! Spendwell Core Library
//!
//! Shared functionality for the Spendwell personal finance tool:
//! - Receipt-to-expense extraction pipeline (date, merchant, line items)
//! - Keyword-based expense categorization
//! - Recurring-wastage pattern detection with yearly cost projection
//! - Expense history CSV import
//! - Injectable upload dedupe cache with TTL eviction
//!
//! The extraction core is synchronous, stateless text processing: one call
//! in, one result out, no I/O. OCR and persistence are external
//! collaborators.

pub mod cache;
pub mod categorize;
pub mod error;
pub mod import;
pub mod models;
pub mod receipt;
pub mod wastage;

pub use cache::{Fingerprint, RateLimiter, UploadCache};
pub use categorize::categorize;
pub use error::{Error, Result};
pub use import::read_expenses_csv;
pub use models::{
    Category, Confidence, Expense, LineItem, PatternPriority, ReceiptParseResult, Severity,
    WastageAlert,
};
pub use receipt::{parse_receipt, ParserConfig, ReceiptParser, UNKNOWN_MERCHANT};
pub use wastage::{detect_wastage, WastageConfig, WastageDetector};
