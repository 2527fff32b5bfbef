//! Receipt-to-expense extraction pipeline
//!
//! Turns raw, already-OCR'd receipt text into structured expense data. The
//! pipeline never fails: every stage degrades to a safe default (today's
//! date, "Unknown Merchant", a synthetic placeholder item) and quality is
//! reported through the `confidence` field instead of an error channel.

pub mod date;
pub mod items;
pub mod merchant;
pub mod normalize;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::models::{Confidence, ReceiptParseResult};

pub use merchant::UNKNOWN_MERCHANT;

/// Tunable pipeline thresholds
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Lowest plausible receipt year (inclusive)
    pub year_min: i32,
    /// Highest plausible receipt year (inclusive)
    pub year_max: i32,
    /// Exclusive upper bound on a single item amount
    pub max_item_amount: f64,
    /// How many leading lines to consider for the merchant name
    pub merchant_scan_lines: usize,
    /// Amount assigned to the synthetic placeholder item
    pub fallback_item_amount: f64,
    /// Name of the synthetic placeholder item
    pub fallback_item_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            year_min: 2020,
            year_max: 2030,
            max_item_amount: 10_000.0,
            merchant_scan_lines: 5,
            fallback_item_amount: 10.0,
            fallback_item_name: "Store Purchase".to_string(),
        }
    }
}

impl ParserConfig {
    pub(crate) fn year_in_window(&self, year: i32) -> bool {
        year >= self.year_min && year <= self.year_max
    }
}

/// The receipt parsing pipeline
///
/// Stateless and safe to share; calling `parse` twice with identical input
/// yields identical output.
pub struct ReceiptParser {
    config: ParserConfig,
}

impl ReceiptParser {
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse one receipt's raw text into a structured result.
    ///
    /// Sole entry point of the pipeline. Always returns a usable result;
    /// callers branch on `confidence` to decide whether to ask the user
    /// for manual correction.
    pub fn parse(&self, raw_text: &str) -> ReceiptParseResult {
        self.parse_with_today(raw_text, Utc::now().date_naive())
    }

    /// Seam for deterministic tests: "today" is injected.
    pub(crate) fn parse_with_today(&self, raw_text: &str, today: NaiveDate) -> ReceiptParseResult {
        let lines: Vec<&str> = raw_text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let date = date::extract_date_with_today(raw_text, today, &self.config);
        let merchant = merchant::extract_merchant(&lines, &self.config);

        let merchant_hint = if merchant == UNKNOWN_MERCHANT {
            None
        } else {
            Some(merchant.as_str())
        };
        let mut items = items::extract_items(&lines, merchant_hint, &self.config);

        // Items win: the printed total is ignored whenever real rows parsed
        let (total, confidence) = if !items.is_empty() {
            (items.iter().map(|i| i.amount).sum(), Confidence::High)
        } else {
            let fallback_total = items::extract_total_fallback(raw_text);
            if fallback_total > 0.0 {
                (fallback_total, Confidence::Medium)
            } else {
                let placeholder = items::fallback_item(&self.config);
                let total = placeholder.amount;
                items.push(placeholder);
                (total, Confidence::Low)
            }
        };

        debug!(
            merchant = %merchant,
            items = items.len(),
            total,
            confidence = %confidence,
            "parsed receipt"
        );

        ReceiptParseResult {
            date,
            merchant,
            items,
            total,
            // The synthetic placeholder alone does not count as success
            success: confidence != Confidence::Low,
            confidence,
        }
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a receipt with default configuration.
pub fn parse_receipt(raw_text: &str) -> ReceiptParseResult {
    ReceiptParser::new().parse(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn parse(text: &str) -> ReceiptParseResult {
        ReceiptParser::new().parse_with_today(text, today())
    }

    #[test]
    fn test_full_receipt() {
        let result = parse("WALMART\n01/15/2024\nMilk 2.50\nBread 3.00\nTotal 5.50\n");

        assert_eq!(result.merchant, "WALMART");
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].name, "Milk");
        assert_eq!(result.items[0].amount, 2.50);
        assert_eq!(result.items[0].category, Category::Groceries);
        assert_eq!(result.items[1].name, "Bread");
        assert_eq!(result.items[1].amount, 3.00);
        assert_eq!(result.total, 5.50);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.success);
    }

    #[test]
    fn test_items_win_over_printed_total() {
        // The printed Total disagrees with the item sum; items win
        let result = parse("SHOP\nMilk 2.50\nTotal 99.99\n");
        assert_eq!(result.total, 2.50);
    }

    #[test]
    fn test_total_only_receipt_is_medium() {
        let result = parse("CORNER STORE\nTotal 12.75\n");
        assert!(result.items.is_empty());
        assert_eq!(result.total, 12.75);
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.success);
    }

    #[test]
    fn test_unreadable_receipt_gets_placeholder() {
        let result = parse("####\n????\n");
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "Store Purchase");
        assert_eq!(result.total, result.items[0].amount);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(!result.success);
        assert_eq!(result.date, today());
        assert_eq!(result.merchant, "####");
    }

    #[test]
    fn test_empty_input() {
        let result = parse("");
        assert_eq!(result.merchant, UNKNOWN_MERCHANT);
        assert_eq!(result.confidence, Confidence::Low);
        assert!(!result.success);
    }

    #[test]
    fn test_idempotent() {
        let text = "WALMART\n01/15/2024\nMilk 2.50\n";
        let a = parse(text);
        let b = parse(text);
        assert_eq!(a, b);
    }
}
