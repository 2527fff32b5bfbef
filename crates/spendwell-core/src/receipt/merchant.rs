//! Merchant name extraction
//!
//! The store name is almost always in the first few printed lines, above the
//! item rows. Scan those lines, skip obvious boilerplate, and take the first
//! plausibly-sized survivor.

use std::sync::LazyLock;

use regex::Regex;

use super::ParserConfig;

/// Sentinel returned when no line qualifies
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

static CURRENCY_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£]?\d+\.\d{2}\b").unwrap());

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}\b").unwrap()
});

static CONTACT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    // Whole-word contact markers; merchants like "Grand Hotel" must survive
    Regex::new(r"(?i)(?:\b(?:tel|phone|fax)\b|www\.|http|\.com|\.net|@|\d{3}[-.\s]\d{3}[-.\s]\d{4})")
        .unwrap()
});

static BOILERPLATE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:receipt|invoice|thank)").unwrap());

/// Pick the store name from the receipt's line list.
pub fn extract_merchant(lines: &[&str], config: &ParserConfig) -> String {
    if lines.is_empty() {
        return UNKNOWN_MERCHANT.to_string();
    }

    for line in lines.iter().take(config.merchant_scan_lines) {
        if is_boilerplate(line) {
            continue;
        }
        if line.len() > 2 && line.len() < 40 {
            return line.to_string();
        }
    }

    lines[0].to_string()
}

fn is_boilerplate(line: &str) -> bool {
    CONTACT_MARKER.is_match(line)
        || BOILERPLATE_WORD.is_match(line)
        || CURRENCY_AMOUNT.is_match(line)
        || DATE_SHAPE.is_match(line)
}
