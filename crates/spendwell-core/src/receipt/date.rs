//! Transaction date extraction
//!
//! Tries an ordered cascade of date-shape matchers over the raw receipt
//! text; the first shape that parses into a real calendar date wins. The
//! winner is then validated against the configured year sanity window, and
//! anything out of range (or no match at all) degrades to today's date.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

use super::ParserConfig;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b").unwrap());

static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{2,4})\b").unwrap());

static MONTH_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b")
        .unwrap()
});

static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b")
        .unwrap()
});

static LABELED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:transaction\s+date|purchase\s+date|date)\s*[:\-]\s*(.+)$").unwrap()
});

static RELATIVE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(today|yesterday)\b").unwrap());

/// Extract the transaction date from receipt text.
///
/// Always returns a valid date; see module docs for the fallback policy.
pub fn extract_date(text: &str, config: &ParserConfig) -> NaiveDate {
    extract_date_with_today(text, Utc::now().date_naive(), config)
}

/// Seam for deterministic tests: the "current date" is passed in.
pub(crate) fn extract_date_with_today(
    text: &str,
    today: NaiveDate,
    config: &ParserConfig,
) -> NaiveDate {
    let candidate = first_date_match(text, today);

    match candidate {
        Some(date) if config.year_in_window(date.year()) => date,
        Some(date) => {
            debug!(%date, "extracted date outside sanity window, using today");
            today
        }
        None => today,
    }
}

/// Run the matcher cascade; first successfully parsed shape wins.
fn first_date_match(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = ISO_DATE.captures(text) {
        let ymd = (
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
        if let Some(date) = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2) {
            return Some(date);
        }
    }

    if let Some(date) = NUMERIC_DATE
        .captures(text)
        .and_then(|caps| parse_numeric_triple(&caps[1], &caps[2], &caps[3]))
    {
        return Some(date);
    }

    if let Some(caps) = MONTH_FIRST.captures(text) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DAY_FIRST.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    // Labeled fields re-run the value part through the shape matchers,
    // so "Date: Jan 5, 2024" and "Date: 05/01/2024" both resolve.
    if let Some(caps) = LABELED_DATE.captures(text) {
        let value = caps[1].trim();
        if let Some(date) = parse_date_value(value) {
            return Some(date);
        }
    }

    // Datetime-with-time inputs need no arm of their own: the ISO matcher
    // already picks up the leading date part.
    if let Some(caps) = RELATIVE_DATE.captures(text) {
        return Some(match caps[1].to_lowercase().as_str() {
            "yesterday" => today - Duration::days(1),
            _ => today,
        });
    }

    None
}

/// Parse a labeled field value (everything after "Date:")
fn parse_date_value(value: &str) -> Option<NaiveDate> {
    if let Some(caps) = ISO_DATE.captures(value) {
        if let Some(date) = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        ) {
            return Some(date);
        }
    }
    if let Some(caps) = NUMERIC_DATE.captures(value) {
        if let Some(date) = parse_numeric_triple(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }
    if let Some(caps) = MONTH_FIRST.captures(value) {
        let month = month_number(&caps[1])?;
        return NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?);
    }
    if let Some(caps) = DAY_FIRST.captures(value) {
        let month = month_number(&caps[2])?;
        return NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[1].parse().ok()?);
    }
    None
}

/// Parse `a/b/year` where the day/month order is ambiguous.
///
/// Day-first is tried before month-first, so `05/01/2024` reads as
/// January 5th while `01/15/2024` still resolves (month 15 is impossible,
/// the fields swap).
fn parse_numeric_triple(a: &str, b: &str, year: &str) -> Option<NaiveDate> {
    let a: u32 = a.parse().ok()?;
    let b: u32 = b.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, b, a).or_else(|| NaiveDate::from_ymd_opt(year, a, b))
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}
