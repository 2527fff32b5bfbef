//! Line-item extraction strategies
//!
//! Each receipt line is run through an ordered set of strategy objects until
//! one matches and validates. Lines that carry no extractable item fall
//! through to a loose any-price pass. A processed-line set guarantees each
//! line yields at most one item even when several strategies could match it.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::categorize::categorize;
use crate::models::LineItem;

use super::normalize::normalize_item_name;
use super::ParserConfig;

/// A raw extraction candidate before normalization and validation
#[derive(Debug, Clone)]
pub(crate) struct ItemCandidate {
    pub raw_name: String,
    pub amount: f64,
    pub quantity: Option<u32>,
}

/// One way of reading an item row out of a receipt line
pub(crate) trait ItemStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn attempt(&self, line: &str) -> Option<ItemCandidate>;
}

static QUANTITY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,3})\s*x\s+(.+?)\s+\$?(\d{1,4}\.\d{2})\s*$").unwrap());

static PRICE_FIRST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?(\d{1,4}\.\d{2})\s+(.+?)\s*$").unwrap());

static SKU_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4,})\s+(.+?)\s+\$?(\d{1,4}\.\d{2})\s*$").unwrap());

static TRAILING_AMOUNT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+\$?(\d{1,4}\.\d{2})\s*$").unwrap());

// Unbounded digits so an over-limit amount is captured whole and rejected
// by the price bound, not silently truncated to a matching suffix
static ANY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d{2}").unwrap());

static TOTAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:grand\s+total|total|amount|balance|final)\b[^0-9\n]*(\d{1,6}\.\d{2})")
        .unwrap()
});

static SKIP_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:subtotal|total|tax|change|cash|card|date|time)\b").unwrap()
});

static CONTACT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    // Contact words are whole-word anchored so "Hotel" or "Halifax" in an
    // item name does not read as contact info
    Regex::new(r"(?i)(?:\b(?:tel|phone|fax)\b|www\.|http|\.com|@|\d{3}[-.\s]\d{3}[-.\s]\d{4})")
        .unwrap()
});

/// `2 x Milk 5.00` — quantity folded into the name as `Milk (2x)`
struct QuantityPrefixed;

impl ItemStrategy for QuantityPrefixed {
    fn name(&self) -> &'static str {
        "quantity_prefixed"
    }

    fn attempt(&self, line: &str) -> Option<ItemCandidate> {
        let caps = QUANTITY_LINE.captures(line)?;
        Some(ItemCandidate {
            raw_name: caps[2].to_string(),
            amount: caps[3].parse().ok()?,
            quantity: caps[1].parse().ok(),
        })
    }
}

/// `5.00 Milk` — price printed before the name
struct PriceFirst;

impl ItemStrategy for PriceFirst {
    fn name(&self) -> &'static str {
        "price_first"
    }

    fn attempt(&self, line: &str) -> Option<ItemCandidate> {
        let caps = PRICE_FIRST_LINE.captures(line)?;
        Some(ItemCandidate {
            raw_name: caps[2].to_string(),
            amount: caps[1].parse().ok()?,
            quantity: None,
        })
    }
}

/// `004912 Bath Towel 12.99` — department-store SKU rows
struct SkuPrefixed;

impl ItemStrategy for SkuPrefixed {
    fn name(&self) -> &'static str {
        "sku_prefixed"
    }

    fn attempt(&self, line: &str) -> Option<ItemCandidate> {
        let caps = SKU_LINE.captures(line)?;
        Some(ItemCandidate {
            raw_name: caps[2].to_string(),
            amount: caps[3].parse().ok()?,
            quantity: None,
        })
    }
}

/// `Milk 2.50` — the generic name-then-amount row
struct TrailingAmount;

impl ItemStrategy for TrailingAmount {
    fn name(&self) -> &'static str {
        "trailing_amount"
    }

    fn attempt(&self, line: &str) -> Option<ItemCandidate> {
        let caps = TRAILING_AMOUNT_LINE.captures(line)?;
        Some(ItemCandidate {
            raw_name: caps[1].to_string(),
            amount: caps[2].parse().ok()?,
            quantity: None,
        })
    }
}

/// Strategies in priority order
static STRATEGIES: &[&(dyn ItemStrategy)] =
    &[&QuantityPrefixed, &PriceFirst, &SkuPrefixed, &TrailingAmount];

/// Extract line items from the surviving receipt lines.
///
/// Amounts outside `(0, max_item_amount)` and empty names are discarded
/// silently; the pipeline communicates quality via confidence, not errors.
pub fn extract_items(lines: &[&str], merchant: Option<&str>, config: &ParserConfig) -> Vec<LineItem> {
    let mut items = Vec::new();
    let mut processed: HashSet<usize> = HashSet::new();

    for (idx, line) in lines.iter().enumerate() {
        if should_skip_line(line) {
            continue;
        }

        for strategy in STRATEGIES {
            let Some(candidate) = strategy.attempt(line) else {
                continue;
            };
            if let Some(item) = build_item(&candidate, merchant, config) {
                debug!(strategy = strategy.name(), line, "extracted item");
                items.push(item);
                processed.insert(idx);
                break;
            }
        }
    }

    // Loose pass: any two-decimal token, with enough text before it to name
    // the item. Only lines no strategy consumed are eligible.
    for (idx, line) in lines.iter().enumerate() {
        if processed.contains(&idx) || should_skip_line(line) {
            continue;
        }

        let Some(m) = ANY_AMOUNT.find(line) else {
            continue;
        };
        let prefix = line[..m.start()].trim_matches(|c: char| !c.is_alphanumeric() && c != ' ');
        if prefix.trim().len() <= 3 {
            continue;
        }
        let candidate = ItemCandidate {
            raw_name: prefix.trim().to_string(),
            amount: match m.as_str().parse() {
                Ok(a) => a,
                Err(_) => continue,
            },
            quantity: None,
        };
        if let Some(item) = build_item(&candidate, merchant, config) {
            debug!(line, "extracted item via loose amount pass");
            items.push(item);
            processed.insert(idx);
        }
    }

    items
}

/// Normalize, fold quantity, validate, and categorize a candidate.
fn build_item(
    candidate: &ItemCandidate,
    merchant: Option<&str>,
    config: &ParserConfig,
) -> Option<LineItem> {
    if candidate.amount <= 0.0 || candidate.amount >= config.max_item_amount {
        return None;
    }

    let mut name = normalize_item_name(&candidate.raw_name);
    if name.is_empty() {
        return None;
    }
    if let Some(qty) = candidate.quantity {
        if qty > 1 {
            name = format!("{} ({}x)", name, qty);
        }
    }

    let category = categorize(&name, merchant);

    Some(LineItem {
        name,
        amount: candidate.amount,
        category,
    })
}

/// Lines that never contain purchasable items
fn should_skip_line(line: &str) -> bool {
    SKIP_WORD.is_match(line)
        || CONTACT_LINE.is_match(line)
        || !line.chars().any(|c| c.is_alphanumeric())
}

/// Search the full text for an explicit total token when no items were found.
///
/// Returns the first valid positive match, else 0.
pub fn extract_total_fallback(text: &str) -> f64 {
    for caps in TOTAL_TOKEN.captures_iter(text) {
        if let Ok(amount) = caps[1].parse::<f64>() {
            if amount > 0.0 {
                return amount;
            }
        }
    }
    0.0
}

/// Produce the single synthetic placeholder item used when nothing else
/// could be extracted, so downstream consumers never see an empty result.
pub fn fallback_item(config: &ParserConfig) -> LineItem {
    LineItem {
        name: config.fallback_item_name.clone(),
        amount: config.fallback_item_amount,
        category: crate::models::Category::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn extract(lines: &[&str]) -> Vec<LineItem> {
        extract_items(lines, None, &ParserConfig::default())
    }

    #[test]
    fn test_generic_trailing_amount() {
        let items = extract(&["Milk 2.50"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[0].amount, 2.50);
        assert_eq!(items[0].category, Category::Groceries);
    }

    #[test]
    fn test_quantity_prefixed() {
        let items = extract(&["2 x Milk 5.00"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk (2x)");
        assert_eq!(items[0].amount, 5.00);
    }

    #[test]
    fn test_price_first() {
        let items = extract(&["3.99 Orange Juice"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Orange Juice");
        assert_eq!(items[0].amount, 3.99);
    }

    #[test]
    fn test_sku_prefixed() {
        let items = extract(&["004912 Bath Towel 12.99"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Bath Towel");
        assert_eq!(items[0].amount, 12.99);
    }

    #[test]
    fn test_dollar_signs_accepted() {
        let items = extract(&["Bread $3.00"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Bread");
        assert_eq!(items[0].amount, 3.00);
    }

    #[test]
    fn test_denylist_lines_skipped() {
        let items = extract(&[
            "Subtotal 5.50",
            "Tax 0.45",
            "Total 5.95",
            "CASH 10.00",
            "Change 4.05",
            "Milk 2.50",
        ]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk");
    }

    #[test]
    fn test_contact_and_symbol_lines_skipped() {
        let items = extract(&["Tel: 555-123-4567", "*****", "Milk 2.50"]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_amount_bounds_discard() {
        let items = extract(&["Gift Card 0.00", "Television 10000.00", "Milk 2.50"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Milk");
    }

    #[test]
    fn test_oversize_amount_not_truncated() {
        // Five-digit amounts must be rejected whole, never read as a
        // four-digit suffix that slips under the price bound
        let items = extract(&["Speaker 10500.00"]);
        assert!(items.is_empty());
    }

    #[test]
    fn test_word_containing_contact_marker_kept() {
        // "tel" inside "Hotel" is not a contact line
        let items = extract(&["Hotel Soap 3.00", "Milk 2.50"]);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Hotel Soap");
    }

    #[test]
    fn test_loose_fallback_needs_name() {
        // "Mystery item ref 4.99" has no trailing amount but a decimal token;
        // the prefix is long enough to name the item
        let items = extract(&["Mystery item 4.99 ref"]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Mystery Item");
        assert_eq!(items[0].amount, 4.99);

        // Too-short prefixes are not items
        let items = extract(&["ab 4.99 ref"]);
        assert!(items.is_empty());
    }

    #[test]
    fn test_each_line_yields_one_item() {
        // A line both PriceFirst and TrailingAmount could read still
        // produces exactly one item
        let items = extract(&["2.50 Milk 3.00"]);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_merchant_feeds_categorizer() {
        let items = extract_items(&["Mystery Pack 4.00"], Some("WALMART"), &ParserConfig::default());
        assert_eq!(items[0].category, Category::Groceries);
    }

    #[test]
    fn test_total_fallback() {
        assert_eq!(extract_total_fallback("Total 5.50"), 5.50);
        assert_eq!(extract_total_fallback("GRAND TOTAL: $12.00"), 12.00);
        assert_eq!(extract_total_fallback("Balance due 7.25"), 7.25);
        assert_eq!(extract_total_fallback("nothing here"), 0.0);
    }

    #[test]
    fn test_fallback_item() {
        let cfg = ParserConfig::default();
        let item = fallback_item(&cfg);
        assert_eq!(item.name, "Store Purchase");
        assert!(item.amount > 0.0);
        assert_eq!(item.category, Category::Other);
    }
}
