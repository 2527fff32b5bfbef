//! Item name normalization
//!
//! Receipt item rows carry quantity prefixes, SKU/UPC codes, unit words, and
//! stray punctuation around the product name. Strip all of that, collapse
//! whitespace, and title-case what survives.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\d+\s*[x*]\s+").unwrap());

static TRAILING_MULTIPLIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\(\d+x\)\s*$").unwrap());

// Labeled code tokens only; bare letter runs inside product names
// ("Cupcake", "Skull") must not match
static CODE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:item\s*#|\b(?:sku|upc)\b:?)\s*\d*").unwrap());

static LEADING_ROLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:qty|sku|item|product|dept)\b\.?\s*").unwrap());

static TRAILING_UNIT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:each|ea|pcs?|pieces?)\.?\s*$").unwrap());

static LEADING_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-zA-Z0-9]+").unwrap());

static TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-.,:;*#]+$").unwrap());

/// Normalize a raw item name captured from a receipt line.
pub fn normalize_item_name(raw: &str) -> String {
    let mut name = raw.trim().to_string();

    name = LEADING_QUANTITY.replace(&name, "").into_owned();
    name = TRAILING_MULTIPLIER.replace(&name, "").into_owned();
    name = CODE_TOKEN.replace_all(&name, " ").into_owned();
    name = LEADING_ROLE_WORD.replace(&name, "").into_owned();
    name = TRAILING_UNIT_WORD.replace(&name, "").into_owned();
    name = name.replace(['$', '€', '£'], " ");
    name = LEADING_NON_ALNUM.replace(&name, "").into_owned();
    name = TRAILING_PUNCT.replace(&name, "").into_owned();

    title_case(&name)
}

/// First letter of every word capitalized, rest lowercased.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_cases_plain_name() {
        assert_eq!(normalize_item_name("MILK"), "Milk");
        assert_eq!(normalize_item_name("whole wheat bread"), "Whole Wheat Bread");
    }

    #[test]
    fn test_strips_leading_quantity() {
        assert_eq!(normalize_item_name("2 x Milk"), "Milk");
        assert_eq!(normalize_item_name("3x eggs"), "Eggs");
    }

    #[test]
    fn test_strips_trailing_multiplier_marker() {
        assert_eq!(normalize_item_name("Milk (2x)"), "Milk");
    }

    #[test]
    fn test_strips_code_tokens() {
        assert_eq!(normalize_item_name("SKU: 12345 Soap"), "Soap");
        assert_eq!(normalize_item_name("Item #99 Towels"), "Towels");
        assert_eq!(normalize_item_name("UPC: 0123456 Juice"), "Juice");
    }

    #[test]
    fn test_code_letters_inside_words_kept() {
        // "upc" in Cupcake and "sku" in Skull are not code labels
        assert_eq!(normalize_item_name("Cupcake"), "Cupcake");
        assert_eq!(normalize_item_name("Skull Mug"), "Skull Mug");
    }

    #[test]
    fn test_strips_role_and_unit_words() {
        assert_eq!(normalize_item_name("qty bananas"), "Bananas");
        assert_eq!(normalize_item_name("Apples each"), "Apples");
        assert_eq!(normalize_item_name("Rolls 4 pcs"), "Rolls 4");
    }

    #[test]
    fn test_strips_punctuation_and_currency() {
        assert_eq!(normalize_item_name("**Chips..."), "Chips");
        assert_eq!(normalize_item_name("$ Orange Juice -"), "Orange Juice");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_item_name("  red   apples  "), "Red Apples");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_item_name(""), "");
        assert_eq!(normalize_item_name("***"), "");
    }
}
