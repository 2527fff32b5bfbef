//! Keyword-based expense categorization
//!
//! Scores a fixed keyword dictionary against item text plus optional merchant
//! text. Longer keywords and repeated occurrences score higher; ties resolve
//! by category declaration order so results are deterministic.

use crate::models::Category;

/// Keyword dictionary, in Category declaration order.
///
/// Score per category = sum over matching keywords of
/// keyword length x occurrence count. First-declared category wins ties.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Groceries,
        &[
            "milk", "bread", "egg", "cheese", "butter", "yogurt", "cereal", "rice", "pasta",
            "flour", "sugar", "fruit", "apple", "banana", "vegetable", "produce", "chicken",
            "beef", "fish", "grocery", "supermarket", "market", "walmart", "kroger", "aldi",
            "safeway", "costco", "trader joe",
        ],
    ),
    (
        Category::Dining,
        &[
            "restaurant", "cafe", "coffee", "latte", "espresso", "pizza", "burger", "sandwich",
            "sushi", "diner", "grill", "bakery", "bistro", "brunch", "takeout", "mcdonald",
            "starbucks", "subway", "chipotle", "kfc", "taco",
        ],
    ),
    (
        Category::Transport,
        &[
            "fuel", "gas", "petrol", "diesel", "uber", "lyft", "taxi", "cab", "bus", "train",
            "metro", "transit", "parking", "toll", "fare", "shell", "chevron", "exxon",
        ],
    ),
    (
        Category::Shopping,
        &[
            "shirt", "pants", "shoe", "sock", "jacket", "clothing", "apparel", "electronics",
            "gadget", "toy", "furniture", "decor", "amazon", "target", "ikea", "mall",
            "best buy", "accessory",
        ],
    ),
    (
        Category::Health,
        &[
            "pharmacy", "medicine", "vitamin", "prescription", "clinic", "doctor", "dental",
            "hospital", "drug", "bandage", "cvs", "walgreens", "rite aid",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "movie", "cinema", "theater", "concert", "ticket", "game", "arcade", "netflix",
            "spotify", "hulu", "streaming", "bowling",
        ],
    ),
    (
        Category::Utilities,
        &[
            "electric", "electricity", "water bill", "internet", "broadband", "cable",
            "phone bill", "utility", "power", "energy", "wifi",
        ],
    ),
];

/// Categorize an item by keyword score against its name and merchant.
///
/// Returns `Category::Other` when nothing in the dictionary matches.
pub fn categorize(item_text: &str, merchant_text: Option<&str>) -> Category {
    let haystack = match merchant_text {
        Some(m) => format!("{} {}", item_text, m).to_lowercase(),
        None => item_text.to_lowercase(),
    };

    let mut best = Category::Other;
    let mut best_score = 0usize;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let score: usize = keywords
            .iter()
            .map(|kw| kw.len() * haystack.matches(kw).count())
            .sum();

        // Strict greater-than keeps the first-declared category on ties
        if score > best_score {
            best_score = score;
            best = *category;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_grocery_item() {
        assert_eq!(categorize("Milk", None), Category::Groceries);
        assert_eq!(categorize("Whole Wheat Bread", None), Category::Groceries);
    }

    #[test]
    fn test_categorize_uses_merchant() {
        // Item name alone is unknown, merchant decides
        assert_eq!(
            categorize("Great Value 2%", Some("WALMART")),
            Category::Groceries
        );
        assert_eq!(categorize("Venti", Some("STARBUCKS")), Category::Dining);
    }

    #[test]
    fn test_categorize_no_match() {
        assert_eq!(categorize("Xzqw", None), Category::Other);
        assert_eq!(categorize("", None), Category::Other);
    }

    #[test]
    fn test_categorize_case_insensitive() {
        assert_eq!(categorize("MILK", None), Category::Groceries);
        assert_eq!(categorize("Pizza Slice", None), Category::Dining);
    }

    #[test]
    fn test_longer_keywords_outweigh_shorter() {
        // "prescription" (12 chars, Health) beats "gas" (3 chars, Transport)
        assert_eq!(
            categorize("gas station prescription", None),
            Category::Health
        );
    }

    #[test]
    fn test_repeated_occurrences_accumulate() {
        // Two occurrences of "coffee" (12) outscore one "grocery" (7)
        assert_eq!(
            categorize("coffee coffee grocery", None),
            Category::Dining
        );
    }
}
