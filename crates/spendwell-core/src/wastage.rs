//! Recurring-wastage pattern detection
//!
//! Scans a user's historical expenses for harmful spending habits and
//! projects their yearly cost. Two independent passes:
//!
//! - Named patterns: a fixed table of habits (tobacco, alcohol, coffee
//!   shops, fast food, snacks, impulse buys) matched by keyword overlap
//!   against expense descriptions.
//! - Frequent near-duplicates: small expenses with identical descriptions
//!   recurring often enough to add up.
//!
//! The input slice is treated as ONE month of history: monthly impact is
//! the group total and yearly impact is that times 12. Callers are
//! responsible for feeding a month-sized window.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Category, Expense, PatternPriority, Severity, WastageAlert};

/// A named spending habit worth flagging
struct WastagePattern {
    key: &'static str,
    title: &'static str,
    keywords: &'static [&'static str],
    category: Category,
    priority: PatternPriority,
    /// Verb phrase slotted into the suggestion template
    remedy: &'static str,
}

/// Fixed pattern table, highest-priority habits first.
const PATTERNS: &[WastagePattern] = &[
    WastagePattern {
        key: "tobacco",
        title: "Tobacco",
        keywords: &[
            "cigarette", "cigarettes", "tobacco", "marlboro", "camel", "vape", "nicotine",
            "smokes",
        ],
        category: Category::Health,
        priority: PatternPriority::High,
        remedy: "quitting",
    },
    WastagePattern {
        key: "alcohol",
        title: "Alcohol",
        keywords: &[
            "beer", "wine", "vodka", "whiskey", "rum", "liquor", "alcohol", "brewery", "lager",
        ],
        category: Category::Entertainment,
        priority: PatternPriority::High,
        remedy: "cutting back",
    },
    WastagePattern {
        key: "coffee-shop",
        title: "Coffee Shops",
        keywords: &["coffee", "starbucks", "latte", "cappuccino", "espresso", "cafe", "mocha"],
        category: Category::Dining,
        priority: PatternPriority::Medium,
        remedy: "brewing at home",
    },
    WastagePattern {
        key: "fast-food",
        title: "Fast Food",
        keywords: &[
            "mcdonald", "burger", "kfc", "pizza", "fries", "domino", "subway", "taco", "wendy",
            "nuggets",
        ],
        category: Category::Dining,
        priority: PatternPriority::Medium,
        remedy: "cooking more meals at home",
    },
    WastagePattern {
        key: "snacks",
        title: "Snacks",
        keywords: &["chips", "candy", "chocolate", "soda", "cookies", "snack", "gum"],
        category: Category::Groceries,
        priority: PatternPriority::Low,
        remedy: "buying in bulk instead",
    },
    WastagePattern {
        key: "impulse-shopping",
        title: "Impulse Shopping",
        keywords: &["sale", "clearance", "discount", "deal", "flash sale", "limited offer"],
        category: Category::Shopping,
        priority: PatternPriority::Low,
        remedy: "a 24-hour wait rule",
    },
];

/// Detection thresholds
#[derive(Debug, Clone)]
pub struct WastageConfig {
    /// Minimum matches for a named pattern to alert on frequency alone
    pub min_pattern_frequency: usize,
    /// Named-pattern total that alerts regardless of frequency
    pub pattern_amount_threshold: f64,
    /// Only expenses below this amount join the near-duplicate pass
    pub small_amount_threshold: f64,
    /// Minimum recurrences for a near-duplicate group
    pub min_duplicate_frequency: usize,
    /// Near-duplicate groups must project past this yearly cost
    pub duplicate_yearly_threshold: f64,
    /// Yearly impact above which severity is High
    pub severity_high_yearly: f64,
    /// Yearly impact above which severity is Medium
    pub severity_medium_yearly: f64,
}

impl Default for WastageConfig {
    fn default() -> Self {
        Self {
            min_pattern_frequency: 3,
            pattern_amount_threshold: 500.0,
            small_amount_threshold: 200.0,
            min_duplicate_frequency: 4,
            duplicate_yearly_threshold: 1000.0,
            severity_high_yearly: 10_000.0,
            severity_medium_yearly: 5_000.0,
        }
    }
}

/// The wastage pattern detector
///
/// Stateless; safe to call concurrently for different users.
pub struct WastageDetector {
    config: WastageConfig,
}

impl WastageDetector {
    pub fn new() -> Self {
        Self {
            config: WastageConfig::default(),
        }
    }

    pub fn with_config(config: WastageConfig) -> Self {
        Self { config }
    }

    /// Detect wastage patterns in one user's expense history.
    ///
    /// Precondition: `expenses` covers roughly one month; yearly impact is
    /// projected as the group total times 12. Alerts come back sorted by
    /// yearly impact, highest first.
    pub fn detect(&self, expenses: &[Expense]) -> Vec<WastageAlert> {
        let mut alerts = Vec::new();

        let claimed = self.detect_named_patterns(expenses, &mut alerts);
        self.detect_frequent_duplicates(expenses, &claimed, &mut alerts);

        // Pattern key breaks impact ties so output order is stable
        alerts.sort_by(|a, b| {
            b.yearly_impact
                .partial_cmp(&a.yearly_impact)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.pattern_key.cmp(&b.pattern_key))
        });

        debug!(alerts = alerts.len(), expenses = expenses.len(), "wastage detection complete");
        alerts
    }

    /// Named-pattern pass. Returns the lowercased descriptions already
    /// claimed, so the duplicate pass does not double-report them.
    fn detect_named_patterns(
        &self,
        expenses: &[Expense],
        alerts: &mut Vec<WastageAlert>,
    ) -> Vec<String> {
        let mut claimed = Vec::new();

        for pattern in PATTERNS {
            let matched: Vec<Expense> = expenses
                .iter()
                .filter(|e| description_matches(&e.description, pattern.keywords))
                .cloned()
                .collect();

            if matched.is_empty() {
                continue;
            }

            let frequency = matched.len();
            let total_amount: f64 = matched.iter().map(|e| e.amount).sum();

            if frequency < self.config.min_pattern_frequency
                && total_amount <= self.config.pattern_amount_threshold
            {
                continue;
            }

            for e in &matched {
                claimed.push(e.description.trim().to_lowercase());
            }

            let yearly_impact = total_amount * 12.0;
            let severity = self.severity_for(yearly_impact, Some(pattern.priority));

            debug!(
                pattern = pattern.key,
                category = %pattern.category,
                frequency, total_amount, yearly_impact, "named pattern matched"
            );

            alerts.push(WastageAlert {
                id: format!("wastage:{}", pattern.key),
                pattern_key: pattern.key.to_string(),
                title: format!("{} Spending", pattern.title),
                description: format!(
                    "{} purchases matched the {} pattern, totaling ${:.2} this month",
                    frequency,
                    pattern.title.to_lowercase(),
                    total_amount
                ),
                total_amount,
                frequency,
                monthly_impact: total_amount,
                yearly_impact,
                severity,
                matched_expenses: matched,
                suggestion: format!(
                    "At this rate you'll spend ${:.0} a year on {} - {} could save most of it",
                    yearly_impact,
                    pattern.title.to_lowercase(),
                    pattern.remedy
                ),
            });
        }

        claimed
    }

    /// Near-duplicate pass: small expenses grouped by exact lowercased
    /// description.
    fn detect_frequent_duplicates(
        &self,
        expenses: &[Expense],
        claimed: &[String],
        alerts: &mut Vec<WastageAlert>,
    ) {
        let mut groups: HashMap<String, Vec<Expense>> = HashMap::new();

        for expense in expenses {
            if expense.amount >= self.config.small_amount_threshold {
                continue;
            }
            let key = expense.description.trim().to_lowercase();
            if key.is_empty() || claimed.contains(&key) {
                continue;
            }
            groups.entry(key).or_default().push(expense.clone());
        }

        // HashMap iteration order is arbitrary; sort the groups by key so
        // equal-impact alerts come back the same way every call
        let mut groups: Vec<(String, Vec<Expense>)> = groups.into_iter().collect();
        groups.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, matched) in groups {
            let frequency = matched.len();
            if frequency < self.config.min_duplicate_frequency {
                continue;
            }

            let total_amount: f64 = matched.iter().map(|e| e.amount).sum();
            let yearly_impact = total_amount * 12.0;
            if yearly_impact <= self.config.duplicate_yearly_threshold {
                continue;
            }

            let severity = self.severity_for(yearly_impact, None);
            let title = matched[0].description.trim().to_string();

            debug!(group = %key, frequency, total_amount, "frequent duplicate matched");

            alerts.push(WastageAlert {
                id: format!("wastage:repeat:{}", key.replace(char::is_whitespace, "-")),
                pattern_key: key,
                title: format!("Frequent: {}", title),
                description: format!(
                    "\"{}\" recurred {} times this month, totaling ${:.2}",
                    title, frequency, total_amount
                ),
                total_amount,
                frequency,
                monthly_impact: total_amount,
                yearly_impact,
                severity,
                matched_expenses: matched,
                suggestion: format!(
                    "Skipping \"{}\" would save about ${:.0} a year",
                    title, yearly_impact
                ),
            });
        }
    }

    /// Severity from projected yearly impact and optional pattern priority.
    fn severity_for(&self, yearly_impact: f64, priority: Option<PatternPriority>) -> Severity {
        if yearly_impact > self.config.severity_high_yearly
            || priority == Some(PatternPriority::High)
        {
            Severity::High
        } else if yearly_impact > self.config.severity_medium_yearly
            || priority == Some(PatternPriority::Medium)
        {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

impl Default for WastageDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect wastage with default configuration.
pub fn detect_wastage(expenses: &[Expense]) -> Vec<WastageAlert> {
    WastageDetector::new().detect(expenses)
}

/// Keyword overlap check: the description is tokenized into single words
/// and adjacent word pairs, and a token matches a keyword by substring
/// containment in either direction (so "smoke" catches "smokes" and
/// "flash sale" catches the two-word keyword).
fn description_matches(description: &str, keywords: &[&str]) -> bool {
    let lowered = description.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    for pair in words.windows(2) {
        tokens.push(format!("{} {}", pair[0], pair[1]));
    }

    tokens.iter().any(|token| {
        keywords
            .iter()
            .any(|kw| token.contains(kw) || kw.contains(token.as_str()))
    })
}
