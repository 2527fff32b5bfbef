//! Domain models for Spendwell

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expense category
///
/// A single closed taxonomy shared by the receipt pipeline, the standalone
/// categorizer, and the wastage patterns. Declaration order doubles as the
/// tie-break order when keyword scores are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Dining,
    Transport,
    Shopping,
    Health,
    Entertainment,
    Utilities,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::Dining => "dining",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Entertainment => "entertainment",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }

    /// All categories in declaration order
    pub fn all() -> &'static [Category] {
        &[
            Self::Groceries,
            Self::Dining,
            Self::Transport,
            Self::Shopping,
            Self::Health,
            Self::Entertainment,
            Self::Utilities,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groceries" | "grocery" => Ok(Self::Groceries),
            "dining" | "food" | "restaurant" => Ok(Self::Dining),
            "transport" | "transportation" => Ok(Self::Transport),
            "shopping" => Ok(Self::Shopping),
            "health" | "healthcare" => Ok(Self::Health),
            "entertainment" => Ok(Self::Entertainment),
            "utilities" | "utility" => Ok(Self::Utilities),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much structure was actually recovered from the receipt text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Only the synthetic fallback item exists
    Low,
    /// A printed total was found but no line items
    Medium,
    /// At least one real line item was extracted
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Numeric rank for comparisons (higher = more structure recovered)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown confidence: {}", s)),
        }
    }
}

/// One purchased product/service and its price, as a row on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: f64,
    pub category: Category,
}

/// Structured result of parsing one receipt
///
/// Always usable: every field degrades to a safe default rather than
/// failing (today's date, "Unknown Merchant", a synthetic placeholder item).
/// Callers branch on `confidence` to decide whether to prompt the user for
/// manual correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptParseResult {
    pub date: NaiveDate,
    pub merchant: String,
    pub items: Vec<LineItem>,
    pub total: f64,
    pub success: bool,
    pub confidence: Confidence,
}

/// A historical expense record, input to the wastage detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
}

/// Severity of a wastage alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Fixed priority tier of a named wastage pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternPriority {
    Low,
    Medium,
    High,
}

/// A detected harmful spending pattern with its projected cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WastageAlert {
    /// Stable key for deduplication (e.g. "wastage:tobacco")
    pub id: String,
    pub pattern_key: String,
    pub title: String,
    pub description: String,
    /// Total spent on this pattern in the observed window
    pub total_amount: f64,
    /// How many matching expenses were found
    pub frequency: usize,
    /// Spend per month (the observed window is treated as one month)
    pub monthly_impact: f64,
    /// Projected annualized cost (monthly_impact * 12)
    pub yearly_impact: f64,
    pub severity: Severity,
    pub matched_expenses: Vec<Expense>,
    pub suggestion: String,
}
