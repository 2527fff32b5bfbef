//! Expense history import
//!
//! Reads the `date,description,amount,category` CSV format fed to the
//! wastage detector. Category is optional: blank or unrecognized values
//! fall back through the keyword categorizer.

use std::io::Read;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::categorize::categorize;
use crate::error::{Error, Result};
use crate::models::{Category, Expense};

/// Parse an expense history CSV.
///
/// Expected header: `date,description,amount,category` with ISO dates.
pub fn read_expenses_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut expenses = Vec::new();

    for result in rdr.records() {
        let record = result?;

        let date_str = record
            .get(0)
            .ok_or_else(|| Error::Import("Missing date".into()))?;
        let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
            .map_err(|e| Error::Import(format!("Invalid date '{}': {}", date_str, e)))?;

        let description = record
            .get(1)
            .ok_or_else(|| Error::Import("Missing description".into()))?
            .trim()
            .to_string();

        let amount_str = record
            .get(2)
            .ok_or_else(|| Error::Import("Missing amount".into()))?;
        let amount: f64 = amount_str
            .trim()
            .trim_start_matches('$')
            .parse()
            .map_err(|e| Error::Import(format!("Invalid amount '{}': {}", amount_str, e)))?;

        let category = record
            .get(3)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<Category>().ok())
            .unwrap_or_else(|| categorize(&description, None));

        expenses.push(Expense {
            date,
            description,
            amount,
            category,
        });
    }

    debug!(count = expenses.len(), "imported expenses from CSV");
    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_basic_csv() {
        let csv = "date,description,amount,category\n\
                   2024-05-01,Starbucks latte,6.50,dining\n\
                   2024-05-02,Marlboro pack,9.00,\n";
        let expenses = read_expenses_csv(csv.as_bytes()).unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, Category::Dining);
        assert_eq!(expenses[0].amount, 6.50);
        // Blank category falls back to the keyword categorizer
        assert_eq!(expenses[1].description, "Marlboro pack");
    }

    #[test]
    fn test_dollar_prefix_tolerated() {
        let csv = "date,description,amount,category\n2024-05-01,Lunch,$12.00,dining\n";
        let expenses = read_expenses_csv(csv.as_bytes()).unwrap();
        assert_eq!(expenses[0].amount, 12.00);
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let csv = "date,description,amount,category\n2024-05-01,Milk,2.50,not-a-category\n";
        let expenses = read_expenses_csv(csv.as_bytes()).unwrap();
        assert_eq!(expenses[0].category, Category::Groceries);
    }

    #[test]
    fn test_bad_date_is_error() {
        let csv = "date,description,amount,category\n05/01/2024,Milk,2.50,groceries\n";
        assert!(read_expenses_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_bad_amount_is_error() {
        let csv = "date,description,amount,category\n2024-05-01,Milk,two fifty,groceries\n";
        assert!(read_expenses_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_file() {
        let csv = "date,description,amount,category\n";
        assert!(read_expenses_csv(csv.as_bytes()).unwrap().is_empty());
    }
}
