//! One-off expense categorization

use anyhow::Result;

use spendwell_core::categorize;

pub fn cmd_categorize(text: &str, merchant: Option<&str>) -> Result<()> {
    let category = categorize(text, merchant);

    match merchant {
        Some(m) => println!("{} (at {}) → {}", text, m, category),
        None => println!("{} → {}", text, category),
    }

    Ok(())
}
