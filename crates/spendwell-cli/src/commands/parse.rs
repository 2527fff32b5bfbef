//! Receipt parsing command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use spendwell_core::{parse_receipt, Confidence};

pub fn cmd_parse(file: &Path, json: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read receipt file: {}", file.display()))?;

    let result = parse_receipt(&text);
    info!(
        merchant = %result.merchant,
        items = result.items.len(),
        confidence = %result.confidence,
        "receipt parsed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("🧾 {}", result.merchant);
    println!("   ─────────────────────────────────────────────");
    println!("   Date: {}", result.date.format("%Y-%m-%d"));
    println!("   Confidence: {}", result.confidence);
    println!();

    for item in &result.items {
        println!(
            "   {:<32} ${:>8.2}  [{}]",
            item.name, item.amount, item.category
        );
    }

    println!("   ─────────────────────────────────────────────");
    println!("   {:<32} ${:>8.2}", "Total", result.total);

    match result.confidence {
        Confidence::High => {}
        Confidence::Medium => {
            println!();
            println!("   ⚠️  No line items found; total taken from the receipt's total line.");
        }
        Confidence::Low => {
            println!();
            println!("   ❌ Could not extract anything useful. A placeholder expense was");
            println!("      generated; review and correct it before saving.");
        }
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_cmd_parse_reads_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "WALMART\nMilk 2.50\nTotal 2.50").unwrap();

        assert!(cmd_parse(tmp.path(), false).is_ok());
        assert!(cmd_parse(tmp.path(), true).is_ok());
    }

    #[test]
    fn test_cmd_parse_missing_file() {
        let err = cmd_parse(Path::new("/nonexistent/receipt.txt"), false).unwrap_err();
        assert!(err.to_string().contains("Failed to read receipt file"));
    }
}
