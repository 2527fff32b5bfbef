//! Wastage detection report command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use spendwell_core::{detect_wastage, read_expenses_csv, Severity};

pub fn cmd_wastage(file: &Path, json: bool, min_severity: Severity) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open expense file: {}", file.display()))?;
    let expenses = read_expenses_csv(reader)
        .with_context(|| format!("Failed to parse expense CSV: {}", file.display()))?;

    info!(expenses = expenses.len(), "loaded expense history");

    let alerts: Vec<_> = detect_wastage(&expenses)
        .into_iter()
        .filter(|a| a.severity.priority() >= min_severity.priority())
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    if alerts.is_empty() {
        println!("✅ No wasteful patterns found. Your spending looks good!");
        return Ok(());
    }

    println!();
    println!("⚠️  Wastage Report ({} expenses analyzed)", expenses.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in &alerts {
        let severity_icon = match alert.severity {
            Severity::High => "🔴",
            Severity::Medium => "🟡",
            Severity::Low => "🟢",
        };

        println!();
        println!("   {} {} ({})", severity_icon, alert.title, alert.severity);
        println!("      {}", alert.description);
        println!(
            "      {} purchases, ${:.2} this month, ${:.2}/year if it continues",
            alert.frequency, alert.monthly_impact, alert.yearly_impact
        );
        println!("      💡 {}", alert.suggestion);
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_csv() -> &'static str {
        "date,description,amount,category\n\
         2024-03-01,Starbucks Latte,6.50,dining\n\
         2024-03-04,Starbucks Latte,6.50,dining\n\
         2024-03-08,Starbucks Latte,6.50,dining\n"
    }

    #[test]
    fn test_cmd_wastage_report() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{}", sample_csv()).unwrap();

        assert!(cmd_wastage(tmp.path(), false, Severity::Low).is_ok());
        assert!(cmd_wastage(tmp.path(), true, Severity::Low).is_ok());
    }

    #[test]
    fn test_cmd_wastage_severity_filter_runs() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{}", sample_csv()).unwrap();

        assert!(cmd_wastage(tmp.path(), false, Severity::High).is_ok());
    }

    #[test]
    fn test_cmd_wastage_missing_file() {
        let err = cmd_wastage(Path::new("/nonexistent/expenses.csv"), false, Severity::Low)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open expense file"));
    }

    #[test]
    fn test_cmd_wastage_malformed_csv() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "date,description,amount,category\nnot-a-date,X,abc,\n").unwrap();

        assert!(cmd_wastage(tmp.path(), false, Severity::Low).is_err());
    }
}
