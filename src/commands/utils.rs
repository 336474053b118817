use crate::dataset::filter::RecordFilter;
use crate::dataset::loader::load_records;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use chrono::Datelike;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Build a record filter from CLI-level month and field=value expressions
pub fn build_filter(month: Option<&str>, filters: &[String]) -> Result<RecordFilter> {
    let mut filter = RecordFilter::default();

    if let Some(month) = month {
        filter = filter
            .with_month(month)
            .with_context(|| format!("Invalid --month value '{}'", month))?;
    }

    for expr in filters {
        filter = filter
            .with_dimension_expr(expr)
            .with_context(|| format!("Invalid --filter value '{}'", expr))?;
    }

    Ok(filter)
}

/// Validate that an input path looks loadable
pub fn validate_input_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension != "csv" && extension != "json" {
        anyhow::bail!(
            "Unsupported input format '{}' (expected .csv or .json)",
            path.display()
        );
    }

    Ok(())
}

/// Inspect a dataset file and print its shape
pub fn inspect_dataset(file_path: PathBuf) -> Result<()> {
    println!("Inspecting dataset: {}", file_path.display());

    let records = load_records(&file_path)
        .with_context(|| format!("Failed to load dataset {}", file_path.display()))?;

    println!("✓ Valid dataset");
    println!("  Schema: v{}", SCHEMA_VERSION);
    println!("  Records: {}", records.len());

    if let (Some(first), Some(last)) = (
        records.iter().map(|r| r.date).min(),
        records.iter().map(|r| r.date).max(),
    ) {
        println!("  Date span: {} to {}", first, last);
        let months: BTreeSet<(i32, u32)> = records
            .iter()
            .map(|r| (r.date.year(), r.date.month()))
            .collect();
        println!("  Distinct months: {}", months.len());
    }

    let dimensions: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.dimensions.keys().map(String::as_str))
        .collect();

    if dimensions.is_empty() {
        println!("  Dimensions: (none)");
    } else {
        println!(
            "  Dimensions: {}",
            dimensions.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let filter = build_filter(None, &[]).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_filter_month_and_dimensions() {
        let filters = vec!["Region=West".to_string(), "Customer Name=Acme".to_string()];
        let filter = build_filter(Some("2020-03"), &filters).unwrap();

        assert_eq!(filter.month, Some((2020, 3)));
        assert_eq!(filter.dimensions.len(), 2);
    }

    #[test]
    fn test_build_filter_bad_month() {
        assert!(build_filter(Some("March"), &[]).is_err());
    }

    #[test]
    fn test_validate_input_path() {
        assert!(validate_input_path(Path::new("data.csv")).is_ok());
        assert!(validate_input_path(Path::new("data.JSON")).is_ok());
        assert!(validate_input_path(Path::new("data.txt")).is_err());
        assert!(validate_input_path(Path::new("")).is_err());
    }
}
