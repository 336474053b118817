//! Trend command implementation.
//!
//! The trend command:
//! 1. Loads records from the dataset file
//! 2. Applies the requested filters
//! 3. Builds the grouped trend series
//! 4. Prints the buckets and optionally writes a JSON document

use crate::aggregator::{build_trend, DateGranularity, LabelSort, TrendConfig};
use crate::commands::utils::{build_filter, validate_input_path};
use crate::dataset::loader::load_records;
use crate::dataset::schema::{TrendDocument, TrendSeries};
use crate::output::write_document;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the trend command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TrendArgs {
    /// Dataset file (.csv or .json)
    pub input: PathBuf,

    /// Field supplying the grouping key for non-month granularity
    pub group_by: String,

    /// Granularity name; "month" buckets by calendar month,
    /// anything else groups by the raw field value
    pub granularity: String,

    /// Sort month labels chronologically instead of lexicographically
    pub chronological: bool,

    /// Optional month filter (YYYY-MM)
    pub month: Option<String>,

    /// Dimension filters as field=value expressions
    pub filters: Vec<String>,

    /// Output path for the JSON document (optional)
    pub output: Option<PathBuf>,
}

impl Default for TrendArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            group_by: crate::utils::config::DEFAULT_GROUP_FIELD.to_string(),
            granularity: "month".to_string(),
            chronological: false,
            month: None,
            filters: Vec::new(),
            output: None,
        }
    }
}

impl TrendArgs {
    /// Derive the core trend configuration from CLI arguments
    pub fn to_config(&self) -> TrendConfig {
        TrendConfig {
            group_by: self.group_by.clone(),
            granularity: DateGranularity::from_name(&self.granularity),
            sort: if self.chronological {
                LabelSort::Chronological
            } else {
                LabelSort::Lexicographic
            },
        }
    }
}

/// Execute the trend command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Dataset load failures
/// * Malformed filter expressions
/// * Group field absent from every record
/// * File write errors
pub fn execute_trend(args: TrendArgs) -> Result<()> {
    info!("Building trend for: {}", args.input.display());

    // Step 1: Load the dataset
    info!("Step 1/3: Loading dataset...");
    let records = load_records(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    // Step 2: Filter and aggregate
    info!("Step 2/3: Bucketing {} records...", records.len());
    let filter = build_filter(args.month.as_deref(), &args.filters)?;
    let records = filter.apply(&records);

    let config = args.to_config();
    let series = build_trend(&records, &config)
        .with_context(|| format!("Failed to build trend grouped by '{}'", args.group_by))?;

    debug!("Trend series holds {} buckets", series.len());

    // Step 3: Output
    info!("Step 3/3: Writing output...");
    print_trend_summary(&series);

    if let Some(output) = &args.output {
        let document = TrendDocument::from_series(
            &series,
            args.input.display().to_string(),
            &args.group_by,
            config.granularity.name(),
        );
        write_document(&document, output).context("Failed to write trend JSON")?;
        info!("✓ Trend report written to: {}", output.display());
    }

    Ok(())
}

/// Validate trend arguments
///
/// **Public** - can be called before execute_trend for early validation
pub fn validate_args(args: &TrendArgs) -> Result<()> {
    validate_input_path(&args.input)?;

    if args.group_by.is_empty() {
        anyhow::bail!("group-by field cannot be empty");
    }

    for expr in &args.filters {
        if !expr.contains('=') {
            anyhow::bail!("Filter '{}' is not of the form field=value", expr);
        }
    }

    Ok(())
}

/// Print the trend buckets to stdout
///
/// **Private** - one row per bucket, label / quantity / profit
fn print_trend_summary(series: &TrendSeries) {
    println!("{}", "=".repeat(60));
    println!("{:<30} {:>12} {:>12}", "BUCKET", "QUANTITY", "PROFIT");
    println!("{}", "=".repeat(60));
    for i in 0..series.len() {
        println!(
            "{:<30} {:>12.2} {:>12.2}",
            series.labels[i], series.values[i], series.profits[i]
        );
    }
    if series.is_empty() {
        println!("(no records matched)");
    }
    println!("{}", "=".repeat(60));
}
