//! KPI command implementation.
//!
//! The kpis command:
//! 1. Loads records from the dataset file
//! 2. Applies the requested filters
//! 3. Summarizes the KPIs
//! 4. Prints the summary and optionally writes a JSON document

use crate::aggregator::{summarize, summarize_strict};
use crate::commands::utils::{build_filter, validate_input_path};
use crate::dataset::loader::load_records;
use crate::dataset::schema::{KpiDocument, KpiReport};
use crate::output::write_document;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the kpis command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct KpisArgs {
    /// Dataset file (.csv or .json)
    pub input: PathBuf,

    /// Optional month filter (YYYY-MM)
    pub month: Option<String>,

    /// Dimension filters as field=value expressions
    pub filters: Vec<String>,

    /// Output path for the JSON document (optional)
    pub output: Option<PathBuf>,

    /// Fail instead of reporting NaN averages when no records remain
    pub strict_empty: bool,
}

impl Default for KpisArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            month: None,
            filters: Vec::new(),
            output: None,
            strict_empty: false,
        }
    }
}

/// Execute the kpis command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Dataset load failures
/// * Malformed filter expressions
/// * Empty input under `--strict-empty`
/// * File write errors
pub fn execute_kpis(args: KpisArgs) -> Result<()> {
    info!("Computing KPIs for: {}", args.input.display());

    // Step 1: Load the dataset
    info!("Step 1/3: Loading dataset...");
    let records = load_records(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    // Step 2: Filter and summarize
    info!("Step 2/3: Summarizing {} records...", records.len());
    let filter = build_filter(args.month.as_deref(), &args.filters)?;
    let records = filter.apply(&records);

    let report = if args.strict_empty {
        summarize_strict(&records).context("No records remain after filtering")?
    } else {
        summarize(&records)
    };

    debug!(
        "KPIs: total_sales={}, sale_count={}",
        report.total_sales, report.sale_count
    );

    // Step 3: Output
    info!("Step 3/3: Writing output...");
    print_kpi_summary(&report);

    if let Some(output) = &args.output {
        let document = KpiDocument::from_report(report, args.input.display().to_string());
        write_document(&document, output).context("Failed to write KPI JSON")?;
        info!("✓ KPI report written to: {}", output.display());
    }

    Ok(())
}

/// Validate kpis arguments
///
/// **Public** - can be called before execute_kpis for early validation
pub fn validate_args(args: &KpisArgs) -> Result<()> {
    validate_input_path(&args.input)?;

    for expr in &args.filters {
        if !expr.contains('=') {
            anyhow::bail!("Filter '{}' is not of the form field=value", expr);
        }
    }

    Ok(())
}

/// Print the KPI cards to stdout
///
/// **Private** - mirrors the four dashboard KPI cards
fn print_kpi_summary(report: &KpiReport) {
    println!("{}", "=".repeat(60));
    println!("KPI SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Total Sales:  {:.2}", report.total_sales);
    println!("Sale Count:   {}", report.sale_count);
    println!("Avg Profit:   {:.2}", report.avg_profit);
    println!("Avg Sales:    {:.2}", report.avg_sales);
    if report.is_empty() {
        println!("(no records matched - averages are undefined)");
    }
    println!("{}", "=".repeat(60));
}
