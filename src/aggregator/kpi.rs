//! Reduce a record collection to summary business KPIs.
//!
//! The four metrics are the ones the dashboard cards display:
//! total sales (a quantity-weighted profit sum), sale count, and the
//! two per-sale averages.

use crate::dataset::schema::{KpiReport, SalesRecord};
use crate::utils::error::AggregateError;
use log::debug;

/// Summarize a record collection into KPIs
///
/// **Public** - main entry point for KPI calculation
///
/// # Arguments
/// * `records` - Records to reduce; never mutated
///
/// # Returns
/// A fresh `KpiReport`; pure function of the input
///
/// # Empty input
/// With zero records `sale_count` is 0 and both averages are IEEE-754
/// NaN from the unguarded division. Callers that cannot tolerate the
/// sentinel should use [`summarize_strict`] instead. Check
/// `KpiReport::is_empty()` before trusting the averages.
///
/// Summation runs in input order, so results are bit-reproducible
/// across runs on the same input.
pub fn summarize(records: &[SalesRecord]) -> KpiReport {
    debug!("Summarizing KPIs over {} records", records.len());

    let total_sales: f64 = records.iter().map(|r| r.quantity * r.profit).sum();
    let profit_sum: f64 = records.iter().map(|r| r.profit).sum();
    let sale_count = records.len();

    KpiReport {
        total_sales,
        sale_count,
        avg_profit: profit_sum / sale_count as f64,
        avg_sales: total_sales / sale_count as f64,
    }
}

/// Summarize with the fail-fast empty-input policy
///
/// **Public** - alternative entry point for callers that prefer an
/// explicit error over NaN averages
///
/// # Errors
/// * `AggregateError::EmptyInput` - the record collection holds no records
pub fn summarize_strict(records: &[SalesRecord]) -> Result<KpiReport, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    Ok(summarize(records))
}
