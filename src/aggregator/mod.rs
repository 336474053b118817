//! Aggregation of sales records into KPIs and trend series.
//!
//! This module transforms record collections into:
//! - Summary KPIs (total sales, sale count, averages)
//! - Grouped trend series (key-aligned sequences for charting)

pub mod kpi;
pub mod trend;

// Re-export main types and functions
pub use kpi::{summarize, summarize_strict};
pub use trend::{build_trend, month_key, DateGranularity, LabelSort, TrendConfig};
