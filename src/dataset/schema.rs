//! Record and report schema definitions.
//!
//! This module defines the in-memory record shape consumed by the
//! aggregation core and the JSON documents we write to disk.
//! The document schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single sales record
///
/// **Public** - the input type of both aggregation entry points.
///
/// Records are immutable from the core's point of view: every
/// aggregation takes `&[SalesRecord]` and never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date of the sale (day resolution)
    pub date: chrono::NaiveDate,

    /// Units sold, may be fractional, sign unconstrained
    pub quantity: f64,

    /// Signed profit amount
    pub profit: f64,

    /// Arbitrary named category dimensions (region, vendor, product, ...)
    /// addressable by name for grouping and filtering
    #[serde(flatten)]
    pub dimensions: BTreeMap<String, String>,
}

impl SalesRecord {
    /// Create a record with no extra dimensions
    ///
    /// **Public** - constructor
    pub fn new(date: chrono::NaiveDate, quantity: f64, profit: f64) -> Self {
        Self {
            date,
            quantity,
            profit,
            dimensions: BTreeMap::new(),
        }
    }

    /// Attach a named dimension (builder style)
    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.insert(name.into(), value.into());
        self
    }

    /// Look up a named dimension
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }

    /// Resolve a field by name, built-ins first, then dimensions.
    ///
    /// Built-in fields render to their string representation: the date
    /// as ISO 8601, numbers via their shortest display form.
    pub fn field_value(&self, name: &str) -> Option<String> {
        match name {
            "date" => Some(self.date.to_string()),
            "quantity" => Some(self.quantity.to_string()),
            "profit" => Some(self.profit.to_string()),
            _ => self.dimension(name).map(str::to_string),
        }
    }

    /// Whether `name` refers to a built-in record field
    pub fn is_builtin_field(name: &str) -> bool {
        matches!(name, "date" | "quantity" | "profit")
    }
}

/// Business KPIs reduced from a record collection
///
/// **Public** - returned from `aggregator::kpi::summarize`
///
/// Constructed fresh per call; pure function of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    /// Sum of `quantity * profit` over all records.
    /// A revenue-proxy metric, not quantity times price - the dataset
    /// models no price field and the formula is contractual.
    pub total_sales: f64,

    /// Number of records, duplicates included
    pub sale_count: usize,

    /// Sum of profit divided by `sale_count` (NaN when empty)
    pub avg_profit: f64,

    /// `total_sales` divided by `sale_count` (NaN when empty)
    pub avg_sales: f64,
}

impl KpiReport {
    /// True when the report was computed over zero records.
    ///
    /// Callers must check this before trusting the averages: with no
    /// records both averages are the NaN division sentinel.
    pub fn is_empty(&self) -> bool {
        self.sale_count == 0
    }
}

/// Key-aligned trend series for charting
///
/// **Public** - returned from `aggregator::trend::build_trend`
///
/// All three sequences have identical length; index `i` in each refers
/// to the same bucket. `dates()` and `sales()` are the documented
/// aliases of `labels` and `values` - older chart consumers use either
/// naming convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Sorted bucket keys
    pub labels: Vec<String>,

    /// Summed quantity per bucket
    pub values: Vec<f64>,

    /// Summed profit per bucket
    pub profits: Vec<f64>,
}

impl TrendSeries {
    /// Number of buckets
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the series holds no buckets
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Alias of `labels` for consumers that chart against dates
    pub fn dates(&self) -> &[String] {
        &self.labels
    }

    /// Alias of `values` for consumers that chart sales
    pub fn sales(&self) -> &[f64] {
        &self.values
    }
}

/// KPI document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dataset the report was computed from
    pub source: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// The computed KPIs
    pub kpis: KpiReport,
}

/// Trend document written to JSON
///
/// Carries both naming conventions physically: `dates` duplicates
/// `labels` and `sales` duplicates `values`, so either set of keys a
/// chart consumer looks for resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dataset the series was computed from
    pub source: String,

    /// Timestamp when the series was generated (RFC 3339)
    pub generated_at: String,

    /// Field the buckets were grouped by
    pub group_by: String,

    /// Granularity name the buckets were derived with
    pub granularity: String,

    /// Alias of `labels`
    pub dates: Vec<String>,

    /// Sorted bucket keys
    pub labels: Vec<String>,

    /// Summed quantity per bucket
    pub values: Vec<f64>,

    /// Summed profit per bucket
    pub profits: Vec<f64>,

    /// Alias of `values`
    pub sales: Vec<f64>,
}

impl TrendDocument {
    /// Build a document from a computed series plus report metadata
    ///
    /// **Public** - used by the trend command before writing JSON
    pub fn from_series(
        series: &TrendSeries,
        source: impl Into<String>,
        group_by: impl Into<String>,
        granularity: impl Into<String>,
    ) -> Self {
        Self {
            version: crate::utils::config::SCHEMA_VERSION.to_string(),
            source: source.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            group_by: group_by.into(),
            granularity: granularity.into(),
            dates: series.labels.clone(),
            labels: series.labels.clone(),
            values: series.values.clone(),
            profits: series.profits.clone(),
            sales: series.values.clone(),
        }
    }
}

impl KpiDocument {
    /// Build a document from a computed report plus metadata
    pub fn from_report(kpis: KpiReport, source: impl Into<String>) -> Self {
        Self {
            version: crate::utils::config::SCHEMA_VERSION.to_string(),
            source: source.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            kpis,
        }
    }
}
