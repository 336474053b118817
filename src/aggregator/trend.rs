//! Bucket records by a derived key and emit key-aligned trend series.
//!
//! Buckets are keyed either by calendar month ("<year>-<month>", month
//! 1-indexed with no leading zero, e.g. "2020-1") or by the raw value
//! of a named record field. Output sequences are parallel: index `i`
//! in `labels`, `values`, and `profits` refers to the same bucket.

use crate::dataset::schema::{SalesRecord, TrendSeries};
use crate::utils::config::{DEFAULT_GROUP_FIELD, UNKNOWN_GROUP_LABEL};
use crate::utils::error::AggregateError;
use chrono::Datelike;
use log::debug;
use std::cmp::Ordering;
use std::collections::HashMap;

/// How grouping keys are derived from a record
///
/// **Public** - part of `TrendConfig`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGranularity {
    /// Group by calendar month of the record date
    Month,

    /// Group by the raw value of the configured field
    Raw,
}

impl DateGranularity {
    /// Map a caller-supplied granularity name.
    ///
    /// The literal "month" selects month bucketing; any other name
    /// falls through to raw field grouping. This mirrors the lenient
    /// contract chart callers rely on.
    pub fn from_name(name: &str) -> Self {
        if name == "month" {
            DateGranularity::Month
        } else {
            DateGranularity::Raw
        }
    }

    /// Canonical name for report metadata
    pub fn name(&self) -> &'static str {
        match self {
            DateGranularity::Month => "month",
            DateGranularity::Raw => "raw",
        }
    }
}

/// Ordering applied to bucket labels
///
/// Lexicographic is the compatibility default: month keys carry no
/// zero padding, so "2020-10" sorts before "2020-2" and multi-year
/// spans interleave. Chronological is the documented opt-in that
/// orders month keys by (year, month) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSort {
    /// Plain string sort of the key representation (default)
    Lexicographic,

    /// Numeric (year, month) sort for parseable month keys,
    /// string sort as fallback for anything else
    Chronological,
}

/// Configuration for trend building
///
/// **Public** - constructed by the caller (CLI or library user)
#[derive(Debug, Clone)]
pub struct TrendConfig {
    /// Field supplying the grouping key when granularity is raw
    pub group_by: String,

    /// Key derivation mode
    pub granularity: DateGranularity,

    /// Label ordering policy
    pub sort: LabelSort,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            group_by: DEFAULT_GROUP_FIELD.to_string(),
            granularity: DateGranularity::Month,
            sort: LabelSort::Lexicographic,
        }
    }
}

/// Build a grouped trend series from records
///
/// **Public** - main entry point for trend building
///
/// # Arguments
/// * `records` - Records to bucket; never mutated
/// * `config` - Grouping key derivation and sort policy
///
/// # Returns
/// A `TrendSeries` whose three sequences are index-aligned and of
/// equal length (one slot per distinct key). Empty input yields an
/// empty series, not an error. Pure function: identical input and
/// config produce identical output.
///
/// # Errors
/// * `AggregateError::MissingField` - raw grouping was requested on a
///   field that is a built-in of no record and a dimension of none
///
/// # Algorithm
/// 1. Single pass accumulating (quantity, profit) per derived key,
///    `(0, 0)` on first encounter
/// 2. Sort distinct keys per the configured label ordering
/// 3. Emit per-key sums in label order
pub fn build_trend(
    records: &[SalesRecord],
    config: &TrendConfig,
) -> Result<TrendSeries, AggregateError> {
    debug!(
        "Building trend over {} records (group_by={}, granularity={})",
        records.len(),
        config.group_by,
        config.granularity.name()
    );

    if records.is_empty() {
        return Ok(TrendSeries::default());
    }

    // A field absent from every record is a caller mistake, distinct
    // from a field merely missing on some records (tolerated below).
    if config.granularity == DateGranularity::Raw
        && !SalesRecord::is_builtin_field(&config.group_by)
        && records.iter().all(|r| r.dimension(&config.group_by).is_none())
    {
        return Err(AggregateError::MissingField(config.group_by.clone()));
    }

    // Map to accumulate buckets: key -> (summed quantity, summed profit)
    let mut buckets: HashMap<String, (f64, f64)> = HashMap::new();

    for record in records {
        let key = match config.granularity {
            DateGranularity::Month => month_key(record.date),
            DateGranularity::Raw => record
                .field_value(&config.group_by)
                .unwrap_or_else(|| UNKNOWN_GROUP_LABEL.to_string()),
        };

        let entry = buckets.entry(key).or_insert((0.0, 0.0));
        entry.0 += record.quantity;
        entry.1 += record.profit;
    }

    let mut labels: Vec<String> = buckets.keys().cloned().collect();
    match config.sort {
        LabelSort::Lexicographic => labels.sort(),
        LabelSort::Chronological => labels.sort_by(|a, b| chronological_cmp(a, b)),
    }

    let values: Vec<f64> = labels.iter().map(|l| buckets[l].0).collect();
    let profits: Vec<f64> = labels.iter().map(|l| buckets[l].1).collect();

    debug!("Built {} trend buckets", labels.len());

    Ok(TrendSeries {
        labels,
        values,
        profits,
    })
}

/// Derive the month bucket key for a date
///
/// **Public** - key format is contractual: 4-digit year, dash,
/// 1-indexed month with no leading zero
pub fn month_key(date: chrono::NaiveDate) -> String {
    format!("{}-{}", date.year(), date.month())
}

/// Compare two labels for the chronological sort policy.
///
/// **Private** - must be a total order for `sort_by`: every parseable
/// month key orders numerically and precedes every non-month label;
/// non-month labels order lexicographically among themselves. Mixing
/// the two comparisons per pair would admit cycles.
fn chronological_cmp(a: &str, b: &str) -> Ordering {
    match (parse_month_key(a), parse_month_key(b)) {
        (Some(ka), Some(kb)) => ka.cmp(&kb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Parse a "<year>-<month>" key into its numeric pair
///
/// **Private** - returns None for non-month labels
fn parse_month_key(label: &str) -> Option<(i32, u32)> {
    let (year, month) = label.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(y: i32, m: u32, d: u32, quantity: f64, profit: f64) -> SalesRecord {
        SalesRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), quantity, profit)
    }

    #[test]
    fn test_month_key_no_padding() {
        assert_eq!(month_key(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()), "2020-1");
        assert_eq!(month_key(NaiveDate::from_ymd_opt(2020, 10, 1).unwrap()), "2020-10");
    }

    #[test]
    fn test_build_trend_monthly_grouping() {
        let records = vec![
            record(2020, 1, 15, 2.0, 10.0),
            record(2020, 1, 20, 3.0, 5.0),
            record(2020, 2, 1, 1.0, 7.0),
        ];

        let series = build_trend(&records, &TrendConfig::default()).unwrap();

        assert_eq!(series.labels, vec!["2020-1", "2020-2"]);
        assert_eq!(series.values, vec![5.0, 1.0]);
        assert_eq!(series.profits, vec![15.0, 7.0]);
    }

    #[test]
    fn test_build_trend_lexicographic_month_order() {
        // No zero padding in month keys: "2020-10" precedes "2020-2"
        // under the default string sort.
        let records = vec![
            record(2020, 10, 1, 1.0, 1.0),
            record(2020, 2, 1, 2.0, 2.0),
        ];

        let series = build_trend(&records, &TrendConfig::default()).unwrap();

        assert_eq!(series.labels, vec!["2020-10", "2020-2"]);
        assert_eq!(series.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_build_trend_chronological_month_order() {
        let records = vec![
            record(2020, 10, 1, 1.0, 1.0),
            record(2020, 2, 1, 2.0, 2.0),
        ];
        let config = TrendConfig {
            sort: LabelSort::Chronological,
            ..TrendConfig::default()
        };

        let series = build_trend(&records, &config).unwrap();

        assert_eq!(series.labels, vec!["2020-2", "2020-10"]);
        assert_eq!(series.values, vec![2.0, 1.0]);
    }

    #[test]
    fn test_chronological_sort_with_mixed_labels() {
        // Raw grouping can yield labels that happen to look like month
        // keys next to ones that do not. All month-like keys must form
        // one numeric run ahead of the string-sorted rest; comparing
        // each pair independently would not be a total order.
        let records = vec![
            record(2020, 1, 1, 1.0, 1.0).with_dimension("Batch", "10-1"),
            record(2020, 1, 2, 2.0, 2.0).with_dimension("Batch", "1z"),
            record(2020, 1, 3, 3.0, 3.0).with_dimension("Batch", "9-1"),
            record(2020, 1, 4, 4.0, 4.0).with_dimension("Batch", "alpha"),
        ];
        let config = TrendConfig {
            group_by: "Batch".to_string(),
            granularity: DateGranularity::Raw,
            sort: LabelSort::Chronological,
        };

        let series = build_trend(&records, &config).unwrap();

        assert_eq!(series.labels, vec!["9-1", "10-1", "1z", "alpha"]);
        assert_eq!(series.values, vec![3.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_chronological_cmp_is_transitive_across_kinds() {
        // The hand-picked triple that would cycle under a pairwise
        // numeric-or-string comparison.
        assert_eq!(chronological_cmp("9-1", "10-1"), Ordering::Less);
        assert_eq!(chronological_cmp("10-1", "1z"), Ordering::Less);
        assert_eq!(chronological_cmp("9-1", "1z"), Ordering::Less);
        assert_eq!(chronological_cmp("1z", "9-1"), Ordering::Greater);
    }

    #[test]
    fn test_build_trend_raw_field_grouping() {
        let records = vec![
            record(2020, 1, 1, 1.0, 2.0).with_dimension("Region", "West"),
            record(2020, 2, 1, 3.0, 4.0).with_dimension("Region", "East"),
            record(2020, 3, 1, 5.0, 6.0).with_dimension("Region", "West"),
        ];
        let config = TrendConfig {
            group_by: "Region".to_string(),
            granularity: DateGranularity::from_name("field"),
            sort: LabelSort::Lexicographic,
        };

        let series = build_trend(&records, &config).unwrap();

        assert_eq!(series.labels, vec!["East", "West"]);
        assert_eq!(series.values, vec![3.0, 6.0]);
        assert_eq!(series.profits, vec![4.0, 8.0]);
    }

    #[test]
    fn test_build_trend_missing_dimension_buckets_as_unknown() {
        let records = vec![
            record(2020, 1, 1, 1.0, 2.0).with_dimension("Region", "West"),
            record(2020, 2, 1, 3.0, 4.0),
        ];
        let config = TrendConfig {
            group_by: "Region".to_string(),
            granularity: DateGranularity::Raw,
            sort: LabelSort::Lexicographic,
        };

        let series = build_trend(&records, &config).unwrap();

        assert_eq!(series.labels, vec![UNKNOWN_GROUP_LABEL, "West"]);
        assert_eq!(series.values, vec![3.0, 1.0]);
    }

    #[test]
    fn test_build_trend_field_absent_everywhere_fails() {
        let records = vec![record(2020, 1, 1, 1.0, 2.0)];
        let config = TrendConfig {
            group_by: "Vendor".to_string(),
            granularity: DateGranularity::Raw,
            sort: LabelSort::Lexicographic,
        };

        let result = build_trend(&records, &config);

        assert!(matches!(result, Err(AggregateError::MissingField(f)) if f == "Vendor"));
    }

    #[test]
    fn test_build_trend_empty_input() {
        let series = build_trend(&[], &TrendConfig::default()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert!(series.values.is_empty());
        assert!(series.profits.is_empty());
    }

    #[test]
    fn test_build_trend_is_idempotent() {
        let records = vec![
            record(2019, 12, 31, 2.0, 3.0),
            record(2020, 1, 1, 4.0, 5.0),
        ];
        let config = TrendConfig::default();

        let first = build_trend(&records, &config).unwrap();
        let second = build_trend(&records, &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_trend_sequences_stay_parallel() {
        let records = vec![
            record(2020, 1, 1, 1.0, 1.0),
            record(2021, 5, 1, 2.0, 2.0),
            record(2022, 9, 1, 3.0, 3.0),
        ];

        let series = build_trend(&records, &TrendConfig::default()).unwrap();

        assert_eq!(series.labels.len(), series.values.len());
        assert_eq!(series.labels.len(), series.profits.len());
        assert_eq!(series.dates(), &series.labels[..]);
        assert_eq!(series.sales(), &series.values[..]);
    }

    #[test]
    fn test_granularity_from_name() {
        assert_eq!(DateGranularity::from_name("month"), DateGranularity::Month);
        assert_eq!(DateGranularity::from_name("week"), DateGranularity::Raw);
        assert_eq!(DateGranularity::from_name(""), DateGranularity::Raw);
    }

    #[test]
    fn test_parse_month_key() {
        assert_eq!(parse_month_key("2020-1"), Some((2020, 1)));
        assert_eq!(parse_month_key("2020-10"), Some((2020, 10)));
        assert_eq!(parse_month_key("2020-13"), None);
        assert_eq!(parse_month_key("West"), None);
    }
}
