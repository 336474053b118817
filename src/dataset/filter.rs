//! Pre-aggregation record filtering.
//!
//! Filtering is the caller layer's job: records are narrowed by an
//! optional calendar month and any number of exact-match dimension
//! filters before the aggregation core sees them.

use crate::dataset::schema::SalesRecord;
use crate::utils::error::FilterError;
use chrono::Datelike;
use log::debug;

/// Record filter applied before aggregation
///
/// **Public** - built from CLI arguments or by library callers
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Restrict to records whose date falls in this (year, month)
    pub month: Option<(i32, u32)>,

    /// Exact-match constraints on named dimensions, all must hold
    pub dimensions: Vec<(String, String)>,
}

impl RecordFilter {
    /// True when the filter constrains nothing
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.dimensions.is_empty()
    }

    /// Add a month constraint from a "YYYY-MM" string
    ///
    /// # Errors
    /// * `FilterError::InvalidMonth` - the string does not parse
    pub fn with_month(mut self, month: &str) -> Result<Self, FilterError> {
        self.month = Some(parse_month(month)?);
        Ok(self)
    }

    /// Add an exact-match dimension constraint from a "field=value" string
    ///
    /// # Errors
    /// * `FilterError::InvalidDimension` - no '=' or empty field name
    pub fn with_dimension_expr(mut self, expr: &str) -> Result<Self, FilterError> {
        let (field, value) = expr
            .split_once('=')
            .ok_or_else(|| FilterError::InvalidDimension(expr.to_string()))?;
        if field.is_empty() {
            return Err(FilterError::InvalidDimension(expr.to_string()));
        }
        self.dimensions
            .push((field.to_string(), value.to_string()));
        Ok(self)
    }

    /// Whether a record passes every constraint
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some((year, month)) = self.month {
            if record.date.year() != year || record.date.month() != month {
                return false;
            }
        }

        self.dimensions
            .iter()
            .all(|(field, value)| record.dimension(field) == Some(value.as_str()))
    }

    /// Narrow a record collection to the matching subset
    ///
    /// **Public** - returns owned records so the result feeds straight
    /// into the aggregation entry points
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        if self.is_empty() {
            return records.to_vec();
        }

        let kept: Vec<SalesRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        debug!("Filter kept {} of {} records", kept.len(), records.len());

        kept
    }
}

/// Parse a "YYYY-MM" month expression
///
/// **Private** - accepts both zero-padded ("2020-01") and bare
/// ("2020-1") month digits
fn parse_month(expr: &str) -> Result<(i32, u32), FilterError> {
    let invalid = || FilterError::InvalidMonth(expr.to_string());

    let (year, month) = expr.split_once('-').ok_or_else(|| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok((year, month))
}
