//! Load sales records from CSV or JSON files.
//!
//! This is the CLI caller's record source. CSV headers are matched
//! against candidate column names (dataset exports disagree on
//! capitalization), extra columns become named dimensions, and cell
//! dates are tried against several common formats.

use crate::dataset::schema::SalesRecord;
use crate::utils::config::{
    DATE_COLUMN_NAMES, DATE_FORMATS, PROFIT_COLUMN_NAMES, QUANTITY_COLUMN_NAMES,
};
use crate::utils::error::DatasetError;
use chrono::NaiveDate;
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Load records from a dataset file, dispatching on extension
///
/// **Public** - main entry point for dataset loading
///
/// # Arguments
/// * `path` - `.csv` or `.json` file
///
/// # Errors
/// * `DatasetError::UnsupportedFormat` - extension is neither csv nor json
/// * anything `load_csv` / `load_json` can raise
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>, DatasetError> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(DatasetError::UnsupportedFormat(other.to_string())),
    }
}

/// Load records from a CSV file
///
/// **Public** - usable directly when the extension is unreliable
///
/// # Column resolution
/// The date, quantity, and profit columns are located by candidate
/// name tables (`Order Date`/`date`, `Quantity`/`units`, ...); every
/// remaining column becomes a named dimension. Empty dimension cells
/// are skipped, so such records later bucket under the unknown label.
///
/// # Errors
/// * `DatasetError::MissingColumn` - a required column has no header match
/// * `DatasetError::InvalidDate` / `InvalidNumber` - unparseable cells,
///   reported with their 1-based row number (header is row 1)
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>, DatasetError> {
    let path = path.as_ref();
    info!("Loading CSV dataset: {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let date_idx = find_column(&headers, DATE_COLUMN_NAMES)
        .ok_or_else(|| missing_column(DATE_COLUMN_NAMES))?;
    let quantity_idx = find_column(&headers, QUANTITY_COLUMN_NAMES)
        .ok_or_else(|| missing_column(QUANTITY_COLUMN_NAMES))?;
    let profit_idx = find_column(&headers, PROFIT_COLUMN_NAMES)
        .ok_or_else(|| missing_column(PROFIT_COLUMN_NAMES))?;

    let mut records = Vec::new();

    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Header occupies row 1 of the file
        let row_number = i + 2;

        let date_cell = row.get(date_idx).unwrap_or_default();
        let date = parse_date_cell(date_cell).ok_or_else(|| DatasetError::InvalidDate {
            row: row_number,
            value: date_cell.to_string(),
        })?;

        let quantity = parse_number_cell(&row, quantity_idx, &headers, row_number)?;
        let profit = parse_number_cell(&row, profit_idx, &headers, row_number)?;

        let mut record = SalesRecord::new(date, quantity, profit);
        for (idx, header) in headers.iter().enumerate() {
            if idx == date_idx || idx == quantity_idx || idx == profit_idx {
                continue;
            }
            if let Some(value) = row.get(idx) {
                if !value.is_empty() {
                    record.dimensions.insert(header.clone(), value.to_string());
                }
            }
        }

        records.push(record);
    }

    info!("Loaded {} records from CSV", records.len());

    Ok(records)
}

/// Load records from a JSON file (array of record objects)
///
/// # Errors
/// * `DatasetError::Io` - file cannot be opened
/// * `DatasetError::Json` - malformed JSON or wrong shape
pub fn load_json(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>, DatasetError> {
    let path = path.as_ref();
    info!("Loading JSON dataset: {}", path.display());

    let file = File::open(path)?;
    let records: Vec<SalesRecord> = serde_json::from_reader(file)?;

    info!("Loaded {} records from JSON", records.len());

    Ok(records)
}

/// Locate the first header matching any candidate name
///
/// **Private** - case-sensitive match, candidates are tried in order
fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = headers.iter().position(|h| h == candidate) {
            debug!("Resolved column '{}' at index {}", candidate, idx);
            return Some(idx);
        }
    }
    None
}

fn missing_column(candidates: &[&str]) -> DatasetError {
    DatasetError::MissingColumn(candidates.join(" / "))
}

/// Parse a date cell, trying each supported format in order
///
/// **Private** - returns None when no format matches
fn parse_date_cell(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
}

/// Parse a numeric cell as f64
///
/// **Private** - reports the offending column and row on failure
fn parse_number_cell(
    row: &csv::StringRecord,
    idx: usize,
    headers: &[String],
    row_number: usize,
) -> Result<f64, DatasetError> {
    let cell = row.get(idx).unwrap_or_default();
    cell.trim()
        .parse::<f64>()
        .map_err(|_| DatasetError::InvalidNumber {
            row: row_number,
            column: headers
                .get(idx)
                .cloned()
                .unwrap_or_else(|| idx.to_string()),
            value: cell.to_string(),
        })
}
