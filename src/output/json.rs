//! JSON report output writer.
//!
//! Writes KPI and trend documents to JSON files with proper formatting.

use crate::dataset::schema::{KpiDocument, TrendDocument};
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - Serializable report document
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// Note: non-finite averages from an empty dataset serialize as JSON
/// null (serde_json's rendering of NaN).
pub fn write_document<T: Serialize>(
    document: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Render a report document as a pretty JSON string
///
/// **Public** - for library callers that keep the document in memory
/// instead of writing a file; the CLI commands print their own tables
/// and only serialize when `--output` is given
pub fn document_to_string<T: Serialize>(document: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document).map_err(OutputError::SerializationFailed)
}

/// Read a KPI document from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_kpi_document(input_path: impl AsRef<Path>) -> Result<KpiDocument, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading KPI document from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let document: KpiDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(document)
}

/// Read a trend document from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_trend_document(input_path: impl AsRef<Path>) -> Result<TrendDocument, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading trend document from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let document: TrendDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(document)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::schema::{KpiReport, TrendSeries};
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn create_test_document() -> KpiDocument {
        KpiDocument {
            version: "1.0.0".to_string(),
            source: "data.csv".to_string(),
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            kpis: KpiReport {
                total_sales: 42.0,
                sale_count: 3,
                avg_profit: 7.0,
                avg_sales: 14.0,
            },
        }
    }

    #[test]
    fn test_write_and_read_kpi_document() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_document(&document, path).unwrap();
        let loaded = read_kpi_document(path).unwrap();

        assert_eq!(loaded.version, document.version);
        assert_eq!(loaded.source, document.source);
        assert_eq!(loaded.kpis, document.kpis);
    }

    #[test]
    fn test_write_and_read_trend_document() {
        let series = TrendSeries {
            labels: vec!["2020-1".to_string(), "2020-2".to_string()],
            values: vec![5.0, 1.0],
            profits: vec![15.0, 7.0],
        };
        let document = TrendDocument::from_series(&series, "data.csv", "date", "month");
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_document(&document, path).unwrap();
        let loaded = read_trend_document(path).unwrap();

        assert_eq!(loaded.labels, document.labels);
        assert_eq!(loaded.dates, loaded.labels);
        assert_eq!(loaded.sales, loaded.values);
    }

    #[test]
    fn test_document_to_string_pretty() {
        let document = create_test_document();

        let json = document_to_string(&document).unwrap();

        assert!(json.contains("\"total_sales\": 42.0"));
        assert!(json.contains("\"sale_count\": 3"));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/kpis.json");

        let document = create_test_document();
        write_document(&document, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
