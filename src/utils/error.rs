//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a dataset from disk
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required column not found: {0}")]
    MissingColumn(String),

    #[error("Row {row}: unparseable date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: column '{column}' holds non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Empty record set (strict empty-input policy)")]
    EmptyInput,

    #[error("Group field '{0}' is absent from every record")]
    MissingField(String),
}

/// Errors that can occur while building a record filter
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid month filter '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid dimension filter '{0}', expected field=value")]
    InvalidDimension(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
