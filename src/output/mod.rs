//! Output writers for report documents.
//!
//! This module handles writing computed reports to disk as
//! pretty-printed JSON, and reading them back for validation.

pub mod json;

// Re-export main functions
pub use json::{document_to_string, read_kpi_document, read_trend_document, write_document};
