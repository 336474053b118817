//! Dataset schema, loading, and filtering.
//!
//! This module handles:
//! - Defining the record and report schema
//! - Reading records from CSV/JSON files
//! - Narrowing records before aggregation

pub mod filter;
pub mod loader;
pub mod schema;

// Re-export main types
pub use filter::RecordFilter;
pub use loader::{load_csv, load_json, load_records};
pub use schema::{KpiDocument, KpiReport, SalesRecord, TrendDocument, TrendSeries};
