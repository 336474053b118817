//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default field used to derive grouping keys
pub const DEFAULT_GROUP_FIELD: &str = "date";

/// Bucket label for records whose group field carries no value.
/// Such records still form one bucket of their own, they are never dropped.
pub const UNKNOWN_GROUP_LABEL: &str = "(unknown)";

// Column names for CSV parsing (different dataset exports use different headers)
pub const DATE_COLUMN_NAMES: &[&str] = &["Order Date", "order_date", "Date", "date"];
pub const QUANTITY_COLUMN_NAMES: &[&str] = &["Quantity", "quantity", "Units Sold", "units"];
pub const PROFIT_COLUMN_NAMES: &[&str] = &["Profit", "profit"];

/// Date formats attempted in order when parsing CSV date cells
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];
