//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod kpis;
pub mod trend;
pub mod utils;

// Re-export main command functions
pub use kpis::{execute_kpis, KpisArgs};
pub use trend::{execute_trend, TrendArgs};
pub use utils::inspect_dataset;
