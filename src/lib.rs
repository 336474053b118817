//! Sales Trend Studio
//!
//! KPI summaries and grouped trend series for sales datasets.
//!
//! This crate provides the core implementation for the
//! `sales-trend` CLI tool: a pure in-memory aggregation engine
//! (`aggregator`) plus the dataset loading, filtering, and report
//! output around it.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install sales-trend-studio
//! sales-trend --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod dataset;
pub mod output;
pub mod utils;
