//! Sales Trend Studio CLI
//!
//! Computes dashboard KPIs and grouped trend series from a sales
//! dataset on disk, with optional month and dimension filtering.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sales_trend_studio::commands::kpis::{self, KpisArgs};
use sales_trend_studio::commands::trend::{self, TrendArgs};
use sales_trend_studio::commands::utils::inspect_dataset;
use sales_trend_studio::utils::config::SCHEMA_VERSION;

/// Sales Trend Studio - KPIs and trend series for sales datasets
#[derive(Parser, Debug)]
#[command(name = "sales-trend")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a dataset into the four dashboard KPIs
    Kpis {
        /// Dataset file (.csv or .json)
        #[arg(short, long, default_value = "data.csv")]
        input: PathBuf,

        /// Restrict to one calendar month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Dimension filter, field=value (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on an empty record set instead of reporting NaN averages
        #[arg(long)]
        strict_empty: bool,
    },

    /// Build a grouped trend series from a dataset
    Trend {
        /// Dataset file (.csv or .json)
        #[arg(short, long, default_value = "data.csv")]
        input: PathBuf,

        /// Field to group by when granularity is not "month"
        #[arg(short, long, default_value = "date")]
        group_by: String,

        /// Grouping granularity: "month" buckets by calendar month,
        /// any other value groups by the raw field value
        #[arg(long, default_value = "month")]
        granularity: String,

        /// Sort month buckets chronologically instead of the default
        /// lexicographic label order
        #[arg(long)]
        chronological: bool,

        /// Restrict to one calendar month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// Dimension filter, field=value (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect a dataset file (record count, date span, dimensions)
    Inspect {
        /// Path to dataset file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Kpis {
            input,
            month,
            filter,
            output,
            strict_empty,
        } => {
            let args = KpisArgs {
                input,
                month,
                filters: filter,
                output,
                strict_empty,
            };

            // Validate args first
            kpis::validate_args(&args)?;

            kpis::execute_kpis(args)?;
        }

        Commands::Trend {
            input,
            group_by,
            granularity,
            chronological,
            month,
            filter,
            output,
        } => {
            let args = TrendArgs {
                input,
                group_by,
                granularity,
                chronological,
                month,
                filters: filter,
                output,
            };

            trend::validate_args(&args)?;

            trend::execute_trend(args)?;
        }

        Commands::Inspect { file } => {
            inspect_dataset(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Sales Trend Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("KPI summaries and grouped trend series for sales datasets.");
}
