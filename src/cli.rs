//! CLI argument parsing for Rasgo

use crate::config::ClosureCheck;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for explanations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "rasgo")]
#[command(version)]
#[command(
    about = "Explain outliers in tabular data by mining over-represented attribute combinations",
    long_about = None
)]
pub struct Cli {
    /// CSV file with a header row
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Categorical columns to explain with (comma-separated)
    #[arg(short, long, value_name = "COLUMNS", value_delimiter = ',')]
    pub attributes: Vec<String>,

    /// Numeric column holding the outlier score
    #[arg(short = 'o', long = "outlier-column", value_name = "COLUMN")]
    pub outlier_column: Option<String>,

    /// Outlier test applied to the score (e.g. "> 0.5", "!= 0")
    #[arg(short, long, value_name = "EXPR")]
    pub predicate: Option<String>,

    /// Minimum fraction of outliers an explanation must cover
    #[arg(long = "min-support", value_name = "FRACTION")]
    pub min_support: Option<f64>,

    /// Minimum risk ratio (lift) an explanation must exceed
    #[arg(long = "min-ratio", value_name = "RATIO")]
    pub min_ratio: Option<f64>,

    /// Downward-closure check used when generating order-3 candidates
    #[arg(long = "closure", value_enum)]
    pub closure: Option<ClosureCheck>,

    /// Worker threads used to count orders 2 and 3
    #[arg(short = 'j', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
