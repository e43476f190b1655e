//! Error taxonomy for outlier explanation runs
//!
//! Every failure is fatal to a run: a partially counted order would
//! misrepresent statistical significance, so nothing here is downgraded
//! to a warning.

use thiserror::Error;

/// Error raised by an externally supplied outlier predicate
pub type PredicateError = Box<dyn std::error::Error + Send + Sync>;

/// Errors for configuration, data contract and mining failures
#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Attribute list is empty: at least one attribute column is required")]
    EmptyAttributes,

    #[error("Column not found: {name}")]
    MissingColumn { name: String },

    #[error("Column already present: {name}")]
    DuplicateColumn { name: String },

    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Column '{name}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite outlier score {value} at row {row}")]
    NonFiniteScore { row: usize, value: f64 },

    #[error("Outlier predicate failed at row {row}: {source}")]
    Predicate {
        row: usize,
        #[source]
        source: PredicateError,
    },

    #[error("Unknown encoded key: {0}")]
    UnknownKey(u32),

    #[error("Saved itemset {itemset} has no counts")]
    MissingCounts { itemset: String },

    #[error("No results: process() has not completed successfully")]
    NotProcessed,

    #[error("Invalid predicate expression: {0}")]
    InvalidPredicate(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for outlier explanation operations
pub type Result<T> = std::result::Result<T, ExplainError>;
