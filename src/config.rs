//! Configuration for an itemset explanation run
//!
//! Thresholds are checked eagerly by [`SummarizerConfig::validate`] before
//! any row is counted.

use crate::error::{ExplainError, Result};
use crate::predicate::ScorePredicate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Subset check applied before an order-3 candidate is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClosureCheck {
    /// All three subset pairs must have been carried forward at order 2
    #[default]
    AllPairs,
    /// Only the pair formed by the first two members (in row order) is checked
    FirstPair,
}

/// Configuration for [`crate::AprioriSummarizer`]
///
/// # Example TOML
/// ```toml
/// attributes = ["region", "os", "app_version"]
/// outlier_column = "latency_score"
/// predicate = "> 2.0"
/// min_outlier_support = 0.05
/// min_risk_ratio = 2.5
/// closure_check = "all-pairs"
/// threads = 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarizerConfig {
    /// Categorical columns whose values form itemsets
    pub attributes: Vec<String>,

    /// Numeric column the predicate is applied to
    pub outlier_column: String,

    /// Marks a row as outlier from its score
    pub predicate: ScorePredicate,

    /// Fraction of all outliers an itemset must cover to avoid pruning, in (0, 1]
    pub min_outlier_support: f64,

    /// Enrichment over the base outlier rate an itemset must strictly exceed
    /// to be saved as an explanation, at least 1
    pub min_risk_ratio: f64,

    /// Downward-closure check for order-3 candidates
    pub closure_check: ClosureCheck,

    /// Worker threads for counting (1 = sequential)
    pub threads: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            outlier_column: "_OUTLIER".to_string(),
            predicate: ScorePredicate::default(),
            min_outlier_support: 0.1,
            min_risk_ratio: 3.0,
            closure_check: ClosureCheck::AllPairs,
            threads: 1,
        }
    }
}

impl SummarizerConfig {
    /// Configuration with default thresholds for the given columns
    pub fn new(attributes: Vec<String>, outlier_column: impl Into<String>) -> Self {
        Self {
            attributes,
            outlier_column: outlier_column.into(),
            ..Self::default()
        }
    }

    pub fn with_predicate(mut self, predicate: ScorePredicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn with_min_outlier_support(mut self, min_outlier_support: f64) -> Self {
        self.min_outlier_support = min_outlier_support;
        self
    }

    pub fn with_min_risk_ratio(mut self, min_risk_ratio: f64) -> Self {
        self.min_risk_ratio = min_risk_ratio;
        self
    }

    pub fn with_closure_check(mut self, closure_check: ClosureCheck) -> Self {
        self.closure_check = closure_check;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Check thresholds and column settings
    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            return Err(ExplainError::EmptyAttributes);
        }

        for (idx, name) in self.attributes.iter().enumerate() {
            if self.attributes[..idx].contains(name) {
                return Err(ExplainError::DuplicateColumn { name: name.clone() });
            }
        }

        if self.outlier_column.is_empty() {
            return Err(ExplainError::MissingColumn {
                name: String::new(),
            });
        }

        let support = self.min_outlier_support;
        if !(support > 0.0 && support <= 1.0) {
            return Err(ExplainError::InvalidThreshold {
                name: "min_outlier_support",
                value: support,
                reason: "must be in (0, 1]",
            });
        }

        let ratio = self.min_risk_ratio;
        if !ratio.is_finite() || ratio < 1.0 {
            return Err(ExplainError::InvalidThreshold {
                name: "min_risk_ratio",
                value: ratio,
                reason: "must be finite and >= 1",
            });
        }

        if self.threads == 0 {
            return Err(ExplainError::InvalidThreshold {
                name: "threads",
                value: 0.0,
                reason: "must be >= 1",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::CompareOp;

    fn attrs() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_default_config() {
        let config = SummarizerConfig::default();
        assert_eq!(config.outlier_column, "_OUTLIER");
        assert_eq!(config.min_outlier_support, 0.1);
        assert_eq!(config.min_risk_ratio, 3.0);
        assert_eq!(config.closure_check, ClosureCheck::AllPairs);
        assert_eq!(config.threads, 1);
        // No attributes configured yet
        assert!(matches!(config.validate(), Err(ExplainError::EmptyAttributes)));
    }

    #[test]
    fn test_builder() {
        let config = SummarizerConfig::new(attrs(), "score")
            .with_min_outlier_support(0.5)
            .with_min_risk_ratio(2.0)
            .with_closure_check(ClosureCheck::FirstPair)
            .with_threads(4);
        assert!(config.validate().is_ok());
        assert_eq!(config.outlier_column, "score");
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn test_repeated_attribute_rejected() {
        let config = SummarizerConfig::new(
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
            "score",
        );
        assert!(matches!(
            config.validate(),
            Err(ExplainError::DuplicateColumn { name }) if name == "a"
        ));
    }

    #[test]
    fn test_invalid_support() {
        for support in [0.0, -0.1, 1.5, f64::NAN] {
            let config = SummarizerConfig::new(attrs(), "s").with_min_outlier_support(support);
            assert!(
                matches!(
                    config.validate(),
                    Err(ExplainError::InvalidThreshold {
                        name: "min_outlier_support",
                        ..
                    })
                ),
                "support {} should be rejected",
                support
            );
        }
        let config = SummarizerConfig::new(attrs(), "s").with_min_outlier_support(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_ratio() {
        for ratio in [0.5, f64::INFINITY, f64::NAN] {
            let config = SummarizerConfig::new(attrs(), "s").with_min_risk_ratio(ratio);
            assert!(config.validate().is_err(), "ratio {} should be rejected", ratio);
        }
        let config = SummarizerConfig::new(attrs(), "s").with_min_risk_ratio(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = SummarizerConfig::new(attrs(), "s").with_threads(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let config = SummarizerConfig::from_toml_str(
            r#"
            attributes = ["region", "os"]
            outlier_column = "latency"
            predicate = ">= 2"
            min_risk_ratio = 2.5
            closure_check = "first-pair"
            "#,
        )
        .unwrap();

        assert_eq!(config.attributes, vec!["region", "os"]);
        assert_eq!(config.predicate, ScorePredicate::new(CompareOp::Ge, 2.0));
        assert_eq!(config.min_risk_ratio, 2.5);
        assert_eq!(config.min_outlier_support, 0.1);
        assert_eq!(config.closure_check, ClosureCheck::FirstPair);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = SummarizerConfig::from_toml_str("min_suport = 0.2").unwrap_err();
        assert!(matches!(err, ExplainError::Toml(_)));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rasgo.toml");
        fs::write(&path, "attributes = [\"x\"]\nthreads = 2\n").unwrap();

        let config = SummarizerConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.attributes, vec!["x"]);
        assert_eq!(config.threads, 2);

        let missing = SummarizerConfig::from_toml_file(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ExplainError::Io(_))));
    }
}
