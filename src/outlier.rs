//! Outlier flag vector computed from the numeric score column

use crate::error::{ExplainError, Result};
use crate::predicate::OutlierPredicate;

/// Per-row outlier flags with their aggregate counts
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierFlags {
    flags: Vec<bool>,
    num_outliers: usize,
}

impl OutlierFlags {
    /// Apply `predicate` to every score
    ///
    /// Fails on the first non-finite score or predicate error; no partial
    /// flag vector is ever returned.
    pub fn compute(scores: &[f64], predicate: &dyn OutlierPredicate) -> Result<Self> {
        let mut flags = Vec::with_capacity(scores.len());
        let mut num_outliers = 0;

        for (row, &value) in scores.iter().enumerate() {
            if !value.is_finite() {
                return Err(ExplainError::NonFiniteScore { row, value });
            }
            let flag = predicate
                .is_outlier(value)
                .map_err(|source| ExplainError::Predicate { row, source })?;
            if flag {
                num_outliers += 1;
            }
            flags.push(flag);
        }

        Ok(Self {
            flags,
            num_outliers,
        })
    }

    /// Build directly from precomputed flags
    pub fn from_flags(flags: Vec<bool>) -> Self {
        let num_outliers = flags.iter().filter(|&&f| f).count();
        Self {
            flags,
            num_outliers,
        }
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn is_outlier(&self, row: usize) -> bool {
        self.flags[row]
    }

    pub fn num_rows(&self) -> usize {
        self.flags.len()
    }

    pub fn num_outliers(&self) -> usize {
        self.num_outliers
    }

    pub fn num_inliers(&self) -> usize {
        self.flags.len() - self.num_outliers
    }

    /// Fraction of rows flagged (0.0 for an empty vector)
    pub fn base_rate(&self) -> f64 {
        if self.flags.is_empty() {
            0.0
        } else {
            self.num_outliers as f64 / self.flags.len() as f64
        }
    }
}
