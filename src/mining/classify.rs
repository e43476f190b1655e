// Support / risk-ratio classification shared by every order

/// Outcome of classifying one itemset after its order has been counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Fewer outlier rows than the minimum support count; discarded
    Pruned,
    /// Frequent and enriched above the risk-ratio threshold; an explanation
    Saved,
    /// Frequent but not enriched enough; seeds the next order's candidates
    CarriedForward,
}

/// Run-level thresholds, fixed once outliers have been flagged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// `floor(min_outlier_support * num_outliers)`
    pub support_count: usize,
    /// Fraction of all rows flagged as outliers
    pub base_rate: f64,
    /// Ratio an itemset must strictly exceed to be saved
    pub min_risk_ratio: f64,
}

impl Thresholds {
    pub fn new(
        num_outliers: usize,
        base_rate: f64,
        min_outlier_support: f64,
        min_risk_ratio: f64,
    ) -> Self {
        Self {
            support_count: (min_outlier_support * num_outliers as f64).floor() as usize,
            base_rate,
            min_risk_ratio,
        }
    }

    /// Classify an itemset from its total and outlier row counts
    ///
    /// # Example
    /// ```
    /// use rasgo::mining::{Classification, Thresholds};
    ///
    /// // 3 outliers in 10 rows, support 0.5, ratio 2.0
    /// let t = Thresholds::new(3, 0.3, 0.5, 2.0);
    /// assert_eq!(t.support_count, 1);
    /// assert_eq!(t.classify(5, 3), Classification::CarriedForward); // ratio == 2.0
    /// assert_eq!(t.classify(4, 3), Classification::Saved); // ratio == 2.5
    /// assert_eq!(t.classify(6, 0), Classification::Pruned);
    /// ```
    pub fn classify(&self, count: usize, outlier_count: usize) -> Classification {
        if outlier_count < self.support_count {
            Classification::Pruned
        } else if risk_ratio(outlier_count, count, self.base_rate) > self.min_risk_ratio {
            Classification::Saved
        } else {
            Classification::CarriedForward
        }
    }
}

/// Outlier rate among matching rows relative to the base outlier rate
///
/// Shared by classification and the reported lift. Zero when nothing is
/// flagged or `count` is zero.
pub fn risk_ratio(outlier_count: usize, count: usize, base_rate: f64) -> f64 {
    if count == 0 || base_rate <= 0.0 {
        return 0.0;
    }
    outlier_count as f64 / (count as f64 * base_rate)
}
