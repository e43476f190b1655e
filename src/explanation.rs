//! Explanation records assembled from saved itemsets

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One decoded attribute/value condition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeValue {
    pub column: String,
    pub value: String,
}

/// A saved itemset, decoded and scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationRecord {
    /// Conditions, in attribute column order
    pub items: Vec<AttributeValue>,
    /// Rows matching every condition
    pub matched_row_count: usize,
    /// Outlier rows matching every condition
    pub outlier_count: usize,
    /// Fraction of all outliers covered, in [0, 1]
    pub support: f64,
    /// Outlier rate among matching rows over the base outlier rate
    pub lift: f64,
}

impl ExplanationRecord {
    /// Number of conditions (itemset order)
    pub fn order(&self) -> usize {
        self.items.len()
    }

    /// Look up the value required for `column`, if this record constrains it
    pub fn value_of(&self, column: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.column == column)
            .map(|item| item.value.as_str())
    }

    /// `column=value` conditions joined with `, `
    pub fn conditions(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}={}", item.column, item.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Records for orders 1, 2 and 3, in that order
    pub records: Vec<ExplanationRecord>,
    pub num_inliers: usize,
    pub num_outliers: usize,
    /// Counting time summed over all orders
    pub creation_time_ms: u64,
}

impl Explanation {
    /// Records with exactly `order` conditions
    pub fn of_order(&self, order: usize) -> impl Iterator<Item = &ExplanationRecord> + '_ {
        self.records.iter().filter(move |r| r.order() == order)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let total = self.num_inliers + self.num_outliers;

        let _ = writeln!(
            report,
            "Outliers: {} of {} rows ({} inliers)",
            self.num_outliers, total, self.num_inliers
        );
        let _ = writeln!(report, "Mining time: {} ms", self.creation_time_ms);

        if self.records.is_empty() {
            report.push_str("\nNo explanations found.\n");
            return report;
        }

        let _ = writeln!(report, "\nExplanations ({}):", self.records.len());
        for record in &self.records {
            let _ = writeln!(
                report,
                "  [{}] support={:.3} lift={:.3} matched={} outliers={}",
                record.conditions(),
                record.support,
                record.lift,
                record.matched_row_count,
                record.outlier_count
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(column: &str, value: &str) -> AttributeValue {
        AttributeValue {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    fn sample() -> Explanation {
        Explanation {
            records: vec![
                ExplanationRecord {
                    items: vec![item("os", "linux")],
                    matched_row_count: 4,
                    outlier_count: 3,
                    support: 1.0,
                    lift: 2.5,
                },
                ExplanationRecord {
                    items: vec![item("os", "mac"), item("region", "eu")],
                    matched_row_count: 2,
                    outlier_count: 2,
                    support: 0.667,
                    lift: 3.33,
                },
            ],
            num_inliers: 7,
            num_outliers: 3,
            creation_time_ms: 0,
        }
    }

    #[test]
    fn test_record_helpers() {
        let explanation = sample();
        let pair = &explanation.records[1];
        assert_eq!(pair.order(), 2);
        assert_eq!(pair.value_of("region"), Some("eu"));
        assert_eq!(pair.value_of("app"), None);
        assert_eq!(pair.conditions(), "os=mac, region=eu");
        assert_eq!(explanation.of_order(1).count(), 1);
        assert_eq!(explanation.of_order(3).count(), 0);
    }

    #[test]
    fn test_report_string() {
        let report = sample().to_report_string();
        assert!(report.contains("Outliers: 3 of 10 rows (7 inliers)"));
        assert!(report.contains("[os=linux] support=1.000 lift=2.500 matched=4 outliers=3"));
        assert!(report.contains("Explanations (2):"));
    }

    #[test]
    fn test_empty_report() {
        let explanation = Explanation {
            records: Vec::new(),
            num_inliers: 5,
            num_outliers: 0,
            creation_time_ms: 1,
        };
        assert!(explanation.is_empty());
        assert!(explanation.to_report_string().contains("No explanations found."));
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["num_outliers"], 3);
        assert_eq!(value["records"][0]["items"][0]["column"], "os");
        assert_eq!(value["records"][1]["matched_row_count"], 2);

        let back: Explanation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
