// Shared fixtures for integration tests
#![allow(dead_code)]

use rasgo::DataFrame;

/// Build a frame from string columns plus a `score` column
pub fn frame(columns: &[(&str, Vec<String>)], scores: Vec<f64>) -> DataFrame {
    let mut frame = DataFrame::new();
    for (name, values) in columns {
        frame.add_string_column(*name, values.clone()).unwrap();
    }
    frame.add_double_column("score", scores).unwrap();
    frame
}

/// `count` copies of `value`
pub fn repeat(value: &str, count: usize) -> Vec<String> {
    vec![value.to_string(); count]
}

/// Concatenate runs of repeated values
pub fn runs(parts: &[(&str, usize)]) -> Vec<String> {
    parts
        .iter()
        .flat_map(|(value, count)| repeat(value, *count))
        .collect()
}

/// 1.0 for the first `outliers` rows, 0.0 for the remaining ones
pub fn scores(outliers: usize, total: usize) -> Vec<f64> {
    (0..total)
        .map(|i| if i < outliers { 1.0 } else { 0.0 })
        .collect()
}

pub fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|s| s.to_string()).collect()
}
