//! CSV output format for explanations
//!
//! One row per explanation record, for spreadsheet analysis and machine parsing.

use crate::explanation::{Explanation, ExplanationRecord};

const HEADER: &str = "order,conditions,support,lift,matched_row_count,outlier_count";

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Conditions joined with `;` so a record stays one field when unquoted
fn format_conditions(record: &ExplanationRecord) -> String {
    record
        .items
        .iter()
        .map(|item| format!("{}={}", item.column, item.value))
        .collect::<Vec<_>>()
        .join(";")
}

fn format_record(record: &ExplanationRecord) -> String {
    [
        record.order().to_string(),
        escape_field(&format_conditions(record)),
        format!("{:.6}", record.support),
        format!("{:.6}", record.lift),
        record.matched_row_count.to_string(),
        record.outlier_count.to_string(),
    ]
    .join(",")
}

/// Render all records, header first
pub fn explanation_to_csv(explanation: &Explanation) -> String {
    let mut output = String::new();

    output.push_str(HEADER);
    output.push('\n');

    for record in &explanation.records {
        output.push_str(&format_record(record));
        output.push('\n');
    }

    output
}
