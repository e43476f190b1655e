//! In-memory tabular data with named string and numeric columns
//!
//! All columns share one row count; the first column added fixes it and
//! every later column is checked against it. CSV loading mirrors the
//! quoting rules used by [`crate::csv_output`] so exported files load back.

use crate::error::{ExplainError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Column storage
#[derive(Debug, Clone, PartialEq)]
enum Column {
    Text(Vec<String>),
    Numeric(Vec<f64>),
}

impl Column {
    fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Numeric(values) => values.len(),
        }
    }
}

/// Table of equal-length named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    names: Vec<String>,
    columns: HashMap<String, Column>,
    num_rows: Option<usize>,
}

impl DataFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (0 for a frame without columns)
    pub fn num_rows(&self) -> usize {
        self.num_rows.unwrap_or(0)
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Add a string column
    pub fn add_string_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        self.insert(name.into(), Column::Text(values))
    }

    /// Add a numeric column
    pub fn add_double_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        self.insert(name.into(), Column::Numeric(values))
    }

    fn insert(&mut self, name: String, column: Column) -> Result<()> {
        if self.columns.contains_key(&name) {
            return Err(ExplainError::DuplicateColumn { name });
        }

        let len = column.len();
        match self.num_rows {
            Some(expected) if expected != len => {
                return Err(ExplainError::ColumnLengthMismatch {
                    name,
                    expected,
                    actual: len,
                });
            }
            Some(_) => {}
            None => self.num_rows = Some(len),
        }

        self.names.push(name.clone());
        self.columns.insert(name, column);
        Ok(())
    }

    /// Look up a string column by name
    pub fn string_column(&self, name: &str) -> Result<&[String]> {
        match self.columns.get(name) {
            Some(Column::Text(values)) => Ok(values),
            _ => Err(ExplainError::MissingColumn {
                name: name.to_string(),
            }),
        }
    }

    /// Look up several string columns, preserving the requested order
    pub fn string_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&[String]>> {
        names
            .iter()
            .map(|name| self.string_column(name.as_ref()))
            .collect()
    }

    /// Look up a numeric column by name
    pub fn double_column(&self, name: &str) -> Result<&[f64]> {
        match self.columns.get(name) {
            Some(Column::Numeric(values)) => Ok(values),
            _ => Err(ExplainError::MissingColumn {
                name: name.to_string(),
            }),
        }
    }

    /// Load selected columns from a CSV file with a header line
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        string_columns: &[String],
        double_columns: &[String],
    ) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file), string_columns, double_columns)
    }

    /// Load selected columns from CSV text
    ///
    /// Columns not named in either list are skipped. Numeric columns must
    /// parse as `f64`; a column requested as both kinds is rejected.
    pub fn from_csv_reader<R: BufRead>(
        reader: R,
        string_columns: &[String],
        double_columns: &[String],
    ) -> Result<Self> {
        if let Some(name) = string_columns.iter().find(|n| double_columns.contains(n)) {
            return Err(ExplainError::DuplicateColumn { name: name.clone() });
        }

        let mut lines = reader.lines().enumerate();
        let header = match lines.next() {
            Some((_, line)) => {
                let line = line?;
                split_record(line.strip_prefix('\u{feff}').unwrap_or(&line)).map_err(|message| {
                    ExplainError::Parse {
                        line: 1,
                        message,
                    }
                })?
            }
            None => {
                return Err(ExplainError::Parse {
                    line: 1,
                    message: "missing header line".to_string(),
                })
            }
        };

        let position = |name: &String| -> Result<usize> {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ExplainError::MissingColumn { name: name.clone() })
        };
        let text_idx = string_columns
            .iter()
            .map(position)
            .collect::<Result<Vec<_>>>()?;
        let num_idx = double_columns
            .iter()
            .map(position)
            .collect::<Result<Vec<_>>>()?;

        let mut text: Vec<Vec<String>> = vec![Vec::new(); text_idx.len()];
        let mut nums: Vec<Vec<f64>> = vec![Vec::new(); num_idx.len()];

        for (i, line) in lines {
            let line = line?;
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_record(&line).map_err(|message| ExplainError::Parse {
                line: line_no,
                message,
            })?;
            if fields.len() != header.len() {
                return Err(ExplainError::Parse {
                    line: line_no,
                    message: format!("expected {} fields, found {}", header.len(), fields.len()),
                });
            }

            for (slot, &idx) in text_idx.iter().enumerate() {
                text[slot].push(fields[idx].clone());
            }
            for (slot, &idx) in num_idx.iter().enumerate() {
                let raw = fields[idx].trim();
                let value = raw.parse::<f64>().map_err(|_| ExplainError::Parse {
                    line: line_no,
                    message: format!("column '{}': '{}' is not a number", header[idx], raw),
                })?;
                nums[slot].push(value);
            }
        }

        let mut frame = DataFrame::new();
        for (name, values) in string_columns.iter().zip(text) {
            frame.add_string_column(name.clone(), values)?;
        }
        for (name, values) in double_columns.iter().zip(nums) {
            frame.add_double_column(name.clone(), values)?;
        }
        Ok(frame)
    }
}

/// Split one CSV record, honouring double-quoted fields with `""` escapes
fn split_record(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}
