//! Dictionary encoding of categorical attributes
//!
//! Every distinct `(column, value)` pair receives a dense, globally unique
//! `u32` key. Keys are handed out in first-seen order, scanning columns
//! left to right and, within a column, rows top to bottom. The same string
//! in two different columns therefore gets two different keys.
//!
//! # Example
//! ```
//! use rasgo::encoder::AttributeEncoder;
//!
//! let os = vec!["linux".to_string(), "mac".to_string(), "linux".to_string()];
//! let region = vec!["eu".to_string(), "eu".to_string(), "us".to_string()];
//!
//! let mut encoder = AttributeEncoder::new(vec!["os".to_string(), "region".to_string()]);
//! let rows = encoder.encode(&[&os[..], &region[..]]).unwrap();
//!
//! assert_eq!(rows.row(0), &[0, 2]);
//! assert_eq!(rows.row(2), &[0, 3]);
//! assert_eq!(encoder.value_of(3).unwrap(), "us");
//! assert_eq!(encoder.column_name_of(3).unwrap(), "region");
//! ```

use crate::error::{ExplainError, Result};
use std::collections::HashMap;

/// Dense identifier of one `(column, value)` pair
pub type EncodedKey = u32;

/// Fixed-width encoded rows, one key per attribute column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedRows {
    width: usize,
    keys: Vec<EncodedKey>,
}

impl EncodedRows {
    /// Number of rows
    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.keys.len() / self.width
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys per row (number of attribute columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Keys of row `i`, in column order
    pub fn row(&self, i: usize) -> &[EncodedKey] {
        &self.keys[i * self.width..(i + 1) * self.width]
    }

    /// Iterate rows in input order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[EncodedKey]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.keys.chunks_exact(self.width.max(1))
    }
}

/// Per-column string dictionary with reverse lookup
#[derive(Debug, Clone, Default)]
pub struct AttributeEncoder {
    column_names: Vec<String>,
    encoders: Vec<HashMap<String, EncodedKey>>,
    value_decoder: Vec<String>,
    column_decoder: Vec<usize>,
}

impl AttributeEncoder {
    /// Create an encoder for the given attribute column names
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            column_names,
            ..Self::default()
        }
    }

    /// Next key that would be assigned (equals the number of encoded pairs)
    pub fn next_key(&self) -> EncodedKey {
        self.value_decoder.len() as EncodedKey
    }

    /// Number of distinct `(column, value)` pairs seen so far
    pub fn len(&self) -> usize {
        self.value_decoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value_decoder.is_empty()
    }

    /// Encode columns of raw values into fixed-width rows
    ///
    /// An empty column list yields no rows. Columns must share one length.
    /// Repeated calls on the same encoder reuse keys already assigned.
    pub fn encode<S: AsRef<str>>(&mut self, columns: &[&[S]]) -> Result<EncodedRows> {
        let Some(first) = columns.first() else {
            return Ok(EncodedRows::default());
        };
        let width = columns.len();
        let num_rows = first.len();

        for (idx, col) in columns.iter().enumerate() {
            if col.len() != num_rows {
                return Err(ExplainError::ColumnLengthMismatch {
                    name: self.display_name(idx),
                    expected: num_rows,
                    actual: col.len(),
                });
            }
        }

        if self.encoders.len() < width {
            self.encoders.resize_with(width, HashMap::new);
        }

        let mut keys = vec![0; num_rows * width];
        for (col_idx, col) in columns.iter().enumerate() {
            for (row_idx, raw) in col.iter().enumerate() {
                let raw = raw.as_ref();
                let key = match self.encoders[col_idx].get(raw) {
                    Some(&key) => key,
                    None => {
                        let key = self.next_key();
                        self.encoders[col_idx].insert(raw.to_string(), key);
                        self.value_decoder.push(raw.to_string());
                        self.column_decoder.push(col_idx);
                        key
                    }
                };
                keys[row_idx * width + col_idx] = key;
            }
        }

        Ok(EncodedRows { width, keys })
    }

    /// Key previously assigned to `value` in column `column`, if any
    pub fn lookup(&self, column: usize, value: &str) -> Option<EncodedKey> {
        self.encoders.get(column)?.get(value).copied()
    }

    /// Column index a key was drawn from
    pub fn column_of(&self, key: EncodedKey) -> Result<usize> {
        self.column_decoder
            .get(key as usize)
            .copied()
            .ok_or(ExplainError::UnknownKey(key))
    }

    /// Raw string value a key stands for
    pub fn value_of(&self, key: EncodedKey) -> Result<&str> {
        self.value_decoder
            .get(key as usize)
            .map(String::as_str)
            .ok_or(ExplainError::UnknownKey(key))
    }

    /// Name of the column a key was drawn from
    pub fn column_name_of(&self, key: EncodedKey) -> Result<&str> {
        let col = self.column_of(key)?;
        self.column_names
            .get(col)
            .map(String::as_str)
            .ok_or(ExplainError::UnknownKey(key))
    }

    fn display_name(&self, idx: usize) -> String {
        self.column_names
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("#{}", idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keys_follow_column_major_first_seen_order() {
        let a = col(&["x", "y", "x", "z"]);
        let b = col(&["p", "p", "q", "p"]);
        let mut encoder = AttributeEncoder::new(col(&["a", "b"]));
        let rows = encoder.encode(&[&a[..], &b[..]]).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows.width(), 2);
        assert_eq!(rows.row(0), &[0, 3]);
        assert_eq!(rows.row(1), &[1, 3]);
        assert_eq!(rows.row(2), &[0, 4]);
        assert_eq!(rows.row(3), &[2, 3]);
        assert_eq!(encoder.next_key(), 5);
    }

    #[test]
    fn test_same_value_in_two_columns_gets_two_keys() {
        let a = col(&["on", "off"]);
        let b = col(&["off", "on"]);
        let mut encoder = AttributeEncoder::new(col(&["a", "b"]));
        let rows = encoder.encode(&[&a[..], &b[..]]).unwrap();

        assert_ne!(rows.row(0)[0], rows.row(1)[1]);
        assert_eq!(encoder.lookup(0, "on"), Some(0));
        assert_eq!(encoder.lookup(1, "on"), Some(3));
        assert_eq!(encoder.lookup(1, "missing"), None);
        assert_eq!(encoder.lookup(9, "on"), None);
    }

    #[test]
    fn test_decode_round_trip() {
        let a = col(&["x", "y"]);
        let b = col(&["p", "q"]);
        let mut encoder = AttributeEncoder::new(col(&["a", "b"]));
        encoder.encode(&[&a[..], &b[..]]).unwrap();

        for key in 0..encoder.next_key() {
            let column = encoder.column_of(key).unwrap();
            let value = encoder.value_of(key).unwrap().to_string();
            assert_eq!(encoder.lookup(column, &value), Some(key));
        }
        assert_eq!(encoder.column_name_of(2).unwrap(), "b");
    }

    #[test]
    fn test_unknown_key_fails() {
        let encoder = AttributeEncoder::new(col(&["a"]));
        assert!(matches!(encoder.column_of(0), Err(ExplainError::UnknownKey(0))));
        assert!(matches!(encoder.value_of(5), Err(ExplainError::UnknownKey(5))));
        assert!(encoder.column_name_of(1).is_err());
    }

    #[test]
    fn test_empty_column_list_yields_no_rows() {
        let mut encoder = AttributeEncoder::new(Vec::new());
        let columns: [&[String]; 0] = [];
        let rows = encoder.encode(&columns).unwrap();
        assert!(rows.is_empty());
        assert_eq!(rows.iter().count(), 0);
    }

    #[test]
    fn test_unequal_columns_rejected() {
        let a = col(&["x", "y"]);
        let b = col(&["p"]);
        let mut encoder = AttributeEncoder::new(col(&["a", "b"]));
        let err = encoder.encode(&[&a[..], &b[..]]).unwrap_err();
        assert!(matches!(
            err,
            ExplainError::ColumnLengthMismatch { ref name, expected: 2, actual: 1 } if name == "b"
        ));
    }

    #[test]
    fn test_reencoding_reuses_keys() {
        let a = col(&["x", "y"]);
        let mut encoder = AttributeEncoder::new(col(&["a"]));
        let first = encoder.encode(&[&a[..]]).unwrap();
        let second = encoder.encode(&[&a[..]]).unwrap();
        assert_eq!(first, second);
        assert_eq!(encoder.len(), 2);
    }
}
