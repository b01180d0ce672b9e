//! Domain models shared by the loader, the extractor and the preview.
//!
//! - [`Row`] - one CSV record keyed by normalized column name
//! - [`Table`] - ordered rows plus the normalized column names
//! - [`CsvInfo`] - what the parser detected about the input
//! - [`ExtractionResult`] - outcome of a successful extraction

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

// =============================================================================
// Row
// =============================================================================

/// One data record, keyed by normalized column name.
///
/// A column declared by the table but absent from the record reads as the
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Build a row from `columns` and positional `values`.
    ///
    /// Missing trailing values become empty strings. When a column name
    /// repeats, the first occurrence wins.
    pub fn from_values(columns: &[String], values: Vec<String>) -> Self {
        let mut cells = HashMap::with_capacity(columns.len());
        let mut values = values.into_iter();

        for column in columns {
            let value = values.next().unwrap_or_default();
            cells.entry(column.clone()).or_insert(value);
        }

        Self { cells }
    }

    /// Cell value for `column`, or `""` if the row has none.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Whether the row carries a value for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

// =============================================================================
// Table
// =============================================================================

/// Parsed CSV: normalized column names and rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell values of `row` in column order.
    pub fn row_values<'a>(&'a self, row: &'a Row) -> impl Iterator<Item = &'a str> + 'a {
        self.columns.iter().map(move |c| row.get(c))
    }
}

// =============================================================================
// Parse metadata
// =============================================================================

/// What the parser detected about an input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    /// Header names as they appear in the file, before normalization.
    pub headers: Vec<String>,
    pub row_count: usize,
}

// =============================================================================
// Extraction result
// =============================================================================

/// Outcome of a successful extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Number of message files written.
    pub count: usize,
    /// The `Extracted_Messages` directory (absolute when it could be resolved).
    pub root: PathBuf,
}
