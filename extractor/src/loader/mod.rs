//! Loader: CSV file -> validated [`Table`].
//!
//! Parsing is delegated to [`crate::parser`]; this module normalizes the
//! headers, checks for the required columns and builds the rows. Cells are
//! kept verbatim, with no type inference and no trimming.

use std::path::Path;

use crate::error::LoadResult;
use crate::models::{CsvInfo, Row, Table};
use crate::parser::{parse_bytes_auto, parse_file_auto, ParseResult};
use crate::validation::{normalize_headers, validate_columns};

/// A validated table together with what the parser detected.
#[derive(Debug, Clone)]
pub struct LoadedCsv {
    pub table: Table,
    pub info: CsvInfo,
}

/// Load a CSV file with auto-detected delimiter.
///
/// Fails with a format error if the file is not tabular data, and with a
/// validation error if `category` or `message` is missing.
pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    load_with(path, None).map(|loaded| loaded.table)
}

/// Load a CSV file, optionally forcing the delimiter, and keep the metadata.
pub fn load_with<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> LoadResult<LoadedCsv> {
    let parsed = parse_file_auto(path, delimiter)?;
    build(parsed)
}

/// Same as [`load_with`] over in-memory bytes.
pub fn load_bytes(bytes: &[u8], delimiter: Option<char>) -> LoadResult<LoadedCsv> {
    let parsed = parse_bytes_auto(bytes, delimiter)?;
    build(parsed)
}

fn build(parsed: ParseResult) -> LoadResult<LoadedCsv> {
    let columns = normalize_headers(&parsed.headers);
    validate_columns(&columns)?;

    let info = CsvInfo {
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        row_count: parsed.records.len(),
        headers: parsed.headers,
    };

    let rows = parsed
        .records
        .into_iter()
        .map(|values| Row::from_values(&columns, values))
        .collect();

    Ok(LoadedCsv {
        table: Table::new(columns, rows),
        info,
    })
}
