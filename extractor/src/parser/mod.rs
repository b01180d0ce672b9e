//! CSV parser with encoding and delimiter auto-detection.
//!
//! Produces raw header names and positional records. Header normalization
//! and column checks happen in [`crate::loader`].

use std::path::Path;

use crate::error::{FormatError, FormatResult};

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Raw parse output with detection metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Header names as written in the file
    pub headers: Vec<String>,
    /// Data records; each has at most `headers.len()` fields
    pub records: Vec<Vec<String>>,
    /// Detected encoding
    pub encoding: String,
    /// Detected or forced delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 (with or without BOM) is always taken as UTF-8; chardet is
/// only consulted for bytes that are not.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if bytes.starts_with(UTF8_BOM) || std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings and invalid UTF-8 fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    match encoding.to_lowercase().as_str() {
        // WHATWG maps latin-1 labels onto windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
        }
        "iso-8859-15" => encoding_rs::ISO_8859_15.decode_without_bom_handling(bytes).0.into_owned(),
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Detect the delimiter by counting candidates in the first non-blank line.
///
/// Falls back to `,` when no candidate occurs.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &CANDIDATE_DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse a CSV file, auto-detecting encoding and (unless given) delimiter.
pub fn parse_file_auto<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> FormatResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| FormatError::new(0, format!("Cannot read file '{}': {}", path.display(), e)))?;

    parse_bytes_auto(&bytes, delimiter)
}

/// Parse CSV bytes, auto-detecting encoding and (unless given) delimiter.
pub fn parse_bytes_auto(bytes: &[u8], delimiter: Option<char>) -> FormatResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_str(&content, delimiter, encoding)
}

/// Parse CSV text with an explicit delimiter.
///
/// The first non-blank record is the header. Blank lines are skipped,
/// short records are kept as-is (the loader pads them) and records with
/// more fields than the header are rejected.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> FormatResult<ParseResult> {
    if !delimiter.is_ascii() {
        return Err(FormatError::new(0, format!("Delimiter must be ASCII, got '{}'", delimiter)));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        if is_blank(&record) {
            continue;
        }

        if headers.is_none() {
            headers = Some(header_names(&record));
            continue;
        }

        let expected = headers.as_ref().map_or(0, Vec::len);
        if record.len() > expected {
            return Err(FormatError::new(
                line,
                format!("Expected {} fields, saw {}", expected, record.len()),
            ));
        }

        records.push(record.iter().map(str::to_string).collect());
    }

    let headers = headers.ok_or_else(|| FormatError::new(0, "No columns to parse from file"))?;

    Ok(ParseResult {
        headers,
        records,
        encoding,
        delimiter,
    })
}

/// Header names, with blank ones replaced by `Unnamed: <index>`.
fn header_names(record: &csv::StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name.to_string()
            }
        })
        .collect()
}

fn is_blank(record: &csv::StringRecord) -> bool {
    match record.len() {
        0 => true,
        1 => record[0].trim().is_empty(),
        _ => false,
    }
}

fn csv_error(err: csv::Error) -> FormatError {
    let line = err.position().map(|p| p.line() as usize).unwrap_or(0);
    FormatError::new(line, format!("Invalid CSV: {}", err))
}
