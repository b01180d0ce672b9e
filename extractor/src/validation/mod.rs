//! Header normalization and required-column checks.
//!
//! Headers are compared after trimming and lowercasing, so `"Category"`,
//! `" category "` and `"CATEGORY"` all satisfy the `category` requirement.

use crate::error::ValidationError;

/// Column holding the folder name for each row.
pub const CATEGORY_COLUMN: &str = "category";

/// Column holding the text written to each file.
pub const MESSAGE_COLUMN: &str = "message";

/// Columns every input must provide.
pub const REQUIRED_COLUMNS: [&str; 2] = [CATEGORY_COLUMN, MESSAGE_COLUMN];

/// Trim surrounding whitespace and lowercase.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize every header, keeping order and duplicates.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| normalize_column_name(h)).collect()
}

/// Check that normalized `columns` contain all [`REQUIRED_COLUMNS`].
pub fn validate_columns(columns: &[String]) -> Result<(), ValidationError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !columns.iter().any(|c| c == *req))
        .map(|req| req.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingColumns {
            missing,
            found: columns.to_vec(),
        })
    }
}

/// Returns `true` if normalized `columns` contain all required columns.
pub fn is_valid(columns: &[String]) -> bool {
    validate_columns(columns).is_ok()
}
