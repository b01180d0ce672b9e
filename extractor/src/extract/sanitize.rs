//! Category -> single safe path component.

use once_cell::sync::Lazy;
use regex::Regex;

/// Windows device names, bare or with any extension.
static RESERVED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])(\..*)?$").expect("valid regex")
});

const REPLACEMENT: char = '_';

/// Map `category` to a folder name that stays inside the output root on
/// every mainstream filesystem.
///
/// Separators, `: * ? " < > |` and control characters become `_`; trailing
/// dots and spaces are dropped; empty, `.` and `..` become `_`; reserved
/// device names get a `_` prefix.
pub fn sanitize_category(category: &str) -> String {
    let replaced: String = category
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => REPLACEMENT,
            c if c.is_control() => REPLACEMENT,
            c => c,
        })
        .collect();

    let trimmed = replaced.trim_end_matches(['.', ' ']);

    if trimmed.is_empty() {
        return REPLACEMENT.to_string();
    }

    if RESERVED_NAME.is_match(trimmed) {
        return format!("{}{}", REPLACEMENT, trimmed);
    }

    trimmed.to_string()
}
