//! High-level API: load, report, extract.
//!
//! # Example
//!
//! ```rust,ignore
//! use msgextract::{extract_csv, ExtractOptions};
//! use std::path::Path;
//!
//! let result = extract_csv(Path::new("inbox.csv"), &ExtractOptions::default(), |_| {})?;
//! println!("{} messages in {}", result.extraction.count, result.extraction.root.display());
//! ```

use serde::Serialize;
use std::path::Path;

use crate::error::PipelineResult as Result;
use crate::extract::extract_with;
use crate::loader::{load_with, LoadedCsv};
use crate::logs::{log_error, log_info, log_success};
use crate::models::{CsvInfo, ExtractionResult, Table};
use crate::config::ExtractOptions;

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub csv_info: CsvInfo,
    pub extraction: ExtractionResult,
}

/// Load `path`, call `on_loaded` with the validated table, then extract.
///
/// Nothing is written unless loading and validation succeed.
pub fn extract_csv<F>(path: &Path, options: &ExtractOptions, on_loaded: F) -> Result<PipelineResult>
where
    F: FnOnce(&Table),
{
    options.validate()?;

    let LoadedCsv { table, info } = load_csv(path, options)?;
    on_loaded(&table);

    log_info("📁 Extracting messages...");
    let extraction = extract_with(&table, path, options).map_err(|e| {
        log_error(format!("Stopped at {}", e.path().display()));
        e
    })?;
    log_success(format!("{} messages extracted", extraction.count));

    Ok(PipelineResult {
        csv_info: info,
        extraction,
    })
}

/// Load and validate `path`, logging what the parser detected.
pub fn load_csv(path: &Path, options: &ExtractOptions) -> Result<LoadedCsv> {
    log_info(format!("📖 Reading {}", path.display()));
    let loaded = load_with(path, options.delimiter)?;

    log_success(format!("Detected encoding: {}", loaded.info.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(loaded.info.delimiter)));
    log_success(format!("Read {} rows", loaded.info.row_count));
    log_info(format!("📋 Columns: {}", loaded.table.columns.join(", ")));

    Ok(loaded)
}

/// Printable form of a delimiter
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::logs::{LogEntry, LogLevel, LOG_BROADCASTER};
    use std::cell::Cell;
    use std::fs;
    use tempfile::tempdir;
    use tokio::sync::broadcast::error::TryRecvError;

    /// Everything buffered on `rx` so far.
    fn drain(rx: &mut tokio::sync::broadcast::Receiver<LogEntry>) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(entry) => entries.push(entry),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        entries
    }

    #[test]
    fn test_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("inbox.csv");
        fs::write(
            &input,
            "Category , MESSAGE\nBilling,Invoice overdue\nSupport,Reset my password\n",
        )
        .unwrap();

        let seen = Cell::new(0);
        let result = extract_csv(&input, &ExtractOptions::default(), |t| seen.set(t.len())).unwrap();

        assert_eq!(seen.get(), 2);
        assert_eq!(result.extraction.count, 2);
        assert_eq!(result.csv_info.delimiter, ',');
        let root = dir.path().join("Extracted_Messages");
        assert_eq!(fs::read_to_string(root.join("Billing/message_1.txt")).unwrap(), "Invoice overdue");
        assert_eq!(fs::read_to_string(root.join("Support/message_2.txt")).unwrap(), "Reset my password");
    }

    #[test]
    fn test_utf8_text_written_unchanged() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("inbox.csv");
        fs::write(&input, "category,message\nCafé,café ☕\nSupport,Réinitialiser\n").unwrap();

        let result = extract_csv(&input, &ExtractOptions::default(), |_| {}).unwrap();

        assert_eq!(result.csv_info.encoding, "utf-8");
        let root = dir.path().join("Extracted_Messages");
        assert_eq!(fs::read(root.join("Café/message_1.txt")).unwrap(), "café ☕".as_bytes());
        assert_eq!(fs::read(root.join("Support/message_2.txt")).unwrap(), "Réinitialiser".as_bytes());
    }

    #[test]
    fn test_extra_columns_and_multiline_messages() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("inbox.csv");
        fs::write(
            &input,
            "id,Category,Message,notes\n1,Billing,Invoice overdue,x\n2,Support,\"  line one\nline two  \",y\n3,Billing\n",
        )
        .unwrap();

        let result = extract_csv(&input, &ExtractOptions::default(), |_| {}).unwrap();

        assert_eq!(result.extraction.count, 3);
        let root = dir.path().join("Extracted_Messages");
        assert_eq!(fs::read_to_string(root.join("Billing/message_1.txt")).unwrap(), "Invoice overdue");
        assert_eq!(fs::read_to_string(root.join("Support/message_2.txt")).unwrap(), "line one\nline two");
        assert_eq!(fs::read_to_string(root.join("Billing/message_3.txt")).unwrap(), "");
    }

    #[test]
    fn test_progress_is_broadcast() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("inbox.csv");
        fs::write(&input, "category,message\nBilling,Invoice overdue\n,orphan\n").unwrap();

        LOG_BROADCASTER.set_quiet(true);
        let mut rx = LOG_BROADCASTER.subscribe();
        extract_csv(&input, &ExtractOptions::default(), |_| {}).unwrap();

        let entries = drain(&mut rx);
        let dir_text = dir.path().display().to_string();
        let ours: Vec<&LogEntry> = entries.iter().filter(|e| e.message.contains(&dir_text)).collect();

        assert!(ours
            .iter()
            .any(|e| e.level == LogLevel::Info && e.indent == 1 && e.message.starts_with("Billing -> ")));
        assert!(ours
            .iter()
            .any(|e| e.level == LogLevel::Warning && e.message.contains("Row 2 has no category")));
        assert!(entries
            .iter()
            .any(|e| e.level == LogLevel::Success && e.message == "2 messages extracted"));
    }

    #[test]
    fn test_validation_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("inbox.csv");
        fs::write(&input, "category,body\nBilling,Invoice overdue\n").unwrap();

        let called = Cell::new(false);
        let err = extract_csv(&input, &ExtractOptions::default(), |_| called.set(true)).unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
        assert!(err.to_string().contains("Found: [\"category\", \"body\"]"));
        assert!(!called.get());
        assert!(!dir.path().join("Extracted_Messages").exists());
    }

    #[test]
    fn test_format_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("inbox.csv");
        fs::write(&input, "category,message\nA,B,C\n").unwrap();

        let err = extract_csv(&input, &ExtractOptions::default(), |_| {}).unwrap_err();

        assert!(matches!(err, PipelineError::Format(_)));
        assert!(err.to_string().starts_with("Could not process CSV:"));
        assert!(!dir.path().join("Extracted_Messages").exists());
    }

    #[test]
    fn test_invalid_options_rejected_before_reading() {
        let dir = tempdir().unwrap();
        let options = ExtractOptions {
            output_dir_name: "../out".into(),
            ..Default::default()
        };

        let err = extract_csv(&dir.path().join("missing.csv"), &options, |_| {}).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_format_delimiter() {
        assert_eq!(format_delimiter('\t'), "TAB");
        assert_eq!(format_delimiter(';'), ";");
    }
}
