//! Run options.
//!
//! Resolved in three layers: [`ExtractOptions::default`], then an optional
//! JSON file, then command-line flags applied by the binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Name of the output directory created next to the input file.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "Extracted_Messages";

/// How a category value becomes a folder name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPolicy {
    /// Use the trimmed category verbatim.
    #[default]
    Literal,
    /// Replace characters that are unsafe in a single path component.
    Sanitize,
}

/// Options for loading and extracting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    /// Output directory name, created next to the input file
    pub output_dir_name: String,

    /// Force a delimiter instead of auto-detecting
    pub delimiter: Option<char>,

    /// Folder naming policy for categories
    pub category_policy: CategoryPolicy,

    /// Rows shown in the preview table
    pub preview_rows: usize,

    /// Preview column width, in characters
    pub column_width: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
            delimiter: None,
            category_policy: CategoryPolicy::Literal,
            preview_rows: 20,
            column_width: 40,
        }
    }
}

impl ExtractOptions {
    /// Load options from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let options: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Reject values the loader or extractor cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let name = self.output_dir_name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "output_dir_name".into(),
                message: format!("'{}' is not a single directory name", self.output_dir_name),
            });
        }

        if let Some(d) = self.delimiter {
            if !d.is_ascii() || d == '"' || d == '\n' || d == '\r' {
                return Err(ConfigError::InvalidValue {
                    field: "delimiter".into(),
                    message: format!("{:?} cannot be used as a delimiter", d),
                });
            }
        }

        if self.column_width < 2 {
            return Err(ConfigError::InvalidValue {
                field: "column_width".into(),
                message: "must be at least 2".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_options() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.output_dir_name, "Extracted_Messages");
        assert_eq!(opts.delimiter, None);
        assert_eq!(opts.category_policy, CategoryPolicy::Literal);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{ "category_policy": "sanitize", "delimiter": ";" }"#).unwrap();

        let opts = ExtractOptions::from_json_file(&path).unwrap();
        assert_eq!(opts.category_policy, CategoryPolicy::Sanitize);
        assert_eq!(opts.delimiter, Some(';'));
        assert_eq!(opts.output_dir_name, DEFAULT_OUTPUT_DIR_NAME);
        assert_eq!(opts.preview_rows, 20);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{ "outputDir": "x" }"#).unwrap();

        let err = ExtractOptions::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempdir().unwrap();
        let err = ExtractOptions::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_values() {
        let opts = ExtractOptions { output_dir_name: "a/b".into(), ..Default::default() };
        assert!(opts.validate().is_err());

        let opts = ExtractOptions { output_dir_name: "..".into(), ..Default::default() };
        assert!(opts.validate().is_err());

        let opts = ExtractOptions { delimiter: Some('"'), ..Default::default() };
        assert!(opts.validate().is_err());

        let opts = ExtractOptions { delimiter: Some('é'), ..Default::default() };
        assert!(opts.validate().is_err());

        let opts = ExtractOptions { column_width: 1, ..Default::default() };
        assert!(opts.validate().is_err());
    }
}
