//! Error types for the message extraction pipeline.
//!
//! - [`FormatError`] - input is not readable as tabular data
//! - [`ValidationError`] - required columns are missing
//! - [`LoadError`] - anything the loader can fail with
//! - [`ExtractError`] - filesystem failures while writing messages
//! - [`ConfigError`] - unreadable or invalid options file
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Conversion is automatic via `From` implementations, so `?` works
//! across layer boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Format Errors
// =============================================================================

/// The input could not be parsed as CSV.
///
/// `line` is 1-based and counts the header line; `0` means the failure is
/// not tied to a line (unreadable file, undecodable bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            0 => write!(f, "{}", self.message),
            line => write!(f, "Line {}: {}", line, self.message),
        }
    }
}

impl std::error::Error for FormatError {}

impl FormatError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Required columns are missing after header normalization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("CSV must have 'Category' and 'Message' columns.\n\nFound: {found:?}")]
    MissingColumns {
        /// Required names that were not found.
        missing: Vec<String>,
        /// Normalized names that were found, in header order.
        found: Vec<String>,
    },
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors returned by [`crate::loader::load`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Extraction Errors
// =============================================================================

/// Filesystem failures during extraction. Files written before the failure
/// are left in place.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Cannot create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write file '{}': {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Path of the directory or file that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ExtractError::CreateDir { path, .. } | ExtractError::WriteFile { path, .. } => path,
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while reading an options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid option '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::pipeline::extract_csv`].
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Could not process CSV:\n{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Could not process CSV:\n{0}")]
    Extract(#[from] ExtractError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl From<LoadError> for PipelineError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Format(e) => PipelineError::Format(e),
            LoadError::Validation(e) => PipelineError::Validation(e),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type FormatResult<T> = Result<T, FormatError>;

pub type LoadResult<T> = Result<T, LoadError>;

pub type ExtractResult<T> = Result<T, ExtractError>;

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type PipelineResult<T> = Result<T, PipelineError>;
