//! # msgextract - split a category/message CSV into text files
//!
//! Reads a CSV with `category` and `message` columns (header match is
//! case- and whitespace-insensitive) and writes every message to its own
//! file, grouped by category:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────────────────────────────┐
//! │   CSV File  │────▶│   Loader    │────▶│  Extracted_Messages/<category>/          │
//! │  (any enc)  │     │ (validated) │     │      message_<n>.txt                     │
//! └─────────────┘     └─────────────┘     └──────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use msgextract::{load, extract};
//! use std::path::Path;
//!
//! let path = Path::new("inbox.csv");
//! let table = load(path)?;
//! let result = extract(&table, path)?;
//! println!("{} messages extracted to {}", result.count, result.root.display());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error hierarchy
//! - [`models`] - Row, Table, ExtractionResult
//! - [`parser`] - CSV parsing with encoding/delimiter detection
//! - [`validation`] - Header normalization and required columns
//! - [`loader`] - File -> validated Table
//! - [`extract`] - Table -> files on disk
//! - [`pipeline`] - Load + extract with progress logs
//! - [`preview`] - Terminal table rendering
//! - [`config`] - Run options
//! - [`logs`] - Progress log entries

// Core modules
pub mod error;
pub mod models;
pub mod config;
pub mod logs;

// Loading
pub mod parser;
pub mod validation;
pub mod loader;

// Extraction
pub mod extract;
pub mod pipeline;

// Presentation
pub mod preview;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    ConfigError,
    ExtractError,
    FormatError,
    LoadError,
    PipelineError,
    ValidationError,
};

// =============================================================================
// Re-exports - Models and options
// =============================================================================

pub use models::{CsvInfo, ExtractionResult, Row, Table};

pub use config::{CategoryPolicy, ExtractOptions, DEFAULT_OUTPUT_DIR_NAME};

// =============================================================================
// Re-exports - Loader / Extractor
// =============================================================================

pub use loader::{load, load_bytes, load_with, LoadedCsv};

pub use validation::{normalize_column_name, validate_columns, CATEGORY_COLUMN, MESSAGE_COLUMN};

pub use extract::{extract, extract_with, sanitize_category};

// =============================================================================
// Re-exports - Pipeline / Preview
// =============================================================================

pub use pipeline::{extract_csv, load_csv, PipelineResult};

pub use preview::{render_table, PreviewOptions};
