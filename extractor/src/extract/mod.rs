//! Extractor: write each row's message into a per-category folder.
//!
//! ```text
//! <source_dir>/Extracted_Messages/<category>/message_<n>.txt
//! ```
//!
//! `n` is a single 1-based counter over the whole table, not per folder.
//! Existing directories are reused and existing files overwritten. The
//! first filesystem failure aborts the run; files already written stay.

pub mod sanitize;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CategoryPolicy, ExtractOptions, DEFAULT_OUTPUT_DIR_NAME};
use crate::error::{ExtractError, ExtractResult};
use crate::logs::{log_info_indent, log_warning};
use crate::models::{ExtractionResult, Table};
use crate::validation::{CATEGORY_COLUMN, MESSAGE_COLUMN};

pub use sanitize::sanitize_category;

/// Extract with default options (`Extracted_Messages`, literal categories).
pub fn extract(table: &Table, source_path: &Path) -> ExtractResult<ExtractionResult> {
    extract_with(table, source_path, &ExtractOptions::default())
}

/// Extract `table` next to `source_path` using `options`.
pub fn extract_with(
    table: &Table,
    source_path: &Path,
    options: &ExtractOptions,
) -> ExtractResult<ExtractionResult> {
    let root = output_root(source_path, &options.output_dir_name);
    create_dir(&root)?;

    let mut count = 0;
    for row in &table.rows {
        let category = row.get(CATEGORY_COLUMN).trim();
        let message = row.get(MESSAGE_COLUMN).trim();

        if category.is_empty() && options.category_policy == CategoryPolicy::Literal {
            log_warning(format!(
                "Row {} has no category, writing into {}",
                count + 1,
                root.display()
            ));
        }

        let folder = category_folder(&root, category, options.category_policy);
        create_dir(&folder)?;

        count += 1;
        let path = folder.join(message_file_name(count));
        fs::write(&path, message).map_err(|source| ExtractError::WriteFile {
            path: path.clone(),
            source,
        })?;

        log_info_indent(format!("{} -> {}", category, path.display()), 1);
    }

    Ok(ExtractionResult {
        count,
        root: fs::canonicalize(&root).unwrap_or(root),
    })
}

/// Sibling directory of `source_path` named `dir_name`.
pub fn output_root(source_path: &Path, dir_name: &str) -> PathBuf {
    let dir_name = if dir_name.is_empty() { DEFAULT_OUTPUT_DIR_NAME } else { dir_name };

    match source_path.parent() {
        Some(parent) => parent.join(dir_name),
        None => PathBuf::from(dir_name),
    }
}

/// Folder for `category` under `root`.
///
/// With [`CategoryPolicy::Literal`] the category is joined as-is, so an
/// empty category maps to `root` itself.
pub fn category_folder(root: &Path, category: &str, policy: CategoryPolicy) -> PathBuf {
    match policy {
        CategoryPolicy::Literal => root.join(category),
        CategoryPolicy::Sanitize => root.join(sanitize_category(category)),
    }
}

/// `message_<n>.txt`
pub fn message_file_name(n: usize) -> String {
    format!("message_{}.txt", n)
}

fn create_dir(path: &Path) -> ExtractResult<()> {
    fs::create_dir_all(path).map_err(|source| ExtractError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
