//! Fixed-width text rendering of a [`Table`] for the terminal.

use crate::models::Table;

const ELLIPSIS: char = '…';
const SEPARATOR: &str = " │ ";

/// Layout limits for [`render_table`].
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    /// Maximum number of data rows shown
    pub max_rows: usize,
    /// Width of every column, in characters
    pub column_width: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_rows: 20,
            column_width: 40,
        }
    }
}

/// Render `table` as aligned text: a header line, a rule, then the rows.
pub fn render_table(table: &Table, options: PreviewOptions) -> String {
    let width = options.column_width.max(2);
    let mut out = String::new();

    let headers: Vec<String> = table.columns.iter().map(|c| capitalize(c)).collect();
    push_line(&mut out, headers.iter().map(String::as_str), width);

    let rule_len = table.columns.len() * width + table.columns.len().saturating_sub(1) * SEPARATOR.chars().count();
    out.push_str(&"─".repeat(rule_len));
    out.push('\n');

    if table.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }

    for row in table.rows.iter().take(options.max_rows) {
        push_line(&mut out, table.row_values(row), width);
    }

    let hidden = table.len().saturating_sub(options.max_rows);
    if hidden > 0 {
        out.push_str(&format!("{} {} more rows\n", ELLIPSIS, hidden));
    }

    out
}

/// First character uppercased, the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pad or truncate `value` to exactly `width` characters on one line.
pub fn fit_cell(value: &str, width: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();

    let len = flat.chars().count();
    if len > width {
        let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
        cut.push(ELLIPSIS);
        cut
    } else {
        format!("{}{}", flat, " ".repeat(width - len))
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, width: usize) {
    let line: Vec<String> = cells.map(|c| fit_cell(c, width)).collect();
    out.push_str(line.join(SEPARATOR).trim_end());
    out.push('\n');
}
