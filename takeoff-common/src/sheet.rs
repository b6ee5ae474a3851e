//! Quantity sheet model and markdown-table parsing
//!
//! Generative models return takeoff results as a GitHub-flavored markdown
//! table embedded in free-form prose. [`parse_markdown_table`] extracts the
//! table into a [`Sheet`]: named columns plus rows of string cells. Cells
//! stay strings at this layer; interpreting measurements is the consumer's
//! job.

use serde::{Deserialize, Serialize};

/// An ordered set of named columns and string-cell rows.
///
/// Column names are not required to be unique. Every row holds exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create a sheet from a header and raw rows, normalizing every row to
    /// the header width: short rows are padded with empty cells, long rows
    /// truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// True when the sheet has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the sheet back to a markdown pipe table.
    ///
    /// Re-parsing the rendering yields an equal sheet:
    ///
    /// ```
    /// use takeoff_common::sheet::{parse_markdown_table, Sheet};
    ///
    /// let sheet = Sheet::new(
    ///     vec!["Element".into(), "Qty".into()],
    ///     vec![vec!["Beam".into(), "4".into()]],
    /// );
    /// let round_tripped = parse_markdown_table(&sheet.to_markdown()).unwrap();
    /// assert_eq!(round_tripped, sheet);
    /// ```
    pub fn to_markdown(&self) -> String {
        let separator: Vec<String> = self.columns.iter().map(|_| "---".to_string()).collect();

        let mut out = String::new();
        out.push_str(&render_line(&self.columns));
        out.push('\n');
        out.push_str(&render_line(&separator));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&render_line(row));
        }

        out
    }
}

fn render_line(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Extract the first markdown table from free-form text.
///
/// Lines whose first non-whitespace character is `|` are treated as table
/// lines. The first is the header, the second is assumed to be the dash
/// separator and skipped, and every later non-blank table line becomes a
/// row. Returns `None` when fewer than two table lines are present — empty
/// input, prose without a table, and a lone header line are all "no table
/// found", never an error.
///
/// ```
/// use takeoff_common::sheet::parse_markdown_table;
///
/// let text = "| Element | Qty |\n|---|---|\n| Beam | 4 |\n| Column | 8 |";
/// let sheet = parse_markdown_table(text).unwrap();
///
/// assert_eq!(sheet.columns, vec!["Element", "Qty"]);
/// assert_eq!(sheet.rows, vec![
///     vec!["Beam".to_string(), "4".to_string()],
///     vec!["Column".to_string(), "8".to_string()],
/// ]);
/// ```
pub fn parse_markdown_table(text: &str) -> Option<Sheet> {
    let table_lines: Vec<&str> = text
        .lines()
        .filter(|line| line.trim_start().starts_with('|'))
        .collect();

    if table_lines.len() < 2 {
        return None;
    }

    let columns = split_row(table_lines[0]);
    if columns.is_empty() {
        return None;
    }

    // table_lines[1] is the header/body separator; everything after it is data.
    let rows: Vec<Vec<String>> = table_lines[2..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_row(line))
        .collect();

    Some(Sheet::new(columns, rows))
}

/// Split a pipe-delimited line into trimmed cells, dropping the empty
/// fragments produced by the outer pipes.
fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    if line.trim().is_empty() {
        return Vec::new();
    }

    line.split('|').map(|cell| cell.trim().to_string()).collect()
}
