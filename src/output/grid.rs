//! Column layouts for the short listing modes.
//!
//! All layouts take names that are already sorted and return finished lines.
//! Every cell is padded to a common column width; the last cell on a line is
//! not padded, so lines carry no trailing whitespace. An empty batch yields
//! no lines at all.

use std::io::IsTerminal;
use unicode_width::UnicodeWidthStr;

/// Width used when stdout is not a terminal and no width was configured.
pub const FALLBACK_WIDTH: usize = 80;

/// Blank columns between two grid cells.
pub const COLUMN_SPACING: usize = 2;

/// Resolves the layout width once per run.
///
/// An explicit width wins, then a numeric `COLUMNS`, then the width of
/// stdout when it is a terminal, and [`FALLBACK_WIDTH`] otherwise.
pub fn terminal_width(configured: Option<usize>) -> usize {
    let columns = std::env::var("COLUMNS").ok();
    let terminal = if std::io::stdout().is_terminal() {
        term_size::dimensions_stdout().map(|(w, _)| w)
    } else {
        None
    };
    resolve_width(configured, columns.as_deref(), terminal)
}

/// Picks the first usable width from the available sources.
///
/// Zero widths and a non-numeric `COLUMNS` value are ignored.
pub fn resolve_width(
    configured: Option<usize>,
    columns: Option<&str>,
    terminal: Option<usize>,
) -> usize {
    configured
        .filter(|w| *w > 0)
        .or_else(|| columns.and_then(|c| c.trim().parse::<usize>().ok()).filter(|w| *w > 0))
        .or_else(|| terminal.filter(|w| *w > 0))
        .unwrap_or(FALLBACK_WIDTH)
}

/// Printed width of a name in terminal columns.
pub fn display_width(name: &str) -> usize {
    UnicodeWidthStr::width(name)
}

/// Number of grid columns that fit `width`, never less than one.
pub fn column_count(max_name_width: usize, width: usize) -> usize {
    let col_width = max_name_width + COLUMN_SPACING;
    (width / col_width).max(1)
}

fn max_width<S: AsRef<str>>(names: &[S]) -> usize {
    names
        .iter()
        .map(|n| display_width(n.as_ref()))
        .max()
        .unwrap_or(0)
}

fn join_row(cells: &[&str], col_width: usize) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        line.push_str(cell);
        if i + 1 < cells.len() {
            let pad = col_width.saturating_sub(display_width(cell));
            line.extend(std::iter::repeat_n(' ', pad));
        }
    }
    line
}

/// Grid filled top-to-bottom within a column, then column by column.
///
/// For row `r` and column `c` the entry shown is `names[c * rows + r]`.
pub fn down_then_across<S: AsRef<str>>(names: &[S], width: usize) -> Vec<String> {
    if names.is_empty() {
        return Vec::new();
    }
    let col_width = max_width(names) + COLUMN_SPACING;
    let cols = column_count(max_width(names), width);
    let rows = names.len().div_ceil(cols);

    (0..rows)
        .map(|r| {
            let cells: Vec<&str> = (0..cols)
                .map(|c| c * rows + r)
                .take_while(|&idx| idx < names.len())
                .map(|idx| names[idx].as_ref())
                .collect();
            join_row(&cells, col_width)
        })
        .collect()
}

/// Grid filled left-to-right, wrapping once the next cell would not fit.
pub fn across<S: AsRef<str>>(names: &[S], width: usize) -> Vec<String> {
    if names.is_empty() {
        return Vec::new();
    }
    let col_width = max_width(names) + COLUMN_SPACING;
    let cols = column_count(max_width(names), width);

    names
        .chunks(cols)
        .map(|chunk| {
            let cells: Vec<&str> = chunk.iter().map(|n| n.as_ref()).collect();
            join_row(&cells, col_width)
        })
        .collect()
}

/// One name per line.
pub fn single_column<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names.iter().map(|n| n.as_ref().to_string()).collect()
}
