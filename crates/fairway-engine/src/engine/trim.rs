//! Trimming of sliced tables.
//!
//! Fixed ranges are deliberately generous, so a slice usually carries empty
//! columns on the right and empty rows at the bottom. Only that trailing
//! emptiness is removed: leading structure and blank separator rows in the
//! middle of a table are part of its layout.

use super::matrix::{Matrix, Row, is_blank, is_blank_row};

/// Cut every row to the width of the right-most non-blank cell in the table.
/// A table with no data at all keeps its row count with zero-width rows.
pub fn trim_right(rows: &[Row]) -> Matrix {
    let width = rows
        .iter()
        .filter_map(|r| r.iter().rposition(|c| !is_blank(c)))
        .max()
        .map_or(0, |last| last + 1);

    rows.iter()
        .map(|r| r.iter().take(width).cloned().collect())
        .collect()
}

/// Drop trailing rows that are entirely blank.
pub fn trim_bottom(rows: &[Row]) -> Matrix {
    let end = rows
        .iter()
        .rposition(|r| !is_blank_row(r))
        .map_or(0, |last| last + 1);
    rows[..end].to_vec()
}

/// Right-trim then bottom-trim.
pub fn normalize(rows: &[Row]) -> Matrix {
    trim_bottom(&trim_right(rows))
}

/// Whether any row after `header_row` has a non-blank cell.
pub fn has_data(rows: &[Row], header_row: usize) -> bool {
    rows.iter()
        .skip(header_row + 1)
        .any(|r| !is_blank_row(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[&str]]) -> Matrix {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_trim_right_keeps_width_of_widest_data() {
        let out = trim_right(&m(&[&["x", "", "y", "", ""], &["", "", "", "", ""]]));
        assert_eq!(out, m(&[&["x", "", "y"], &["", "", ""]]));
    }

    #[test]
    fn test_trim_right_leaves_short_rows_short() {
        let out = trim_right(&m(&[&["a"], &["b", "c", ""]]));
        assert_eq!(out, m(&[&["a"], &["b", "c"]]));
    }

    #[test]
    fn test_trim_right_all_blank_preserves_row_count() {
        let out = trim_right(&m(&[&["", " "], &[""]]));
        assert_eq!(out, vec![Vec::<String>::new(), Vec::new()]);
    }

    #[test]
    fn test_trim_bottom_only_removes_trailing_rows() {
        let out = trim_bottom(&m(&[&["a"], &[""], &["b"], &[""], &[""]]));
        assert_eq!(out, m(&[&["a"], &[""], &["b"]]));
    }

    #[test]
    fn test_trim_bottom_keeps_leading_blank_rows() {
        let out = trim_bottom(&m(&[&[""], &["a"]]));
        assert_eq!(out, m(&[&[""], &["a"]]));
    }

    #[test]
    fn test_trim_bottom_all_blank() {
        assert!(trim_bottom(&m(&[&[""], &[""]])).is_empty());
    }

    #[test]
    fn test_has_data() {
        let header_only = m(&[&["Pos", "Name"], &["", ""], &["", ""]]);
        assert!(!has_data(&header_only, 0));

        let with_one_cell = m(&[&["Pos", "Name"], &["", ""], &["", "Alice"]]);
        assert!(has_data(&with_one_cell, 0));

        assert!(!has_data(&with_one_cell, 2));
        assert!(!has_data(&[], 0));
    }
}
