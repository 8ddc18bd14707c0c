//! Tabular data as decoded from a sheet.

/// One row of trimmed cell text.
pub type Row = Vec<String>;

/// Rows in source order; columns in source order; indices are zero-based.
pub type Matrix = Vec<Row>;

/// A cell is blank when it is empty after trimming.
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| is_blank(c))
}

/// Read a cell, distinguishing "outside the matrix" (`None`) from an
/// intentionally blank cell (`Some("")`).
pub fn cell_at(matrix: &[Row], row: usize, col: usize) -> Option<&str> {
    matrix.get(row)?.get(col).map(String::as_str)
}
