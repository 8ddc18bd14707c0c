//! CSV decoding for sheet exports.
//!
//! Exports arrive as RFC-4180-ish text: quoted fields may hold commas, line
//! breaks and doubled quotes. Hand-edited sheets occasionally export an
//! unterminated quote; the rest of the text then simply stays inside that field.

use super::matrix::{Matrix, Row};

/// Decode CSV text into a matrix of trimmed cells.
///
/// The last cell and row are always flushed, so text ending with a line break
/// yields one trailing blank row.
pub fn decode_csv(text: &str) -> Matrix {
    let mut rows: Matrix = Vec::new();
    let mut row: Row = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // Escaped quote
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                row.push(finish_cell(&mut current));
            }
            '\n' | '\r' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(finish_cell(&mut current));
                rows.push(std::mem::take(&mut row));
            }
            _ => current.push(c),
        }
    }

    row.push(finish_cell(&mut current));
    rows.push(row);
    rows
}

fn finish_cell(current: &mut String) -> String {
    let cell = current.trim().to_string();
    current.clear();
    cell
}
