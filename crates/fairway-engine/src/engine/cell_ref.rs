//! Cell reference parsing and formatting.
//!
//! Converts spreadsheet-style addresses (e.g. "A1", "W130") to zero-indexed
//! row/column coordinates and back. Only single-letter columns (A-Z) are
//! addressable: every sheet layout in a tournament fits within column Z, and a
//! multi-letter column is rejected instead of being silently mis-translated.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("E6").unwrap();
//! assert_eq!(cell.col, 4);  // 0-indexed
//! assert_eq!(cell.row, 5);
//! assert_eq!(cell.to_string(), "E6");
//! ```

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

static A1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("valid A1 pattern")
});

/// Zero-based column index for a single column letter (A -> 0, Z -> 25).
pub fn column_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some((upper as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Zero-based row index for a 1-based sheet row number. Row 0 does not exist.
pub fn row_index(number: usize) -> Option<usize> {
    number.checked_sub(1)
}

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "W130").
    /// Returns None if the input is invalid or uses a multi-letter column.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name).ok()
    }

    fn parse_a1(name: &str) -> Result<CellRef, String> {
        let caps = A1_PATTERN
            .captures(name.trim())
            .ok_or_else(|| format!("Invalid cell reference: {}", name))?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut chars = letters.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return Err(format!(
                "Invalid cell reference: {} (multi-letter columns are not supported)",
                name
            ));
        };
        let col = column_index(letter).ok_or_else(|| format!("Invalid column in {}", name))?;

        let number = numbers
            .parse::<usize>()
            .map_err(|_| format!("Invalid row in {}", name))?;
        let row = row_index(number).ok_or_else(|| format!("Row numbers start at 1: {}", name))?;

        Ok(CellRef::new(col, row))
    }

    /// Convert a column index to its letter (0 -> A, 25 -> Z).
    pub fn col_to_letter(col: usize) -> Option<char> {
        if col < 26 {
            Some((b'A' + col as u8) as char)
        } else {
            None
        }
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::col_to_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, self.row + 1),
            None => write!(f, "C{}R{}", self.col + 1, self.row + 1),
        }
    }
}

impl Serialize for CellRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_and_row_index() {
        assert_eq!(column_index('A'), Some(0));
        assert_eq!(column_index('E'), Some(4));
        assert_eq!(column_index('e'), Some(4));
        assert_eq!(column_index('Z'), Some(25));
        assert_eq!(column_index('1'), None);
        assert_eq!(row_index(1), Some(0));
        assert_eq!(row_index(130), Some(129));
        assert_eq!(row_index(0), None);
    }

    #[test]
    fn test_multi_letter_column_is_rejected() {
        assert!(CellRef::from_str("AA1").is_none());
        let err = "AB3".parse::<CellRef>().unwrap_err();
        assert!(err.contains("multi-letter"));
    }

    #[test]
    fn test_display_round_trips_single_letters() {
        let cell = CellRef::new(22, 129);
        assert_eq!(cell.to_string(), "W130");
        assert_eq!(CellRef::from_str("W130"), Some(cell));
    }
}
