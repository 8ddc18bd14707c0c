//! Rectangular ranges and slicing.

use super::cell_ref::CellRef;
use super::matrix::{Matrix, Row};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An inclusive rectangle between a top-left and a bottom-right cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    start: CellRef,
    end: CellRef,
}

impl RangeSpec {
    /// Build a range; `start` must be above-left of (or equal to) `end`.
    pub fn new(start: CellRef, end: CellRef) -> Result<RangeSpec, String> {
        if start.row > end.row || start.col > end.col {
            return Err(format!("Inverted range: {}:{}", start, end));
        }
        Ok(RangeSpec { start, end })
    }

    /// Range covering both cells, whichever corner is given first.
    pub fn spanning(a: CellRef, b: CellRef) -> RangeSpec {
        RangeSpec {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    pub fn start(&self) -> CellRef {
        self.start
    }

    pub fn end(&self) -> CellRef {
        self.end
    }

    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }
}

impl std::str::FromStr for RangeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((start, end)) = s.trim().split_once(':') else {
            return Err(format!("Expected 'START:END' range, got: {}", s));
        };
        RangeSpec::new(start.parse()?, end.parse()?)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl Serialize for RangeSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RangeSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Extract the inclusive sub-matrix covered by `range`.
///
/// Sheets are hand-edited and exports drop trailing empties, so missing rows
/// and short rows are padded with empty cells rather than treated as errors.
/// Every output row has exactly `range.width()` cells.
pub fn slice(matrix: &[Row], range: &RangeSpec) -> Matrix {
    let (start, end) = (range.start(), range.end());
    (start.row..=end.row)
        .map(|r| {
            let source = matrix.get(r).map(Vec::as_slice).unwrap_or(&[]);
            (start.col..=end.col)
                .map(|c| source.get(c).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Read the single cell at `cell`, if the sheet has it.
pub fn read_cell<'a>(matrix: &'a [Row], cell: &CellRef) -> Option<&'a str> {
    super::matrix::cell_at(matrix, cell.row, cell.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> RangeSpec {
        s.parse().unwrap()
    }

    fn sheet() -> Matrix {
        vec![
            vec!["a1".into(), "b1".into(), "c1".into()],
            vec!["a2".into()],
            vec!["a3".into(), "b3".into(), "c3".into(), "d3".into()],
        ]
    }

    #[test]
    fn test_parse_and_display() {
        let r = range("A1:W130");
        assert_eq!(r.start(), CellRef::new(0, 0));
        assert_eq!(r.end(), CellRef::new(22, 129));
        assert_eq!(r.width(), 23);
        assert_eq!(r.height(), 130);
        assert_eq!(r.to_string(), "A1:W130");
    }

    #[test]
    fn test_parse_rejects_inverted_and_malformed() {
        assert!("B2:A1".parse::<RangeSpec>().is_err());
        assert!("A1".parse::<RangeSpec>().is_err());
        assert!("A1:AA2".parse::<RangeSpec>().is_err());
    }

    #[test]
    fn test_spanning_orders_corners() {
        let r = RangeSpec::spanning(CellRef::new(3, 9), CellRef::new(0, 0));
        assert_eq!(r, range("A1:D10"));
    }

    #[test]
    fn test_slice_inner_block() {
        let out = slice(&sheet(), &range("B1:C3"));
        assert_eq!(
            out,
            vec![
                vec!["b1".to_string(), "c1".to_string()],
                vec![String::new(), String::new()],
                vec!["b3".to_string(), "c3".to_string()],
            ]
        );
    }

    #[test]
    fn test_slice_pads_missing_rows() {
        let out = slice(&sheet(), &range("A1:B5"));
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|r| r.len() == 2));
        assert_eq!(out[3], vec![String::new(), String::new()]);
        assert_eq!(out[4], vec![String::new(), String::new()]);
    }

    #[test]
    fn test_slice_entirely_out_of_range() {
        let out = slice(&sheet(), &range("X50:Z51"));
        assert_eq!(out, vec![vec![String::new(); 3]; 2]);
    }

    #[test]
    fn test_read_cell() {
        let m = sheet();
        assert_eq!(read_cell(&m, &CellRef::new(3, 2)), Some("d3"));
        assert_eq!(read_cell(&m, &CellRef::new(3, 1)), None);
    }
}
