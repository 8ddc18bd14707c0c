//! Header row and "total" column detection.

use super::matrix::Row;

/// How many leading rows may hold the header (a title row can precede it).
pub const HEADER_SCAN_ROWS: usize = 3;

/// Location of the header row and the running-total column in a trimmed table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderInfo {
    pub header_row: usize,
    pub total_column: Option<usize>,
}

impl HeaderInfo {
    pub fn locate(rows: &[Row]) -> HeaderInfo {
        let header_row = locate_header(rows);
        let total_column = rows.get(header_row).and_then(|r| locate_total_column(r));
        HeaderInfo {
            header_row,
            total_column,
        }
    }
}

fn is_header_marker(cell: &str) -> bool {
    let lower = cell.trim().to_lowercase();
    lower.starts_with("round") || lower == "total"
}

fn is_total_label(cell: &str) -> bool {
    cell.trim().eq_ignore_ascii_case("total")
}

/// First row among the leading few with a "Round…" or "Total" cell.
/// Falls back to row 0 when none qualifies.
pub fn locate_header(rows: &[Row]) -> usize {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|r| r.iter().any(|c| is_header_marker(c)))
        .unwrap_or(0)
}

/// Index of the first cell labelled "Total".
pub fn locate_total_column(header: &[String]) -> Option<usize> {
    header.iter().position(|c| is_total_label(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[&str]]) -> Vec<Row> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_found_on_round_prefix() {
        let rows = m(&[
            &["AFTER 2 ROUNDS", "", ""],
            &["Pos", "Player", "ROUND 1", "Round 2", "TOTAL"],
            &["1ST", "Alice", "36", "38", "74"],
        ]);
        let info = HeaderInfo::locate(&rows);
        assert_eq!(info.header_row, 1);
        assert_eq!(info.total_column, Some(4));
    }

    #[test]
    fn test_round_prefix_in_title_row_wins() {
        // "Round 1 Results" starts with "round" so row 0 qualifies first.
        let rows = m(&[
            &["", "Round 1 Results"],
            &["Pos", "Name", "Score"],
            &["1", "Alice", "70"],
        ]);
        assert_eq!(locate_header(&rows), 0);
    }

    #[test]
    fn test_header_defaults_to_row_zero() {
        let rows = m(&[
            &["Results"],
            &["Pos", "Name", "Score"],
            &["1", "Alice", "70"],
        ]);
        assert_eq!(locate_header(&rows), 0);
        assert_eq!(HeaderInfo::locate(&rows).total_column, None);
    }

    #[test]
    fn test_header_scan_is_limited_to_three_rows() {
        let rows = m(&[&["a"], &["b"], &["c"], &["Total"]]);
        assert_eq!(locate_header(&rows), 0);
    }

    #[test]
    fn test_total_must_match_exactly() {
        assert_eq!(locate_total_column(&m(&[&["Totals", " total "]])[0]), Some(1));
        assert_eq!(locate_total_column(&m(&[&["Subtotal"]])[0]), None);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(HeaderInfo::locate(&[]), HeaderInfo::default());
    }
}
