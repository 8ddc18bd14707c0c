//! Logical tables: named, trimmed sub-tables of a sheet.

use super::annotate::Tier;
use super::header::HeaderInfo;
use super::matchplay::MaskAlignment;
use super::matrix::{Matrix, Row};
use super::range::{RangeSpec, slice};
use super::trim::{has_data, normalize};

/// Colour source for a matchplay table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchplayOverlay {
    /// Numeric mask sliced from elsewhere on the sheet, aligned by row offset.
    Mask {
        mask: Matrix,
        alignment: MaskAlignment,
    },
    /// Per-cell tiers already resolved upstream (legacy JSON backend).
    Resolved(Vec<Vec<Option<Tier>>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// Round tables: header on row 0, trend arrows, optional rank medals.
    Score { medals: bool },
    /// Cumulative standings: detected header row and total column.
    Overall,
    /// Matchplay order with a placement colour overlay.
    Matchplay(MatchplayOverlay),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalTable {
    pub title: String,
    pub rows: Matrix,
    pub kind: TableKind,
}

impl LogicalTable {
    /// Wrap already-sliced rows; they are trimmed here.
    pub fn new(title: impl Into<String>, rows: &[Row], kind: TableKind) -> LogicalTable {
        LogicalTable {
            title: title.into(),
            rows: normalize(rows),
            kind,
        }
    }

    /// Slice `range` out of a sheet and trim it.
    pub fn from_sheet(
        title: impl Into<String>,
        sheet: &[Row],
        range: &RangeSpec,
        kind: TableKind,
    ) -> LogicalTable {
        LogicalTable::new(title, &slice(sheet, range), kind)
    }

    pub fn header_info(&self) -> HeaderInfo {
        match self.kind {
            TableKind::Overall => HeaderInfo::locate(&self.rows),
            _ => HeaderInfo {
                header_row: 0,
                total_column: None,
            },
        }
    }

    /// Whether the table has anything below its header worth showing.
    pub fn has_data(&self) -> bool {
        has_data(&self.rows, self.header_info().header_row)
    }
}
