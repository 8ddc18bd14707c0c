//! Alignment between a matchplay name table and its colour mask.
//!
//! The sheet displays the matchplay order in one range and encodes each
//! player's placement per hole as 3/2/1 in a separate range further down.
//! The two ranges share columns but not rows: mask row `k` belongs to name
//! row `offset + k`, where `offset` is the first player row of the name table.
//! The offset is always an explicit [`PlayerRowOffset`] value so each table
//! instance states (and tests) where its players start.

use super::annotate::Tier;
use super::matrix::{Row, cell_at};
use serde::{Deserialize, Serialize};

/// First-column labels that belong to sub-header rows, never to players.
pub const RESERVED_LABELS: [&str; 6] = ["players", "player", "par", "s.i", "si", "hole"];

/// Consecutive name-like rows required before a detected offset is trusted.
pub const MIN_NAME_RUN: usize = 2;

/// Column E: the first hole column, where mask colours start.
pub const DEFAULT_FIRST_OVERLAY_COLUMN: usize = 4;

/// Whether a first-column cell reads like a player's name.
pub fn looks_like_name(cell: &str) -> bool {
    let value = cell.trim();
    if !value.chars().any(char::is_alphabetic) {
        return false;
    }
    let lower = value.to_lowercase();
    !RESERVED_LABELS.contains(&lower.as_str())
}

/// Where a [`PlayerRowOffset`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffsetSource {
    /// Found by scanning the name table.
    Detected,
    /// Detection failed; the layout's fallback was used.
    Fallback,
    /// Configured outright.
    Fixed,
}

/// Index of the first player row in a matchplay name table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerRowOffset {
    rows: usize,
    source: OffsetSource,
}

impl PlayerRowOffset {
    pub fn fixed(rows: usize) -> PlayerRowOffset {
        PlayerRowOffset {
            rows,
            source: OffsetSource::Fixed,
        }
    }

    /// Scan below the header row for the first run of at least `min_run`
    /// name-like rows.
    pub fn detect(rows: &[Row], min_run: usize) -> Option<PlayerRowOffset> {
        let min_run = min_run.max(1);
        let name_like: Vec<bool> = rows
            .iter()
            .map(|r| r.first().is_some_and(|c| looks_like_name(c)))
            .collect();

        (1..name_like.len())
            .find(|&start| {
                start + min_run <= name_like.len()
                    && name_like[start..start + min_run].iter().all(|&n| n)
            })
            .map(|start| PlayerRowOffset {
                rows: start,
                source: OffsetSource::Detected,
            })
    }

    /// Detect with [`MIN_NAME_RUN`], falling back to `fallback` rows.
    pub fn detect_or(rows: &[Row], fallback: usize) -> PlayerRowOffset {
        Self::detect(rows, MIN_NAME_RUN).unwrap_or(PlayerRowOffset {
            rows: fallback,
            source: OffsetSource::Fallback,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn source(&self) -> OffsetSource {
        self.source
    }
}

/// How a layout derives its [`PlayerRowOffset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetStrategy {
    Detect { fallback: usize },
    Fixed(usize),
}

impl OffsetStrategy {
    pub fn resolve(&self, name_rows: &[Row]) -> PlayerRowOffset {
        match *self {
            OffsetStrategy::Detect { fallback } => PlayerRowOffset::detect_or(name_rows, fallback),
            OffsetStrategy::Fixed(rows) => PlayerRowOffset::fixed(rows),
        }
    }
}

/// Mapping from name-table cells to mask-table cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskAlignment {
    pub offset: PlayerRowOffset,
    pub first_overlay_column: usize,
}

impl MaskAlignment {
    pub fn new(offset: PlayerRowOffset, first_overlay_column: usize) -> MaskAlignment {
        MaskAlignment {
            offset,
            first_overlay_column,
        }
    }

    /// Mask row for a name row. The header row and rows above the first
    /// player have none.
    pub fn mask_row(&self, name_row: usize) -> Option<usize> {
        if name_row == 0 {
            return None;
        }
        name_row.checked_sub(self.offset.rows())
    }

    /// Tier for a name-table cell; missing mask cells yield no tier.
    pub fn tier(&self, mask: &[Row], name_row: usize, col: usize) -> Option<Tier> {
        if col < self.first_overlay_column {
            return None;
        }
        let mask_row = self.mask_row(name_row)?;
        cell_at(mask, mask_row, col).and_then(Tier::from_mask)
    }
}
