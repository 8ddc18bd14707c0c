//! Presentation metadata for table cells.
//!
//! Every rule here is a pure classification of cell text (or of an aligned
//! mask cell). Renderers decide what a [`Trend`] or [`Tier`] looks like.

use super::header::HeaderInfo;
use super::table::{LogicalTable, MatchplayOverlay, TableKind};

/// Rank movement since the previous round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Unchanged,
}

/// Placement tier shared by rank medals and matchplay colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    /// Parse a resolved colour tag ("gold", "silver", "bronze").
    pub fn from_tag(tag: &str) -> Option<Tier> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "gold" => Some(Tier::Gold),
            "silver" => Some(Tier::Silver),
            "bronze" => Some(Tier::Bronze),
            _ => None,
        }
    }

    /// Parse a numeric mask value ("3" best, "1" third).
    pub fn from_mask(value: &str) -> Option<Tier> {
        match value.trim() {
            "3" => Some(Tier::Gold),
            "2" => Some(Tier::Silver),
            "1" => Some(Tier::Bronze),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Gold => "gold",
            Tier::Silver => "silver",
            Tier::Bronze => "bronze",
        }
    }
}

/// Glyphs the sheet uses for "moved up"; the block arrow and plain arrow are equivalent.
pub const UP_MARKERS: [char; 2] = ['\u{2B06}', '\u{2191}'];
/// Glyphs the sheet uses for "moved down".
pub const DOWN_MARKERS: [char; 2] = ['\u{2B07}', '\u{2193}'];

/// Column holding the player name on leaderboard tables; gold rows crown it.
pub const CHAMPION_COLUMN: usize = 2;

/// Classify a cell's trend arrow.
///
/// The sheet writes "no change" as both arrows stacked, so the presence of
/// both has to win over the presence of either.
pub fn classify_trend(text: &str) -> Option<Trend> {
    let value = text.trim();
    let up = value.contains(&UP_MARKERS[..]);
    let down = value.contains(&DOWN_MARKERS[..]);

    match (up, down) {
        (true, true) => Some(Trend::Unchanged),
        (true, false) => Some(Trend::Up),
        (false, true) => Some(Trend::Down),
        (false, false) if value == "-" || value == "\u{2013}" => Some(Trend::Unchanged),
        (false, false) => None,
    }
}

/// Medal tier from a row's rank cell ("1ST", "=2ND", ...).
pub fn classify_medal(rank: &str) -> Option<Tier> {
    let rank = rank.trim().to_uppercase();
    match rank.strip_prefix('=').unwrap_or(rank.as_str()) {
        "1ST" => Some(Tier::Gold),
        "2ND" => Some(Tier::Silver),
        "3RD" => Some(Tier::Bronze),
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub header: bool,
    pub trend: Option<Trend>,
    pub matchplay: Option<Tier>,
    /// Cell sits in the running-total column.
    pub total: bool,
    /// Zebra stripe on every second data row.
    pub alternate: bool,
    /// Champion marker (name cell of a gold row).
    pub champion: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedCell {
    pub text: String,
    pub style: CellStyle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedRow {
    pub header: bool,
    pub medal: Option<Tier>,
    pub cells: Vec<AnnotatedCell>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedTable {
    pub title: String,
    pub header: HeaderInfo,
    pub rows: Vec<AnnotatedRow>,
}

impl AnnotatedTable {
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// Classify every cell of a logical table according to its kind.
pub fn annotate(table: &LogicalTable) -> AnnotatedTable {
    let header = table.header_info();
    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let is_header = i == header.header_row;
            let medal = match table.kind {
                TableKind::Score { medals: true } if !is_header => {
                    row.first().and_then(|c| classify_medal(c))
                }
                _ => None,
            };

            let cells = row
                .iter()
                .enumerate()
                .map(|(j, text)| AnnotatedCell {
                    text: text.clone(),
                    style: cell_style(table, &header, medal, i, j, text),
                })
                .collect();

            AnnotatedRow {
                header: is_header,
                medal,
                cells,
            }
        })
        .collect();

    AnnotatedTable {
        title: table.title.clone(),
        header,
        rows,
    }
}

fn cell_style(
    table: &LogicalTable,
    header: &HeaderInfo,
    medal: Option<Tier>,
    row: usize,
    col: usize,
    text: &str,
) -> CellStyle {
    if row == header.header_row {
        return CellStyle {
            header: true,
            total: matches!(table.kind, TableKind::Overall) && header.total_column == Some(col),
            ..CellStyle::default()
        };
    }

    match &table.kind {
        TableKind::Score { .. } => CellStyle {
            trend: classify_trend(text),
            champion: medal == Some(Tier::Gold) && col == CHAMPION_COLUMN,
            ..CellStyle::default()
        },
        TableKind::Overall => {
            let is_data = row > header.header_row;
            CellStyle {
                total: header.total_column == Some(col),
                alternate: is_data && (row - header.header_row) % 2 == 0,
                ..CellStyle::default()
            }
        }
        TableKind::Matchplay(overlay) => CellStyle {
            matchplay: match overlay {
                MatchplayOverlay::Mask { mask, alignment } => alignment.tier(mask, row, col),
                MatchplayOverlay::Resolved(colors) => {
                    colors.get(row).and_then(|r| r.get(col)).copied().flatten()
                }
            },
            ..CellStyle::default()
        },
    }
}

/// Text of a single annotated cell, if present.
pub fn annotated_text(table: &AnnotatedTable, row: usize, col: usize) -> Option<&str> {
    table
        .rows
        .get(row)
        .and_then(|r| r.cells.get(col))
        .map(|c| c.text.as_str())
}
