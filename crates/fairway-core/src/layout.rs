//! Tournament layouts: which ranges of which sheet make up each page.
//!
//! Every round page is the same pipeline driven by a different
//! [`RoundLayout`]; the differences between rounds are data, not code.

use fairway_engine::engine::{
    CellRef, DEFAULT_FIRST_OVERLAY_COLUMN, OffsetStrategy, RangeSpec,
};
use serde::{Deserialize, Serialize};

/// Number of rounds in the built-in tournament.
pub const ROUND_COUNT: u8 = 6;

/// Player rows of the built-in matchplay name tables start below the title,
/// hole and par/S.I rows.
pub const MATCHPLAY_FALLBACK_OFFSET: usize = 4;

/// Role of a table on a round page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableRole {
    Score {
        #[serde(default)]
        medals: bool,
    },
    Overall,
    Matchplay {
        /// Range of the numeric placement mask on the same sheet.
        mask: RangeSpec,
        offset: OffsetStrategy,
        #[serde(default = "default_first_overlay_column")]
        first_overlay_column: usize,
    },
}

fn default_first_overlay_column() -> usize {
    DEFAULT_FIRST_OVERLAY_COLUMN
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub title: String,
    pub range: RangeSpec,
    pub role: TableRole,
}

/// The table set of one round page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLayout {
    pub round: u8,
    pub sheet: String,
    /// Rectangle requested from the export endpoint; every table range lies inside it.
    pub fetch_range: RangeSpec,
    pub tables: Vec<TableSpec>,
}

/// One cumulative standings table on the Overall sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallTableSpec {
    /// Shown once the current round reaches this value.
    pub round: u8,
    pub title: String,
    pub range: RangeSpec,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallLayout {
    pub sheet: String,
    pub fetch_range: RangeSpec,
    pub title_cell: CellRef,
    pub current_round_cell: CellRef,
    pub tables: Vec<OverallTableSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentLayout {
    pub rounds: Vec<RoundLayout>,
    pub overall: OverallLayout,
}

impl TournamentLayout {
    pub fn round(&self, round: u8) -> Option<&RoundLayout> {
        self.rounds.iter().find(|r| r.round == round)
    }

    pub fn max_round(&self) -> u8 {
        self.rounds.iter().map(|r| r.round).max().unwrap_or(0)
    }

    /// Sheet names referenced by any page.
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rounds.iter().map(|r| r.sheet.as_str()).collect();
        names.push(self.overall.sheet.as_str());
        names
    }
}

impl Default for TournamentLayout {
    fn default() -> Self {
        TournamentLayout {
            rounds: (1..=ROUND_COUNT).map(default_round_layout).collect(),
            overall: default_overall_layout(),
        }
    }
}

fn cell(letter: char, row_number: usize) -> CellRef {
    let col = letter.to_ascii_uppercase() as usize - 'A' as usize;
    CellRef::new(col, row_number.saturating_sub(1))
}

fn span(start: (char, usize), end: (char, usize)) -> RangeSpec {
    RangeSpec::spanning(cell(start.0, start.1), cell(end.0, end.1))
}

/// Column letter `offset` places right of `base`.
fn column_after(base: char, offset: u8) -> char {
    (base as u8 + offset) as char
}

/// Title of the cumulative standings shown on a round page.
pub fn standings_title(round: u8, final_round: u8) -> String {
    if round == final_round {
        "Final Overall Standings".to_string()
    } else {
        format!("After {} Rounds - Overall Standings", round)
    }
}

fn default_round_layout(round: u8) -> RoundLayout {
    let medals = round == ROUND_COUNT;
    let score = TableRole::Score { medals };

    let mut tables = vec![
        TableSpec {
            title: format!("Round {} - Results", round),
            range: span(('A', 6), ('D', 13)),
            role: score.clone(),
        },
        TableSpec {
            title: format!("Round {} - Strokes", round),
            range: span(('A', 22), ('W', 32)),
            role: score.clone(),
        },
        TableSpec {
            title: format!("Round {} - Net Scores", round),
            range: span(('A', 38), ('W', 48)),
            role: score.clone(),
        },
    ];

    if round == 2 || round == 5 {
        tables.push(TableSpec {
            title: format!("Round {} - Matchplay", round),
            range: span(('A', 54), ('V', 64)),
            role: TableRole::Matchplay {
                mask: span(('A', 111), ('V', 121)),
                offset: OffsetStrategy::Detect {
                    fallback: MATCHPLAY_FALLBACK_OFFSET,
                },
                first_overlay_column: DEFAULT_FIRST_OVERLAY_COLUMN,
            },
        });
    }

    if round >= 2 {
        // Position, arrow, player, one column per round, then TOTAL.
        let last = column_after('D', round);
        tables.push(TableSpec {
            title: standings_title(round, ROUND_COUNT),
            range: span(('A', 73), (last, 81)),
            role: score,
        });
    }

    RoundLayout {
        round,
        sheet: format!("Round{}", round),
        fetch_range: span(('A', 1), ('W', 130)),
        tables,
    }
}

fn default_overall_layout() -> OverallLayout {
    // (round, title, first row, last row); each table adds one round column.
    let specs = [
        (1u8, "ROUND 1", 4, 11),
        (2, "2 ROUNDS", 15, 23),
        (3, "3 ROUNDS", 27, 35),
        (4, "4 ROUNDS", 39, 47),
        (5, "5 ROUNDS", 51, 59),
        (6, "FINAL STANDINGS", 63, 71),
    ];
    let tables = specs
        .iter()
        .map(|&(round, title, first_row, last_row)| OverallTableSpec {
            round,
            title: title.to_string(),
            range: span(('A', first_row), (column_after('D', round), last_row)),
        })
        .collect();

    OverallLayout {
        sheet: "Overall".to_string(),
        fetch_range: span(('A', 1), ('J', 200)),
        title_cell: cell('A', 1),
        current_round_cell: cell('B', 1),
        tables,
    }
}
