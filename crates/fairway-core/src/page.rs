//! Page assembly: turn one fetched sheet into the annotated tables of a page.

use crate::layout::{OverallLayout, RoundLayout, TableRole, TableSpec};
use fairway_engine::engine::{
    AnnotatedTable, LogicalTable, MaskAlignment, MatchplayOverlay, Row, TableKind, annotate,
    normalize, read_cell, slice,
};
use std::fmt;
use std::str::FromStr;

/// A navigable page of the leaderboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageId {
    Round(u8),
    Overall,
}

impl PageId {
    /// Every page in tab order: the rounds, then Overall.
    pub fn all(max_round: u8) -> Vec<PageId> {
        (1..=max_round)
            .map(PageId::Round)
            .chain(std::iter::once(PageId::Overall))
            .collect()
    }

    /// Human-readable label, as shown on tabs.
    pub fn label(&self) -> String {
        match self {
            PageId::Round(n) => format!("Round {}", n),
            PageId::Overall => "Overall".to_string(),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Round(n) => write!(f, "round{}", n),
            PageId::Overall => write!(f, "overall"),
        }
    }
}

impl FromStr for PageId {
    type Err = String;

    /// Accepts `overall`, `round3`, `round 3` or a bare `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "overall" {
            return Ok(PageId::Overall);
        }
        let digits = lower.strip_prefix("round").unwrap_or(&lower).trim();
        match digits.parse::<u8>() {
            Ok(n) if n >= 1 => Ok(PageId::Round(n)),
            _ => Err(format!(
                "Unknown page '{}' (expected 'overall' or 'roundN')",
                s.trim()
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub subtitle: Option<String>,
    pub tables: Vec<AnnotatedTable>,
}

/// Slice, trim and annotate every table of a round.
///
/// Empty tables are kept so the page can say "No data" in their place.
pub fn build_round_page(layout: &RoundLayout, sheet: &[Row]) -> Page {
    let tables = layout
        .tables
        .iter()
        .map(|spec| annotate(&round_table(spec, sheet)))
        .collect();

    Page {
        id: PageId::Round(layout.round),
        title: format!("Round {}", layout.round),
        subtitle: None,
        tables,
    }
}

fn round_table(spec: &TableSpec, sheet: &[Row]) -> LogicalTable {
    match &spec.role {
        TableRole::Score { medals } => LogicalTable::from_sheet(
            spec.title.as_str(),
            sheet,
            &spec.range,
            TableKind::Score { medals: *medals },
        ),
        TableRole::Overall => {
            LogicalTable::from_sheet(spec.title.as_str(), sheet, &spec.range, TableKind::Overall)
        }
        TableRole::Matchplay {
            mask,
            offset,
            first_overlay_column,
        } => {
            let names = normalize(&slice(sheet, &spec.range));
            let mask_rows = normalize(&slice(sheet, mask));
            let offset = offset.resolve(&names);
            log::debug!(
                "{}: players start at row {} ({:?})",
                spec.title,
                offset.rows(),
                offset.source()
            );
            let overlay = MatchplayOverlay::Mask {
                mask: mask_rows,
                alignment: MaskAlignment::new(offset, *first_overlay_column),
            };
            LogicalTable::new(spec.title.as_str(), &names, TableKind::Matchplay(overlay))
        }
    }
}

/// Integer prefix of `raw`, in the spirit of a lenient `parseInt`:
/// leading whitespace and one sign are allowed, and anything without
/// leading digits is 0.
pub fn leading_integer(raw: &str) -> i64 {
    let text = raw.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    // Overlong digit runs saturate.
    let value = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative { -value } else { value }
}

/// Round the Overall sheet says is current, clamped to `0..=max_round`.
pub fn current_round(layout: &OverallLayout, sheet: &[Row], max_round: u8) -> u8 {
    let raw = read_cell(sheet, &layout.current_round_cell).unwrap_or("");
    leading_integer(raw).clamp(0, i64::from(max_round)) as u8
}

/// Cumulative standings up to the current round, latest first.
pub fn build_overall_page(layout: &OverallLayout, sheet: &[Row], max_round: u8) -> Page {
    let title = read_cell(sheet, &layout.title_cell)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Overall")
        .to_string();

    let current = current_round(layout, sheet, max_round);

    let mut visible: Vec<_> = layout.tables.iter().filter(|t| t.round <= current).collect();
    visible.sort_by(|a, b| b.round.cmp(&a.round));

    let tables = visible
        .into_iter()
        .map(|t| LogicalTable::from_sheet(t.title.as_str(), sheet, &t.range, TableKind::Overall))
        .filter(|t| {
            let keep = t.has_data();
            if !keep {
                log::debug!("Skipping empty overall table {}", t.title);
            }
            keep
        })
        .map(|t| annotate(&t))
        .collect();

    let shown = if current == 0 {
        "\u{2014}".to_string()
    } else {
        current.to_string()
    };

    Page {
        id: PageId::Overall,
        title,
        subtitle: Some(format!("Showing tables up to round: {}", shown)),
        tables,
    }
}
