//! Client for the legacy JSON backend (`/api/roundN`).
//!
//! The backend slices the sheet itself and resolves matchplay colours to
//! tags, so its tables skip the positional mask alignment.

use crate::error::{FairwayError, Result};
use crate::fetch::Transport;
use crate::layout::standings_title;
use crate::page::{Page, PageId};
use fairway_engine::engine::{
    LogicalTable, MatchplayOverlay, Matrix, TableKind, Tier, annotate,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_FAILURE: &str = "Failed to load data";

/// Body of `GET /api/roundN`. Any table may be missing or null.
#[derive(Debug, Default, Deserialize)]
pub struct RoundResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub standings: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub strokes: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub points: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub matchplay: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub matchplay_colors: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    pub overall: Option<Vec<Vec<Value>>>,
}

/// Display text of a JSON cell. Whole floats print without a fraction.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn to_matrix(rows: Option<Vec<Vec<Value>>>) -> Matrix {
    rows.unwrap_or_default()
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

fn to_tiers(rows: Option<Vec<Vec<Value>>>) -> Vec<Vec<Option<Tier>>> {
    rows.unwrap_or_default()
        .iter()
        .map(|row| row.iter().map(|c| Tier::from_tag(&cell_text(c))).collect())
        .collect()
}

impl RoundResponse {
    pub fn from_json(body: &str) -> Result<RoundResponse> {
        Ok(serde_json::from_str(body)?)
    }

    /// Convert into a round page. A non-success status is surfaced verbatim.
    pub fn into_page(self, round: u8, final_round: u8) -> Result<Page> {
        if self.status.as_deref() != Some("success") {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string());
            return Err(FairwayError::Upstream(message));
        }

        let score = TableKind::Score {
            medals: round == final_round,
        };
        let mut tables = vec![
            LogicalTable::new(
                format!("Round {} - Results", round),
                &to_matrix(self.standings),
                score.clone(),
            ),
            LogicalTable::new(
                format!("Round {} - Strokes", round),
                &to_matrix(self.strokes),
                score.clone(),
            ),
            LogicalTable::new(
                format!("Round {} - Net Scores", round),
                &to_matrix(self.points),
                score.clone(),
            ),
        ];

        if self.matchplay.is_some() {
            let overlay = MatchplayOverlay::Resolved(to_tiers(self.matchplay_colors));
            tables.push(LogicalTable::new(
                format!("Round {} - Matchplay", round),
                &to_matrix(self.matchplay),
                TableKind::Matchplay(overlay),
            ));
        }
        if self.overall.is_some() {
            tables.push(LogicalTable::new(
                standings_title(round, final_round),
                &to_matrix(self.overall),
                score,
            ));
        }

        Ok(Page {
            id: PageId::Round(round),
            title: format!("Round {}", round),
            subtitle: None,
            tables: tables.iter().map(annotate).collect(),
        })
    }
}

/// Fetches round pages from the legacy backend.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, transport: Arc<dyn Transport>) -> ApiClient {
        ApiClient {
            base: base.into(),
            transport,
        }
    }

    pub fn round_url(&self, round: u8) -> String {
        format!("{}/api/round{}", self.base.trim_end_matches('/'), round)
    }

    pub fn fetch_round(&self, round: u8) -> Result<RoundResponse> {
        let url = self.round_url(round);
        log::debug!("GET {}", url);
        let body = self.transport.get(&url).inspect_err(|e| {
            log::warn!("Fetching round {} from backend failed: {}", round, e);
        })?;
        RoundResponse::from_json(&body)
    }
}
