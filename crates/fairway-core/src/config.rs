//! Tournament configuration: spreadsheet identity, sheet ids and layouts.
//!
//! Resolution order is an explicit `--config` file, then
//! `<config_dir>/fairway/config.toml`, then the built-in tournament. A file
//! that exists but cannot be read or parsed is an error; we never fall back
//! to the built-in sheets behind the user's back.

use crate::error::{FairwayError, Result};
use crate::layout::{OverallLayout, RoundLayout, TableRole, TournamentLayout};
use directories::ProjectDirs;
use fairway_engine::engine::RangeSpec;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SPREADSHEET_ID: &str = "1__0Tws3_ecn3vG3DUW6m4Y6wJPmQY1CqsiCrv22CM6Q";
pub const DEFAULT_EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_SHEETS: [(&str, &str); 7] = [
    ("Round1", "1478264222"),
    ("Round2", "74729766"),
    ("Round3", "33039960"),
    ("Round4", "1097163737"),
    ("Round5", "1554022515"),
    ("Round6", "1801814981"),
    ("Overall", "1132513394"),
];

/// Sheet name to export `gid`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SheetMap(BTreeMap<String, String>);

impl SheetMap {
    pub fn new() -> SheetMap {
        SheetMap::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, gid: impl Into<String>) {
        self.0.insert(name.into(), gid.into());
    }

    /// Look up the `gid` for `name`.
    pub fn sheet_id(&self, name: &str) -> Result<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| FairwayError::UnknownSheet {
                sheet: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for SheetMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        SheetMap(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug)]
pub struct TournamentConfig {
    pub spreadsheet_id: String,
    pub export_base: String,
    pub api_base: String,
    pub timeout: Duration,
    pub sheets: SheetMap,
    pub layout: TournamentLayout,
    /// File the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            export_base: DEFAULT_EXPORT_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sheets: DEFAULT_SHEETS
                .iter()
                .map(|(name, gid)| (name.to_string(), gid.to_string()))
                .collect(),
            layout: TournamentLayout::default(),
            source: None,
        }
    }
}

/// On-disk shape. Every key is optional; missing keys keep the built-in value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    spreadsheet_id: Option<String>,
    export_base: Option<String>,
    api_base: Option<String>,
    timeout_secs: Option<u64>,
    sheets: Option<SheetMap>,
    rounds: Option<Vec<RoundLayout>>,
    overall: Option<OverallLayout>,
}

impl TournamentConfig {
    /// Parse a config document, layering it over the built-in tournament.
    ///
    /// A `[sheets]` table replaces the built-in sheet map entirely, as do
    /// `[[rounds]]` and `[overall]` for their layouts.
    pub fn from_toml_str(content: &str) -> Result<TournamentConfig> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = TournamentConfig::default();

        if let Some(id) = file.spreadsheet_id {
            config.spreadsheet_id = id;
        }
        if let Some(base) = file.export_base {
            config.export_base = base;
        }
        if let Some(base) = file.api_base {
            config.api_base = base;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(sheets) = file.sheets {
            config.sheets = sheets;
        }
        if let Some(rounds) = file.rounds {
            config.layout.rounds = rounds;
        }
        if let Some(overall) = file.overall {
            config.layout.overall = overall;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<TournamentConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FairwayError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Check the layouts are usable before anything is fetched.
    pub fn validate(&self) -> Result<()> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(FairwayError::Config("spreadsheet_id is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(FairwayError::Config("timeout_secs must be positive".to_string()));
        }

        let mut seen = Vec::new();
        for round in &self.layout.rounds {
            if round.round == 0 {
                return Err(FairwayError::Config("round numbers start at 1".to_string()));
            }
            if seen.contains(&round.round) {
                return Err(FairwayError::Config(format!(
                    "round {} is defined twice",
                    round.round
                )));
            }
            seen.push(round.round);
            for table in &round.tables {
                ensure_within(&round.fetch_range, &table.range, &table.title)?;
                if let TableRole::Matchplay { mask, .. } = &table.role {
                    ensure_within(&round.fetch_range, mask, &table.title)?;
                }
            }
        }

        let overall = &self.layout.overall;
        for table in &overall.tables {
            ensure_within(&overall.fetch_range, &table.range, &table.title)?;
        }
        Ok(())
    }
}

fn ensure_within(outer: &RangeSpec, inner: &RangeSpec, title: &str) -> Result<()> {
    let (os, oe) = (outer.start(), outer.end());
    let (is, ie) = (inner.start(), inner.end());
    let inside = is.row >= os.row && is.col >= os.col && ie.row <= oe.row && ie.col <= oe.col;
    if inside {
        Ok(())
    } else {
        Err(FairwayError::InvalidRange(format!(
            "table \"{}\" range {} lies outside fetched range {}",
            title, inner, outer
        )))
    }
}

/// `<config_dir>/fairway/config.toml`, when the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "fairway")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Resolve the configuration for this run.
pub fn load_config(explicit: Option<&Path>) -> Result<TournamentConfig> {
    if let Some(path) = explicit {
        log::info!("Loading config from {}", path.display());
        return TournamentConfig::from_file(path);
    }

    match user_config_path() {
        Some(path) if path.exists() => {
            log::info!("Loading config from {}", path.display());
            TournamentConfig::from_file(&path)
        }
        _ => {
            log::debug!("No config file found, using built-in tournament");
            Ok(TournamentConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_cover_every_page_sheet() {
        let config = TournamentConfig::default();
        for name in config.layout.sheet_names() {
            assert!(config.sheets.sheet_id(name).is_ok(), "missing {}", name);
        }
        assert_eq!(config.sheets.sheet_id("Round2").unwrap(), "74729766");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_sheet() {
        let config = TournamentConfig::default();
        match config.sheets.sheet_id("Round7") {
            Err(FairwayError::UnknownSheet { sheet }) => assert_eq!(sheet, "Round7"),
            other => panic!("expected UnknownSheet, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TournamentConfig::from_toml_str(
            r#"
            api_base = "http://localhost:8080"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.spreadsheet_id, DEFAULT_SPREADSHEET_ID);
        assert_eq!(config.sheets.len(), 7);
    }

    #[test]
    fn test_sheets_table_replaces_defaults() {
        let config = TournamentConfig::from_toml_str(
            r#"
            spreadsheet_id = "abc"
            [sheets]
            Round1 = "11"
            "#,
        )
        .unwrap();
        assert_eq!(config.sheets.sheet_id("Round1").unwrap(), "11");
        assert!(config.sheets.sheet_id("Overall").is_err());
    }

    #[test]
    fn test_round_override() {
        let config = TournamentConfig::from_toml_str(
            r#"
            [[rounds]]
            round = 1
            sheet = "Day1"
            fetch_range = "A1:H40"

            [[rounds.tables]]
            title = "Leaders"
            range = "A2:D9"
            role = { type = "score", medals = true }
            "#,
        )
        .unwrap();
        assert_eq!(config.layout.rounds.len(), 1);
        assert_eq!(config.layout.round(1).unwrap().sheet, "Day1");
        assert_eq!(config.layout.max_round(), 1);
    }

    #[test]
    fn test_table_outside_fetch_range_rejected() {
        let err = TournamentConfig::from_toml_str(
            r#"
            [[rounds]]
            round = 1
            sheet = "Round1"
            fetch_range = "A1:D10"

            [[rounds.tables]]
            title = "Results"
            range = "A6:E13"
            role = { type = "score" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, FairwayError::InvalidRange(_)));
    }

    #[test]
    fn test_matchplay_mask_outside_fetch_range_rejected() {
        let err = TournamentConfig::from_toml_str(
            r#"
            [[rounds]]
            round = 2
            sheet = "Round2"
            fetch_range = "A1:W60"

            [[rounds.tables]]
            title = "Matchplay"
            range = "A54:V60"
            role = { type = "matchplay", mask = "A111:V121", offset = { detect = { fallback = 4 } } }
            "#,
        )
        .unwrap_err();
        match err {
            FairwayError::InvalidRange(message) => assert!(message.contains("A111:V121")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(matches!(
            TournamentConfig::from_toml_str("spreadsheet_id = ").unwrap_err(),
            FairwayError::Toml(_)
        ));
        assert!(matches!(
            TournamentConfig::from_toml_str("colour = \"green\"").unwrap_err(),
            FairwayError::Toml(_)
        ));
        assert!(matches!(
            TournamentConfig::from_toml_str("spreadsheet_id = \"\"").unwrap_err(),
            FairwayError::Config(_)
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "spreadsheet_id = \"from-file\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.spreadsheet_id, "from-file");
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(Some(&missing)).unwrap_err(),
            FairwayError::Config(_)
        ));
    }
}
