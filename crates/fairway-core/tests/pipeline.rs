//! End-to-end page loads against canned sheet exports.

use fairway_core::{
    ApiClient, ApiSource, FairwayError, PageId, PageSource, Result, SheetFetcher, SheetSource,
    Tier, TournamentConfig, Transport, Trend, spawn_load,
};
use std::sync::{Arc, Mutex};

/// Answers by `gid` (or API path) and records every requested URL.
#[derive(Default)]
struct Recording {
    responses: Vec<(String, std::result::Result<String, u16>)>,
    calls: Mutex<Vec<String>>,
}

impl Recording {
    fn with(mut self, needle: &str, body: &str) -> Self {
        self.responses.push((needle.to_string(), Ok(body.to_string())));
        self
    }

    fn failing(mut self, needle: &str, status: u16) -> Self {
        self.responses.push((needle.to_string(), Err(status)));
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for Recording {
    fn get(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        for (needle, response) in &self.responses {
            if url.contains(needle.as_str()) {
                return match response {
                    Ok(body) => Ok(body.clone()),
                    Err(status) => Err(FairwayError::Http {
                        status: *status,
                        url: url.to_string(),
                    }),
                };
            }
        }
        Err(FairwayError::Http {
            status: 404,
            url: url.to_string(),
        })
    }
}

fn sheet_source(config: TournamentConfig, transport: Arc<Recording>) -> SheetSource {
    SheetSource::new(SheetFetcher::new(Arc::new(config), transport))
}

/// CSV with `blank` empty lines before `body`.
fn padded(blank: usize, body: &str) -> String {
    format!("{}{}", ",\n".repeat(blank), body)
}

const ROUND6_GID: &str = "gid=1801814981";
const OVERALL_GID: &str = "gid=1132513394";

#[test]
fn final_round_page_has_medals_and_crown() {
    let csv = padded(
        5,
        "Pos,Move,Player,Points\n1ST,\u{2B06}1,Alice,41\n=2ND,\u{2B07}\u{2B06},Bob,39\n=2ND,\u{2193}2,Cara,39\n",
    );
    let transport = Arc::new(Recording::default().with(ROUND6_GID, &csv));
    let source = sheet_source(TournamentConfig::default(), transport.clone());

    let page = source.load(PageId::Round(6)).unwrap();
    assert_eq!(page.title, "Round 6");
    assert_eq!(page.tables.len(), 4);

    let results = &page.tables[0];
    assert_eq!(results.title, "Round 6 - Results");
    assert!(results.rows[0].header);
    assert_eq!(results.rows[1].medal, Some(Tier::Gold));
    assert!(results.rows[1].cells[2].style.champion);
    assert_eq!(results.rows[1].cells[1].style.trend, Some(Trend::Up));
    assert_eq!(results.rows[2].medal, Some(Tier::Silver));
    assert_eq!(results.rows[2].cells[1].style.trend, Some(Trend::Unchanged));
    assert_eq!(results.rows[3].cells[1].style.trend, Some(Trend::Down));

    // One request per page load, for the whole fetch range.
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("range=A1%3AW130"));
}

#[test]
fn overall_page_from_sheet() {
    let mut csv = String::from("Club Championship,2\n,\n,\n");
    csv.push_str("ROUND 1,,,,\nPos,Player,R1,,TOTAL\n1ST,Alice,36,,36\n");
    csv.push_str(&",\n".repeat(8));
    csv.push_str("2 ROUNDS,,,,,\nPos,Player,Round 1,Round 2,,Total\n1ST,Alice,36,35,,71\n2ND,Bob,37,36,,73\n");
    let transport = Arc::new(Recording::default().with(OVERALL_GID, &csv));
    let source = sheet_source(TournamentConfig::default(), transport.clone());

    let page = source.load(PageId::Overall).unwrap();
    assert_eq!(page.title, "Club Championship");
    assert_eq!(page.subtitle.as_deref(), Some("Showing tables up to round: 2"));
    assert_eq!(page.tables.len(), 2);

    let latest = &page.tables[0];
    assert_eq!(latest.title, "2 ROUNDS");
    assert_eq!(latest.header.header_row, 1);
    assert_eq!(latest.header.total_column, Some(5));
    assert!(latest.rows[2].cells[5].style.total);
    assert!(!latest.rows[2].cells[0].style.alternate);
    assert!(latest.rows[3].cells[0].style.alternate);
    assert!(transport.calls()[0].contains("range=A1%3AJ200"));
}

#[test]
fn unknown_sheet_fails_before_any_request() {
    let config = TournamentConfig::from_toml_str(
        r#"
        [sheets]
        Round1 = "1478264222"
        "#,
    )
    .unwrap();
    let transport = Arc::new(Recording::default());
    let source = sheet_source(config, transport.clone());

    match source.load(PageId::Overall) {
        Err(FairwayError::UnknownSheet { sheet }) => assert_eq!(sheet, "Overall"),
        other => panic!("expected UnknownSheet, got {:?}", other.map(|p| p.title)),
    }
    assert!(source.page_url(PageId::Round(3)).is_err());
    assert!(transport.calls().is_empty());
}

#[test]
fn http_failure_is_a_terminal_error() {
    let transport = Arc::new(Recording::default().failing(ROUND6_GID, 500));
    let source = sheet_source(TournamentConfig::default(), transport.clone());
    match source.load(PageId::Round(6)) {
        Err(FairwayError::Http { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.contains(ROUND6_GID));
        }
        other => panic!("expected HTTP error, got {:?}", other.map(|p| p.title)),
    }
    // No retry.
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn missing_round_layout_is_unsupported() {
    let transport = Arc::new(Recording::default());
    let source = sheet_source(TournamentConfig::default(), transport.clone());
    assert!(matches!(
        source.load(PageId::Round(9)),
        Err(FairwayError::Unsupported(_))
    ));
    assert!(transport.calls().is_empty());
}

#[test]
fn legacy_backend_round_and_overall() {
    let body = r#"{
        "status": "success",
        "standings": [["Pos", "Move", "Player", "Points"], ["1ST", "-", "Alice", 40]],
        "strokes": [],
        "points": [],
        "matchplay": [["Hole", "", "", "", "1"], ["Alice", "", "", "", "Bob"]],
        "matchplay_colors": [[], ["", "", "", "", "silver"]],
        "overall": [["Pos", "Player", "Total"], ["1ST", "Alice", 78]]
    }"#;
    let transport = Arc::new(Recording::default().with("/api/round5", body));
    let source = ApiSource::new(ApiClient::new("http://127.0.0.1:5000", transport.clone()), 6);

    let page = source.load(PageId::Round(5)).unwrap();
    assert_eq!(page.tables.len(), 5);
    assert_eq!(page.tables[0].rows[1].cells[1].style.trend, Some(Trend::Unchanged));
    assert_eq!(page.tables[3].rows[1].cells[4].style.matchplay, Some(Tier::Silver));

    assert!(matches!(
        source.load(PageId::Overall),
        Err(FairwayError::Unsupported(_))
    ));
    assert_eq!(transport.calls(), vec!["http://127.0.0.1:5000/api/round5".to_string()]);
}

#[test]
fn background_load_round_trip() {
    let csv = padded(5, "Pos,Move,Player\n1ST,-,Alice\n");
    let transport = Arc::new(Recording::default().with("gid=1478264222", &csv));
    let source: Arc<dyn PageSource> =
        Arc::new(sheet_source(TournamentConfig::default(), transport));

    let handle = spawn_load(source, PageId::Round(1));
    assert_eq!(handle.page(), PageId::Round(1));
    let page = handle.wait().unwrap().unwrap();
    assert_eq!(page.tables[0].rows[1].cells[2].text, "Alice");
    // Medals only on the final round.
    assert_eq!(page.tables[0].rows[1].medal, None);
}
