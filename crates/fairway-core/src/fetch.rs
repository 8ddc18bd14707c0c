//! Sheet fetching over the spreadsheet's CSV export endpoint.

use crate::config::TournamentConfig;
use crate::error::{FairwayError, Result};
use fairway_engine::engine::{Matrix, RangeSpec, decode_csv};
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("fairway/", env!("CARGO_PKG_VERSION"));

/// The only network seam: fetch a URL as text.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FairwayError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text()?)
    }
}

/// Builds export URLs from the configured sheet map and decodes the CSV.
#[derive(Clone)]
pub struct SheetFetcher {
    config: Arc<TournamentConfig>,
    transport: Arc<dyn Transport>,
}

impl SheetFetcher {
    pub fn new(config: Arc<TournamentConfig>, transport: Arc<dyn Transport>) -> SheetFetcher {
        SheetFetcher { config, transport }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Export URL for `range` of sheet `name`, cache-busted with the current time.
    pub fn export_url(&self, name: &str, range: &RangeSpec) -> Result<String> {
        self.export_url_at(name, range, chrono::Utc::now().timestamp_millis())
    }

    /// Export URL with an explicit cache-busting timestamp.
    pub fn export_url_at(&self, name: &str, range: &RangeSpec, millis: i64) -> Result<String> {
        // Unknown sheets fail here, before any request is made.
        let gid = self.config.sheets.sheet_id(name)?;

        let base = format!(
            "{}/{}/export",
            self.config.export_base.trim_end_matches('/'),
            self.config.spreadsheet_id
        );
        let range = range.to_string();
        let millis = millis.to_string();
        let url = Url::parse_with_params(
            &base,
            &[
                ("format", "csv"),
                ("gid", gid),
                ("range", range.as_str()),
                ("_", millis.as_str()),
            ],
        )
        .map_err(|e| FairwayError::Config(format!("Invalid export URL {}: {}", base, e)))?;
        Ok(url.into())
    }

    /// Fetch `range` of sheet `name` and decode it.
    pub fn fetch_rows(&self, name: &str, range: &RangeSpec) -> Result<Matrix> {
        let url = self.export_url(name, range)?;
        log::debug!("GET {}", url);
        let body = self.transport.get(&url).inspect_err(|e| {
            log::warn!("Fetching sheet {} failed: {}", name, e);
        })?;
        let rows = decode_csv(&body);
        log::info!("Decoded {} rows from sheet {}", rows.len(), name);
        Ok(rows)
    }
}
