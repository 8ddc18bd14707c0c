//! Where pages come from: the spreadsheet export or the legacy backend.

use crate::api::ApiClient;
use crate::config::TournamentConfig;
use crate::error::{FairwayError, Result};
use crate::fetch::{HttpTransport, SheetFetcher, Transport};
use crate::page::{Page, PageId, build_overall_page, build_round_page};
use std::sync::Arc;

/// Loads one page from scratch. Nothing is cached between calls.
pub trait PageSource: Send + Sync {
    fn load(&self, page: PageId) -> Result<Page>;

    /// URL a load of `page` would request, without requesting it.
    fn page_url(&self, page: PageId) -> Result<String> {
        Err(FairwayError::Unsupported(format!("no URL for {}", page)))
    }
}

/// Pages built from the spreadsheet's CSV export and the configured layouts.
pub struct SheetSource {
    fetcher: SheetFetcher,
}

impl SheetSource {
    pub fn new(fetcher: SheetFetcher) -> SheetSource {
        SheetSource { fetcher }
    }

    pub fn from_config(config: Arc<TournamentConfig>) -> Result<SheetSource> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.timeout)?);
        Ok(SheetSource::new(SheetFetcher::new(config, transport)))
    }
}

fn no_round(n: u8) -> FairwayError {
    FairwayError::Unsupported(format!("No layout for round {}", n))
}

impl PageSource for SheetSource {
    fn load(&self, page: PageId) -> Result<Page> {
        let layout = &self.fetcher.config().layout;
        match page {
            PageId::Round(n) => {
                let round = layout.round(n).ok_or_else(|| no_round(n))?;
                let rows = self.fetcher.fetch_rows(&round.sheet, &round.fetch_range)?;
                Ok(build_round_page(round, &rows))
            }
            PageId::Overall => {
                let overall = &layout.overall;
                let rows = self.fetcher.fetch_rows(&overall.sheet, &overall.fetch_range)?;
                Ok(build_overall_page(overall, &rows, layout.max_round()))
            }
        }
    }

    fn page_url(&self, page: PageId) -> Result<String> {
        let layout = &self.fetcher.config().layout;
        match page {
            PageId::Round(n) => {
                let round = layout.round(n).ok_or_else(|| no_round(n))?;
                self.fetcher.export_url(&round.sheet, &round.fetch_range)
            }
            PageId::Overall => self
                .fetcher
                .export_url(&layout.overall.sheet, &layout.overall.fetch_range),
        }
    }
}

/// Round pages from the legacy JSON backend. It has no Overall page.
pub struct ApiSource {
    client: ApiClient,
    final_round: u8,
}

impl ApiSource {
    pub fn new(client: ApiClient, final_round: u8) -> ApiSource {
        ApiSource {
            client,
            final_round,
        }
    }

    pub fn from_config(config: &TournamentConfig) -> Result<ApiSource> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(config.timeout)?);
        Ok(ApiSource::new(
            ApiClient::new(config.api_base.as_str(), transport),
            config.layout.max_round(),
        ))
    }
}

fn overall_unsupported() -> FairwayError {
    FairwayError::Unsupported("the legacy backend has no overall page".to_string())
}

impl PageSource for ApiSource {
    fn load(&self, page: PageId) -> Result<Page> {
        match page {
            PageId::Round(n) => self.client.fetch_round(n)?.into_page(n, self.final_round),
            PageId::Overall => Err(overall_unsupported()),
        }
    }

    fn page_url(&self, page: PageId) -> Result<String> {
        match page {
            PageId::Round(n) => Ok(self.client.round_url(n)),
            PageId::Overall => Err(overall_unsupported()),
        }
    }
}
