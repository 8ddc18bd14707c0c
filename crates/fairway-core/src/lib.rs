//! fairway-core - Configuration, sheet fetching and leaderboard page assembly.

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod load;
pub mod page;
pub mod source;

pub use api::{ApiClient, RoundResponse};
pub use config::{SheetMap, TournamentConfig, load_config};
pub use error::{FairwayError, Result};
pub use fetch::{HttpTransport, SheetFetcher, Transport};
pub use layout::{RoundLayout, TableRole, TableSpec, TournamentLayout};
pub use load::{LoadHandle, spawn_load};
pub use page::{Page, PageId, build_overall_page, build_round_page};
pub use source::{ApiSource, PageSource, SheetSource};

pub use fairway_engine::engine::{AnnotatedTable, RangeSpec, Tier, Trend};
