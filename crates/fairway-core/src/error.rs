//! Error types for Fairway core.
//!
//! Only configuration and fetching can fail. Decoding, slicing, trimming and
//! annotation degrade to empty cells instead of returning errors.

use thiserror::Error;

/// Errors that can occur while loading a leaderboard page
#[derive(Error, Debug)]
pub enum FairwayError {
    #[error("No sheet identifier configured for sheet \"{sheet}\"")]
    UnknownSheet { sheet: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to fetch {url} (HTTP {status})")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Upstream(String),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Load interrupted: {0}")]
    Interrupted(String),
}

pub type Result<T> = std::result::Result<T, FairwayError>;
