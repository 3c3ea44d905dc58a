use thiserror::Error;

use crate::models::Venue;

/// Failures talking to a prediction-market venue. Fatal to the scoring pass
/// that hit them.
#[derive(Debug, Error)]
pub enum VenueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("rate limited by {url} after {attempts} attempts")]
    RateLimited { url: String, attempts: u32 },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("no adapter configured for venue {0}")]
    NotConfigured(Venue),
}

/// Startup configuration problems. Never recoverable at call time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },

    #[error("signal weights must sum to 100, got {total}")]
    InvalidWeights { total: u64 },

    #[error("invalid Kalshi private key: {0}")]
    InvalidKey(String),
}

/// Why a scoring pass failed. Either way nothing past the failing step was
/// written.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("venue fetch failed: {0}")]
    Venue(#[from] VenueError),

    #[error("persistence failed: {0}")]
    Persistence(#[source] anyhow::Error),
}
