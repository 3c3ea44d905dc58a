pub mod http;
pub mod rate_limiter;

pub use http::{build_url, HttpFetcher, RetryPolicy};
pub use rate_limiter::RateLimiter;

use async_trait::async_trait;

use crate::errors::VenueError;
use crate::models::{Activity, MarketInfo, Position, Trade, Venue};

/// A prediction-market venue, seen as a source of normalized records.
///
/// Adapters own their HTTP retry and rate-limit policy; callers only see
/// typed records or a `VenueError`. `get_market_by_key` returns `Ok(None)` for
/// markets the venue doesn't know.
#[async_trait]
pub trait VenueAdapter: Send + Sync {
    fn venue(&self) -> Venue;

    async fn get_trades(&self, account: &str) -> Result<Vec<Trade>, VenueError>;

    async fn get_positions(&self, account: &str) -> Result<Vec<Position>, VenueError>;

    async fn get_activity(&self, account: &str) -> Result<Vec<Activity>, VenueError>;

    /// Look a market up by slug (Polymarket) or ticker (Kalshi).
    async fn get_market_by_key(&self, key: &str) -> Result<Option<MarketInfo>, VenueError>;
}
