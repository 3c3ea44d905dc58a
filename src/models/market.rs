use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Venue;

/// Venue-neutral market fact sheet as returned by an adapter lookup.
/// Times are unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub title: String,
    pub slug: Option<String>,
    pub end_date: Option<i64>,
    pub resolved_at: Option<i64>,
    pub outcome: Option<String>,
    pub active: bool,
    pub volume: Decimal,
}

/// Database row for the markets cache table.
///
/// `resolved_at` set with `outcome` still `None` is legal: venues sometimes close
/// a market before publishing the winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MarketMetadata {
    pub market_id: String,
    pub title: String,
    pub slug: Option<String>,
    pub end_date: Option<i64>,
    pub resolved_at: Option<i64>,
    pub outcome: Option<String>,
    pub active: bool,
    pub volume: Decimal,
    pub cached_at: DateTime<Utc>,
    pub venue: String,
}

impl MarketMetadata {
    pub fn from_info(
        market_id: &str,
        info: MarketInfo,
        venue: Venue,
        cached_at: DateTime<Utc>,
    ) -> Self {
        Self {
            market_id: market_id.to_string(),
            title: info.title,
            slug: info.slug,
            end_date: info.end_date,
            resolved_at: info.resolved_at,
            outcome: info.outcome,
            active: info.active,
            volume: info.volume,
            cached_at,
            venue: venue.as_str().to_string(),
        }
    }

    /// True while the cached row is younger than `ttl_secs`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_secs: i64) -> bool {
        (now - self.cached_at).num_seconds() < ttl_secs
    }
}
