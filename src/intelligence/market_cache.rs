use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use metrics::counter;

use crate::db::ScoreStore;
use crate::models::{MarketMetadata, Trade};
use crate::venue::VenueAdapter;

/// Cached market rows older than this are refetched.
pub const MARKET_CACHE_TTL_SECS: i64 = 3_600;

/// Concurrent venue lookups per batch on a cache miss.
pub const FETCH_BATCH_SIZE: usize = 5;

/// Market id -> metadata for every market that could be resolved in this pass.
/// A missing entry means "can't score this market", never an error.
pub type MarketCache = HashMap<String, MarketMetadata>;

/// One `(market_id, lookup key)` per distinct market, in first-seen order.
/// The key is the first non-empty slug seen for the market, else the id
/// itself (Kalshi tickers double as both).
fn lookup_keys(trades: &[Trade]) -> Vec<(&str, &str)> {
    let mut keys: Vec<(&str, &str)> = Vec::new();
    for trade in trades {
        let slug = trade.slug.as_deref().filter(|s| !s.is_empty());
        match keys.iter_mut().find(|(id, _)| *id == trade.market_id) {
            Some(entry) => {
                if entry.1 == entry.0 {
                    if let Some(slug) = slug {
                        entry.1 = slug;
                    }
                }
            }
            None => keys.push((trade.market_id.as_str(), slug.unwrap_or(&trade.market_id))),
        }
    }
    keys
}

/// Read-through market cache for one scoring pass.
///
/// Fresh rows come straight from the store. Misses and stale rows are fetched
/// from the venue in batches of [`FETCH_BATCH_SIZE`]; each success is upserted
/// back. Failed or empty lookups are left out of the map without retrying.
/// Only store errors abort.
pub async fn build_market_cache(
    trades: &[Trade],
    adapter: &dyn VenueAdapter,
    store: &dyn ScoreStore,
    now: DateTime<Utc>,
) -> anyhow::Result<MarketCache> {
    let mut cache = MarketCache::new();
    let mut misses: Vec<(&str, &str)> = Vec::new();

    for (market_id, key) in lookup_keys(trades) {
        match store.get_market(market_id).await? {
            Some(market) if market.is_fresh(now, MARKET_CACHE_TTL_SECS) => {
                counter!("market_cache_hits_total").increment(1);
                cache.insert(market_id.to_string(), market);
            }
            _ => {
                counter!("market_cache_misses_total").increment(1);
                misses.push((market_id, key));
            }
        }
    }

    tracing::debug!(
        hits = cache.len(),
        misses = misses.len(),
        venue = %adapter.venue(),
        "Market cache lookup"
    );

    for batch in misses.chunks(FETCH_BATCH_SIZE) {
        let results = join_all(batch.iter().map(|(_, key)| adapter.get_market_by_key(key))).await;

        for (&(market_id, key), result) in batch.iter().zip(results) {
            match result {
                Ok(Some(info)) => {
                    let market = MarketMetadata::from_info(market_id, info, adapter.venue(), now);
                    store.upsert_market(&market).await?;
                    cache.insert(market_id.to_string(), market);
                }
                Ok(None) => {
                    tracing::debug!(market_id, key, "Market not found on venue");
                }
                Err(e) => {
                    counter!("market_fetch_failures_total").increment(1);
                    tracing::warn!(error = %e, market_id, key, "Market fetch failed, skipping");
                }
            }
        }
    }

    Ok(cache)
}
