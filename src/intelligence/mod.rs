pub mod classifier;
pub mod market_cache;
pub mod scorer;
pub mod signals;
pub mod utils;
pub mod weights;

pub use classifier::{alert_tier, build_alert_details};
pub use market_cache::{build_market_cache, MarketCache, MARKET_CACHE_TTL_SECS};
pub use scorer::{aggregate_metadata, composite_score, CompositeScorer};
pub use weights::SignalWeights;
