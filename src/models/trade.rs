use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Side, Venue};

/// One executed order, normalized from whichever venue it came from.
/// `price` is probability-denominated (0..=1), `timestamp` is unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub account: String,
    pub market_id: String,
    pub side: Side,
    pub size: Decimal,
    pub price: Decimal,
    pub timestamp: i64,
    pub outcome: String,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub event_slug: Option<String>,
    pub transaction_hash: Option<String>,
    pub venue: Venue,
    /// Display name the venue attaches to the trader, if any.
    pub username: Option<String>,
    pub profile_image: Option<String>,
}
