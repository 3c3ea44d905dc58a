pub mod account;
pub mod activity;
pub mod alert;
pub mod market;
pub mod position;
pub mod signal;
pub mod trade;

pub use account::{AccountRecord, AccountRow};
pub use activity::{Activity, ActivityKind};
pub use alert::{AlertRow, AlertTier, NewAlert};
pub use market::{MarketInfo, MarketMetadata};
pub use position::Position;
pub use signal::{ScoreMetadata, ScoringResult, SignalKind, SignalResult, SignalResults};
pub use trade::Trade;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BUY" | "0" => Some(Side::Buy),
            "SELL" | "1" => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// The prediction-market platform a record was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Polymarket,
    Kalshi,
}

impl Venue {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "polymarket" | "poly" => Some(Venue::Polymarket),
            "kalshi" => Some(Venue::Kalshi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Polymarket => "polymarket",
            Venue::Kalshi => "kalshi",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AccountSnapshot: everything one scoring pass reads from a venue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot {
    pub trades: Vec<Trade>,
    pub positions: Vec<Position>,
    pub activities: Vec<Activity>,
}
