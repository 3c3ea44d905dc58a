use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityKind {
    Trade,
    Redeem,
    Split,
    Merge,
}

impl ActivityKind {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TRADE" => Some(ActivityKind::Trade),
            "REDEEM" => Some(ActivityKind::Redeem),
            "SPLIT" => Some(ActivityKind::Split),
            "MERGE" => Some(ActivityKind::Merge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Trade => "TRADE",
            ActivityKind::Redeem => "REDEEM",
            ActivityKind::Split => "SPLIT",
            ActivityKind::Merge => "MERGE",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-order account event (redemption, split, merge) or a trade echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub market_id: Option<String>,
    pub side: Option<Side>,
    pub size: Option<Decimal>,
    pub usdc_size: Option<Decimal>,
    pub timestamp: i64,
}
