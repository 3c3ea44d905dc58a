use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Venue;

/// Output of one heuristic. Only `intelligence::utils::make_signal` builds these,
/// which keeps `raw` in [0, 1] and `weighted == raw * weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub raw: Decimal,
    pub weight: u32,
    pub weighted: Decimal,
    pub details: String,
}

/// The seven signals, in the fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    WalletAge,
    FirstBetSize,
    BetTiming,
    WithdrawalSpeed,
    MarketSelection,
    WinRate,
    NoHedging,
}

impl SignalKind {
    pub const ALL: [SignalKind; 7] = [
        SignalKind::WalletAge,
        SignalKind::FirstBetSize,
        SignalKind::BetTiming,
        SignalKind::WithdrawalSpeed,
        SignalKind::MarketSelection,
        SignalKind::WinRate,
        SignalKind::NoHedging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::WalletAge => "wallet_age",
            SignalKind::FirstBetSize => "first_bet_size",
            SignalKind::BetTiming => "bet_timing",
            SignalKind::WithdrawalSpeed => "withdrawal_speed",
            SignalKind::MarketSelection => "market_selection",
            SignalKind::WinRate => "win_rate",
            SignalKind::NoHedging => "no_hedging",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResults {
    pub wallet_age: SignalResult,
    pub first_bet_size: SignalResult,
    pub bet_timing: SignalResult,
    pub withdrawal_speed: SignalResult,
    pub market_selection: SignalResult,
    pub win_rate: SignalResult,
    pub no_hedging: SignalResult,
}

impl SignalResults {
    pub fn get(&self, kind: SignalKind) -> &SignalResult {
        match kind {
            SignalKind::WalletAge => &self.wallet_age,
            SignalKind::FirstBetSize => &self.first_bet_size,
            SignalKind::BetTiming => &self.bet_timing,
            SignalKind::WithdrawalSpeed => &self.withdrawal_speed,
            SignalKind::MarketSelection => &self.market_selection,
            SignalKind::WinRate => &self.win_rate,
            SignalKind::NoHedging => &self.no_hedging,
        }
    }

    /// Signals paired with their kind, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalKind, &SignalResult)> {
        SignalKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn weighted_sum(&self) -> Decimal {
        self.iter().map(|(_, s)| s.weighted).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    pub total_volume: Decimal,
    pub total_pnl: Decimal,
    pub trade_count: i32,
    pub first_trade_at: Option<i64>,
    pub last_trade_at: Option<i64>,
}

/// Aggregated output of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub account: String,
    pub venue: Venue,
    pub total_score: i32,
    pub signals: SignalResults,
    pub metadata: ScoreMetadata,
}
