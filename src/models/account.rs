use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ScoringResult, Trade};

/// Database row for the accounts table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub address: String,
    pub venue: String,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub total_score: i32,
    pub signal_wallet_age: Decimal,
    pub signal_first_bet: Decimal,
    pub signal_bet_timing: Decimal,
    pub signal_withdrawal_speed: Decimal,
    pub signal_market_selection: Decimal,
    pub signal_win_rate: Decimal,
    pub signal_no_hedging: Decimal,
    pub total_volume: Decimal,
    pub total_pnl: Decimal,
    pub first_trade_at: Option<i64>,
    pub last_trade_at: Option<i64>,
    pub trade_count: i32,
    pub scored_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Everything a scoring pass writes for an account. `created_at` is owned by
/// the store and never part of an update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRecord {
    pub address: String,
    pub venue: String,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub total_score: i32,
    pub signal_wallet_age: Decimal,
    pub signal_first_bet: Decimal,
    pub signal_bet_timing: Decimal,
    pub signal_withdrawal_speed: Decimal,
    pub signal_market_selection: Decimal,
    pub signal_win_rate: Decimal,
    pub signal_no_hedging: Decimal,
    pub total_volume: Decimal,
    pub total_pnl: Decimal,
    pub first_trade_at: Option<i64>,
    pub last_trade_at: Option<i64>,
    pub trade_count: i32,
    pub scored_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Flatten a scoring result into its persisted shape. Profile fields come
    /// from the first fetched trade only.
    pub fn from_result(result: &ScoringResult, trades: &[Trade], scored_at: DateTime<Utc>) -> Self {
        let first = trades.first();
        let username = first.and_then(|t| t.username.clone());
        let profile_image = first.and_then(|t| t.profile_image.clone());
        let signals = &result.signals;

        Self {
            address: result.account.clone(),
            venue: result.venue.as_str().to_string(),
            username,
            profile_image,
            total_score: result.total_score,
            signal_wallet_age: signals.wallet_age.weighted,
            signal_first_bet: signals.first_bet_size.weighted,
            signal_bet_timing: signals.bet_timing.weighted,
            signal_withdrawal_speed: signals.withdrawal_speed.weighted,
            signal_market_selection: signals.market_selection.weighted,
            signal_win_rate: signals.win_rate.weighted,
            signal_no_hedging: signals.no_hedging.weighted,
            total_volume: result.metadata.total_volume,
            total_pnl: result.metadata.total_pnl,
            first_trade_at: result.metadata.first_trade_at,
            last_trade_at: result.metadata.last_trade_at,
            trade_count: result.metadata.trade_count,
            scored_at,
        }
    }
}
