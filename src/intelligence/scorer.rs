use rust_decimal::{Decimal, RoundingStrategy};

use super::market_cache::MarketCache;
use super::signals::{
    score_bet_timing, score_first_bet_size, score_market_selection, score_no_hedging,
    score_wallet_age, score_win_rate, score_withdrawal_speed,
};
use super::utils::{sort_by_time, trade_usd_value};
use super::weights::SignalWeights;
use crate::errors::ConfigError;
use crate::models::{AccountSnapshot, ScoreMetadata, ScoringResult, SignalResults, Venue};

/// Combines the seven signals into a 0-100 composite.
///
/// Construction validates the weight table, so a scorer that exists always
/// produces scores in range.
#[derive(Debug, Clone)]
pub struct CompositeScorer {
    weights: SignalWeights,
}

impl CompositeScorer {
    pub fn new(weights: SignalWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Score one account from an already-fetched snapshot and market cache.
    /// Pure: the same inputs and `now` always give the same result.
    pub fn score(
        &self,
        account: &str,
        venue: Venue,
        snapshot: &AccountSnapshot,
        cache: &MarketCache,
        now: i64,
    ) -> ScoringResult {
        let signals = self.evaluate_signals(snapshot, cache, now);
        ScoringResult {
            account: account.to_string(),
            venue,
            total_score: composite_score(&signals),
            metadata: aggregate_metadata(snapshot),
            signals,
        }
    }

    /// Run every signal in the fixed order.
    pub fn evaluate_signals(
        &self,
        snapshot: &AccountSnapshot,
        cache: &MarketCache,
        now: i64,
    ) -> SignalResults {
        let w = &self.weights;
        let trades = &snapshot.trades;

        SignalResults {
            wallet_age: score_wallet_age(trades, now, w.wallet_age),
            first_bet_size: score_first_bet_size(trades, w.first_bet_size),
            bet_timing: score_bet_timing(trades, cache, w.bet_timing),
            withdrawal_speed: score_withdrawal_speed(&snapshot.activities, cache, w.withdrawal_speed),
            market_selection: score_market_selection(trades, cache, w.market_selection),
            win_rate: score_win_rate(&snapshot.positions, trades, cache, w.win_rate),
            no_hedging: score_no_hedging(trades, w.no_hedging),
        }
    }
}

/// `round(sum of weighted)`, halves rounded up. Always within 0..=100 when the
/// weights sum to 100.
pub fn composite_score(signals: &SignalResults) -> i32 {
    let total = signals
        .weighted_sum()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    total
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .try_into()
        .unwrap_or(0)
}

/// Volume, PnL and trade span for the account record.
pub fn aggregate_metadata(snapshot: &AccountSnapshot) -> ScoreMetadata {
    let sorted = sort_by_time(&snapshot.trades);

    ScoreMetadata {
        total_volume: snapshot.trades.iter().map(trade_usd_value).sum(),
        total_pnl: snapshot.positions.iter().map(|p| p.total_pnl()).sum(),
        trade_count: i32::try_from(snapshot.trades.len()).unwrap_or(i32::MAX),
        first_trade_at: sorted.first().map(|t| t.timestamp),
        last_trade_at: sorted.last().map(|t| t.timestamp),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
