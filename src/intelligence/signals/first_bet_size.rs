use rust_decimal::Decimal;

use crate::intelligence::utils::{clamp, make_signal, sort_by_time, trade_usd_value};
use crate::models::{SignalResult, Trade};

/// Large opening bets are suspicious; seasoned accounts rarely start big.
///
/// first_bet_usd > $25k: 1.0, > $10k: 0.9, > $5k: 0.7, > $2k: 0.5,
/// > $500: 0.3, >= $100: 0.1, else 0. Only the lowest floor is inclusive. Multiplied by 1.2 (capped) when the
/// first three trades all target the same market.
pub fn score_first_bet_size(trades: &[Trade], weight: u32) -> SignalResult {
    let sorted = sort_by_time(trades);
    let Some(first) = sorted.first() else {
        return make_signal(Decimal::ZERO, weight, "No trades found");
    };

    let first_bet_usd = trade_usd_value(first);

    let mut raw = if first_bet_usd > Decimal::from(25_000) {
        Decimal::ONE
    } else if first_bet_usd > Decimal::from(10_000) {
        Decimal::new(9, 1)
    } else if first_bet_usd > Decimal::from(5_000) {
        Decimal::new(7, 1)
    } else if first_bet_usd > Decimal::from(2_000) {
        Decimal::new(5, 1)
    } else if first_bet_usd > Decimal::from(500) {
        Decimal::new(3, 1)
    } else if first_bet_usd >= Decimal::from(100) {
        Decimal::new(1, 1)
    } else {
        Decimal::ZERO
    };

    let concentrated = sorted.len() >= 3
        && sorted[1].market_id == first.market_id
        && sorted[2].market_id == first.market_id;
    if concentrated {
        raw = clamp(raw * Decimal::new(12, 1), Decimal::ZERO, Decimal::ONE);
    }

    let mut details = format!("First bet: ${} USD", first_bet_usd.round_dp(2));
    if concentrated {
        details.push_str(" (first 3 trades in one market)");
    }

    make_signal(raw, weight, details)
}
