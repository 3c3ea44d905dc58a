use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::intelligence::utils::{make_signal, unique_markets};
use crate::models::{Side, SignalResult, Trade};

/// Price spread (relative to the lowest fill) above which repeated buys of one
/// outcome count as dollar-cost averaging.
const DCA_SPREAD: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarketStance {
    Hedge,
    Dca,
    Conviction,
}

fn classify(buys: &[&Trade]) -> MarketStance {
    let outcomes: HashSet<&str> = buys.iter().map(|t| t.outcome.as_str()).collect();
    if outcomes.len() > 1 {
        return MarketStance::Hedge;
    }

    if buys.len() >= 2 {
        let min = buys.iter().map(|t| t.price).min().unwrap_or_default();
        let max = buys.iter().map(|t| t.price).max().unwrap_or_default();
        if min > Decimal::ZERO && (max - min) / min > DCA_SPREAD {
            return MarketStance::Dca;
        }
    }

    MarketStance::Conviction
}

/// Insiders don't hedge; they already know the answer.
///
/// Per market with buys: bought more than one outcome is a hedge, repeated buys
/// with > 20% price spread is DCA, anything else is conviction.
/// ratio = conviction / markets with buys: >0.9: 1.0, >0.7: 0.7, >0.5: 0.4, else 0.
pub fn score_no_hedging(trades: &[Trade], weight: u32) -> SignalResult {
    let markets = unique_markets(trades);

    if markets.is_empty() {
        return make_signal(Decimal::ZERO, weight, "No trades found");
    }

    let mut with_buys = 0usize;
    let mut conviction = 0usize;

    for market_id in &markets {
        let buys: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.market_id == *market_id && t.side == Side::Buy)
            .collect();
        if buys.is_empty() {
            continue;
        }
        with_buys += 1;
        if classify(&buys) == MarketStance::Conviction {
            conviction += 1;
        }
    }

    if with_buys == 0 {
        return make_signal(Decimal::ZERO, weight, "No markets with buy trades");
    }

    let ratio = Decimal::from(conviction as i64) / Decimal::from(with_buys as i64);

    let raw = if ratio > Decimal::new(9, 1) {
        Decimal::ONE
    } else if ratio > Decimal::new(7, 1) {
        Decimal::new(7, 1)
    } else if ratio > Decimal::new(5, 1) {
        Decimal::new(4, 1)
    } else {
        Decimal::ZERO
    };

    make_signal(
        raw,
        weight,
        format!(
            "{conviction}/{with_buys} markets show conviction (ratio {})",
            ratio.round_dp(2)
        ),
    )
}
