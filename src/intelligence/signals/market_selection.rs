use rust_decimal::Decimal;

use crate::intelligence::market_cache::MarketCache;
use crate::intelligence::utils::{clamp, make_signal, unique_markets};
use crate::models::{SignalResult, Trade};

const HIGH_VOLUME_USD: i64 = 500_000;
const FOCUS_MARKET_LIMIT: usize = 5;

/// Insiders gravitate to deep, high-volume markets.
///
/// ratio = markets with volume > $500k / markets with cached data.
/// >0.9: 1.0, >0.7: 0.7, >0.5: 0.4, else 0. Trading fewer than 5 markets
/// multiplies by 1.3 (capped).
pub fn score_market_selection(trades: &[Trade], cache: &MarketCache, weight: u32) -> SignalResult {
    let markets = unique_markets(trades);

    if markets.is_empty() {
        return make_signal(Decimal::ZERO, weight, "No markets traded");
    }

    let threshold = Decimal::from(HIGH_VOLUME_USD);
    let mut evaluated = 0usize;
    let mut high_volume = 0usize;

    for market_id in &markets {
        let Some(market) = cache.get(*market_id) else { continue };
        evaluated += 1;
        if market.volume > threshold {
            high_volume += 1;
        }
    }

    if evaluated == 0 {
        return make_signal(
            Decimal::ZERO,
            weight,
            format!("No market data for {} traded markets", markets.len()),
        );
    }

    let ratio = Decimal::from(high_volume as i64) / Decimal::from(evaluated as i64);

    let mut raw = if ratio > Decimal::new(9, 1) {
        Decimal::ONE
    } else if ratio > Decimal::new(7, 1) {
        Decimal::new(7, 1)
    } else if ratio > Decimal::new(5, 1) {
        Decimal::new(4, 1)
    } else {
        Decimal::ZERO
    };

    if markets.len() < FOCUS_MARKET_LIMIT {
        raw = clamp(raw * Decimal::new(13, 1), Decimal::ZERO, Decimal::ONE);
    }

    make_signal(
        raw,
        weight,
        format!(
            "{high_volume}/{evaluated} high-volume markets (ratio {}), {} unique markets",
            ratio.round_dp(2),
            markets.len()
        ),
    )
}
