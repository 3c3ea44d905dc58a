use rust_decimal::Decimal;

use crate::intelligence::market_cache::MarketCache;
use crate::intelligence::utils::{make_signal, trade_usd_value, unique_markets, HOUR_SECS};
use crate::models::{SignalResult, Trade};

/// Score for one trade placed `secs_before` seconds ahead of market end.
fn timing_score(secs_before: i64) -> Decimal {
    if secs_before < HOUR_SECS {
        Decimal::ONE
    } else if secs_before < 6 * HOUR_SECS {
        Decimal::new(8, 1)
    } else if secs_before < 12 * HOUR_SECS {
        Decimal::new(6, 1)
    } else if secs_before < 24 * HOUR_SECS {
        Decimal::new(3, 1)
    } else {
        Decimal::ZERO
    }
}

/// Bets placed shortly before a market ends are the strongest single tell.
///
/// Per trade: hours before end <1: 1.0, <6: 0.8, <12: 0.6, <24: 0.3, else 0.
/// Trades after the end, or in markets without a known end, are skipped.
/// The result is the USD-weighted average of per-trade scores.
pub fn score_bet_timing(trades: &[Trade], cache: &MarketCache, weight: u32) -> SignalResult {
    if trades.is_empty() {
        return make_signal(Decimal::ZERO, weight, "No trades found");
    }

    let mut weighted_sum = Decimal::ZERO;
    let mut total_volume = Decimal::ZERO;
    let mut scored = 0usize;

    for trade in trades {
        let Some(end) = cache.get(&trade.market_id).and_then(|m| m.end_date) else {
            continue;
        };

        let secs_before = end - trade.timestamp;
        if secs_before < 0 {
            continue;
        }

        let usd = trade_usd_value(trade);
        weighted_sum += timing_score(secs_before) * usd;
        total_volume += usd;
        scored += 1;
    }

    if scored == 0 {
        return make_signal(
            Decimal::ZERO,
            weight,
            format!(
                "No market data with end dates for {} traded markets",
                unique_markets(trades).len()
            ),
        );
    }

    if total_volume.is_zero() {
        return make_signal(
            Decimal::ZERO,
            weight,
            format!("{scored} trades timed but their USD volume is zero"),
        );
    }

    let raw = weighted_sum / total_volume;

    make_signal(
        raw,
        weight,
        format!(
            "{scored} trades scored for timing; volume-weighted avg = {}",
            raw.round_dp(3)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::utils::test_support::{buy, market};

    const END: i64 = 1_700_000_000;

    fn cache_with_end() -> MarketCache {
        let mut cache = MarketCache::new();
        cache.insert("m1".into(), market("m1", Some(END), 1_000_000));
        cache
    }

    #[test]
    fn last_half_hour_bet_scores_max() {
        let trades = vec![buy("m1", 1_000, Decimal::new(1, 1), END - 1_800)];
        let s = score_bet_timing(&trades, &cache_with_end(), 20);
        assert_eq!(s.raw, Decimal::ONE);
        assert_eq!(s.weighted, Decimal::from(20));
    }

    #[test]
    fn average_is_weighted_by_usd_not_count() {
        // $900 at <1h (1.0), $100 at 3 days (0.0) -> 0.9
        let trades = vec![
            buy("m1", 1_000, Decimal::new(9, 1), END - 600),
            buy("m1", 1_000, Decimal::new(1, 1), END - 72 * HOUR_SECS),
        ];
        let s = score_bet_timing(&trades, &cache_with_end(), 20);
        assert_eq!(s.raw, Decimal::new(9, 1));
    }

    #[test]
    fn growing_a_late_trade_never_lowers_the_score() {
        let cache = cache_with_end();
        let mut previous = Decimal::ZERO;
        for size in [100, 500, 1_000, 5_000, 50_000] {
            let trades = vec![
                buy("m1", size, Decimal::new(5, 1), END - 600),
                buy("m1", 1_000, Decimal::new(5, 1), END - 8 * HOUR_SECS),
            ];
            let raw = score_bet_timing(&trades, &cache, 20).raw;
            assert!(raw >= previous, "raw {raw} dropped below {previous} at size {size}");
            previous = raw;
        }
    }

    #[test]
    fn trades_after_end_are_skipped() {
        let trades = vec![buy("m1", 1_000, Decimal::ONE, END + 60)];
        let s = score_bet_timing(&trades, &cache_with_end(), 20);
        assert_eq!(s.raw, Decimal::ZERO);
        assert!(s.details.starts_with("No market data"));
    }

    #[test]
    fn missing_market_means_no_market_data() {
        let trades = vec![buy("unknown", 1_000, Decimal::ONE, END - 60)];
        let s = score_bet_timing(&trades, &MarketCache::new(), 20);
        assert_eq!(s.raw, Decimal::ZERO);
        assert!(s.details.to_lowercase().contains("no market data"));
    }

    #[test]
    fn zero_volume_trades_are_not_reported_as_missing_market_data() {
        let trades = vec![buy("m1", 1_000, Decimal::ZERO, END - 60)];
        let s = score_bet_timing(&trades, &cache_with_end(), 20);
        assert_eq!(s.raw, Decimal::ZERO);
        assert!(!s.details.contains("No market data"), "{}", s.details);
        assert!(s.details.contains("volume is zero"));
    }

    #[test]
    fn bucket_edges() {
        assert_eq!(timing_score(HOUR_SECS - 1), Decimal::ONE);
        assert_eq!(timing_score(HOUR_SECS), Decimal::new(8, 1));
        assert_eq!(timing_score(11 * HOUR_SECS), Decimal::new(6, 1));
        assert_eq!(timing_score(23 * HOUR_SECS), Decimal::new(3, 1));
        assert_eq!(timing_score(24 * HOUR_SECS), Decimal::ZERO);
    }
}
