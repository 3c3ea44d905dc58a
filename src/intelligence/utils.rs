use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{SignalResult, Trade};

pub const HOUR_SECS: i64 = 3_600;
pub const DAY_SECS: i64 = 86_400;

/// Clamp `value` into `[min, max]`.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

/// USD notional of a trade: `size * price`.
pub fn trade_usd_value(trade: &Trade) -> Decimal {
    trade.size * trade.price
}

/// Trades ordered by timestamp ascending. Stable, leaves the input untouched.
pub fn sort_by_time(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.timestamp);
    sorted
}

/// Distinct market ids in order of first appearance.
pub fn unique_markets(trades: &[Trade]) -> Vec<&str> {
    let mut seen = HashSet::new();
    trades
        .iter()
        .map(|t| t.market_id.as_str())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Parse an ISO-8601-ish timestamp to unix seconds. Returns `None` on anything
/// unparseable.
///
/// Accepts RFC 3339, the `2024-11-06 05:09:40+00` form Gamma uses for close
/// times, naive date-times (read as UTC) and bare dates.
pub fn iso_to_unix(iso: Option<&str>) -> Option<i64> {
    let s = iso?.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%#z", "%Y-%m-%d %H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp());
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Build a `SignalResult`, clamping `raw` to [0, 1].
pub fn make_signal(raw: Decimal, weight: u32, details: impl Into<String>) -> SignalResult {
    let raw = clamp(raw, Decimal::ZERO, Decimal::ONE);
    SignalResult {
        raw,
        weight,
        weighted: raw * Decimal::from(weight),
        details: details.into(),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::buy;
    use super::*;

    #[test]
    fn make_signal_clamps_and_weights() {
        let s = make_signal(Decimal::new(13, 1), 10, "over");
        assert_eq!(s.raw, Decimal::ONE);
        assert_eq!(s.weighted, Decimal::from(10));

        let s = make_signal(Decimal::new(-5, 1), 15, "under");
        assert_eq!(s.raw, Decimal::ZERO);
        assert_eq!(s.weighted, Decimal::ZERO);

        let s = make_signal(Decimal::new(3, 1), 15, "mid");
        assert_eq!(s.weighted, s.raw * Decimal::from(15));
    }

    #[test]
    fn sort_by_time_is_stable_and_non_mutating() {
        let trades = vec![
            buy("b", 1, Decimal::ONE, 20),
            buy("a", 1, Decimal::ONE, 10),
            buy("c", 1, Decimal::ONE, 20),
        ];
        let sorted = sort_by_time(&trades);
        let order: Vec<&str> = sorted.iter().map(|t| t.market_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(trades[0].market_id, "b");
    }

    #[test]
    fn unique_markets_keeps_first_appearance_order() {
        let trades = vec![
            buy("m2", 1, Decimal::ONE, 1),
            buy("m1", 1, Decimal::ONE, 2),
            buy("m2", 1, Decimal::ONE, 3),
        ];
        assert_eq!(unique_markets(&trades), vec!["m2", "m1"]);
    }

    #[test]
    fn trade_usd_value_is_size_times_price() {
        let t = buy("m", 1_000, Decimal::new(1, 1), 0);
        assert_eq!(trade_usd_value(&t), Decimal::from(100));
    }

    #[test]
    fn iso_to_unix_accepts_common_shapes() {
        assert_eq!(iso_to_unix(Some("2024-01-01T00:00:00Z")), Some(1_704_067_200));
        assert_eq!(iso_to_unix(Some("2024-01-01T00:00:00.000Z")), Some(1_704_067_200));
        assert_eq!(iso_to_unix(Some("2024-01-01 00:00:00+00")), Some(1_704_067_200));
        assert_eq!(iso_to_unix(Some("2024-01-01")), Some(1_704_067_200));
    }

    #[test]
    fn iso_to_unix_fails_soft() {
        assert_eq!(iso_to_unix(None), None);
        assert_eq!(iso_to_unix(Some("")), None);
        assert_eq!(iso_to_unix(Some("not a date")), None);
    }
}
