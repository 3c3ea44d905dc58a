use chrono::DateTime;
use rust_decimal::Decimal;

use crate::intelligence::utils::{make_signal, DAY_SECS};
use crate::models::{SignalResult, Trade};

/// Newer accounts are more suspicious.
///
/// age = now - first trade. <1d: 1.0, <3d: 0.8, <7d: 0.6, <14d: 0.3, <30d: 0.1, else 0.
pub fn score_wallet_age(trades: &[Trade], now: i64, weight: u32) -> SignalResult {
    let Some(first_ts) = trades.iter().map(|t| t.timestamp).min() else {
        return make_signal(Decimal::ZERO, weight, "No trades found");
    };

    let age_secs = (now - first_ts).max(0);

    let raw = if age_secs < DAY_SECS {
        Decimal::ONE
    } else if age_secs < 3 * DAY_SECS {
        Decimal::new(8, 1)
    } else if age_secs < 7 * DAY_SECS {
        Decimal::new(6, 1)
    } else if age_secs < 14 * DAY_SECS {
        Decimal::new(3, 1)
    } else if age_secs < 30 * DAY_SECS {
        Decimal::new(1, 1)
    } else {
        Decimal::ZERO
    };

    let first_date = DateTime::from_timestamp(first_ts, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".into());

    make_signal(
        raw,
        weight,
        format!("Wallet age: {} days (first trade {first_date})", age_secs / DAY_SECS),
    )
}
