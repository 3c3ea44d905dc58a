use rust_decimal::Decimal;

use crate::intelligence::market_cache::MarketCache;
use crate::intelligence::utils::{make_signal, HOUR_SECS};
use crate::models::{Activity, ActivityKind, Side, SignalResult};

fn redeem_score(secs_after: i64) -> Decimal {
    if secs_after < HOUR_SECS {
        Decimal::ONE
    } else if secs_after < 6 * HOUR_SECS {
        Decimal::new(7, 1)
    } else if secs_after < 24 * HOUR_SECS {
        Decimal::new(3, 1)
    } else {
        Decimal::ZERO
    }
}

fn sell_score(secs_from_end: i64) -> Decimal {
    if secs_from_end < 2 * HOUR_SECS {
        Decimal::new(8, 1)
    } else if secs_from_end < 12 * HOUR_SECS {
        Decimal::new(5, 1)
    } else if secs_from_end < 48 * HOUR_SECS {
        Decimal::new(2, 1)
    } else {
        Decimal::ZERO
    }
}

fn market_end(activity: &Activity, cache: &MarketCache) -> Option<i64> {
    let market_id = activity.market_id.as_deref()?;
    cache.get(market_id)?.end_date
}

/// Fast exits after resolution suggest a pre-planned trade.
///
/// Primary source is REDEEM events: hours after market end <1: 1.0, <6: 0.7,
/// <24: 0.3, else 0, averaged over redeems with a known end. Accounts with no
/// redeems fall back to SELL activity near the end: <2h: 0.8, <12h: 0.5,
/// <48h: 0.2, averaged over sells with a known end.
pub fn score_withdrawal_speed(
    activities: &[Activity],
    cache: &MarketCache,
    weight: u32,
) -> SignalResult {
    if activities.is_empty() {
        return make_signal(Decimal::ZERO, weight, "No activity found");
    }

    let redeems: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.kind == ActivityKind::Redeem)
        .collect();

    if !redeems.is_empty() {
        let mut total = Decimal::ZERO;
        let mut scored = 0u32;

        for redeem in &redeems {
            let Some(end) = market_end(redeem, cache) else { continue };
            let secs_after = redeem.timestamp - end;
            if secs_after < 0 {
                continue;
            }
            total += redeem_score(secs_after);
            scored += 1;
        }

        if scored == 0 {
            return make_signal(
                Decimal::ZERO,
                weight,
                format!("No market data with end dates for {} redeems", redeems.len()),
            );
        }

        let raw = total / Decimal::from(scored);
        return make_signal(
            raw,
            weight,
            format!("{scored} redeems scored; avg withdrawal speed = {}", raw.round_dp(3)),
        );
    }

    let sells: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.side == Some(Side::Sell) && a.kind == ActivityKind::Trade)
        .collect();

    if sells.is_empty() {
        return make_signal(Decimal::ZERO, weight, "No redeem or sell activity found");
    }

    let mut total = Decimal::ZERO;
    let mut scored = 0u32;

    for sell in &sells {
        let Some(end) = market_end(sell, cache) else { continue };
        total += sell_score((sell.timestamp - end).abs());
        scored += 1;
    }

    if scored == 0 {
        return make_signal(
            Decimal::ZERO,
            weight,
            format!("No market data with end dates for {} sells", sells.len()),
        );
    }

    let raw = total / Decimal::from(scored);
    make_signal(
        raw,
        weight,
        format!(
            "No redeems; {scored} sells scored by proximity to market end, avg = {}",
            raw.round_dp(3)
        ),
    )
}
