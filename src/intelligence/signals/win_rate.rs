use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::intelligence::market_cache::MarketCache;
use crate::intelligence::utils::{make_signal, trade_usd_value, DAY_SECS};
use crate::models::{MarketMetadata, Position, Side, SignalResult, Trade};

/// Longest gap between an account's first trade in a market and that market's
/// resolution for the result to count.
const LOOKBACK_SECS: i64 = 90 * DAY_SECS;

/// Winning far more often than the market implies, on markets entered shortly
/// before resolution, suggests foreknowledge.
///
/// A market contributes one win or loss. Position PnL (realized + cash) decides
/// first; markets without a position verdict fall back to comparing the
/// account's dominant USD-weighted bought outcome with the resolved outcome.
///
/// >0.9 & n>=3: 1.0, >0.8 & n>=3: 0.8, >0.7 & n>=2: 0.6, >0.6 & n>=2: 0.3,
/// a single win: 0.2, else 0.
pub fn score_win_rate(
    positions: &[Position],
    trades: &[Trade],
    cache: &MarketCache,
    weight: u32,
) -> SignalResult {
    if positions.is_empty() && trades.is_empty() {
        return make_signal(Decimal::ZERO, weight, "No positions or trades found");
    }

    let mut first_trade: HashMap<&str, i64> = HashMap::new();
    for trade in trades {
        first_trade
            .entry(trade.market_id.as_str())
            .and_modify(|ts| *ts = (*ts).min(trade.timestamp))
            .or_insert(trade.timestamp);
    }

    let has_market_data = positions
        .iter()
        .map(|p| p.market_id.as_str())
        .chain(trades.iter().map(|t| t.market_id.as_str()))
        .any(|id| cache.contains_key(id));

    if !has_market_data {
        return make_signal(
            Decimal::ZERO,
            weight,
            "No market data for any traded or held market",
        );
    }

    // Resolved market inside the lookback window, if any.
    let qualifying = |market_id: &str| -> Option<&MarketMetadata> {
        let market = cache.get(market_id)?;
        let resolved_at = market.resolved_at?;
        let first = *first_trade.get(market_id)?;
        let gap = resolved_at - first;
        (0..=LOOKBACK_SECS).contains(&gap).then_some(market)
    };

    let mut results: HashMap<&str, bool> = HashMap::new();

    let mut pnl_by_market: HashMap<&str, Decimal> = HashMap::new();
    for pos in positions {
        *pnl_by_market.entry(pos.market_id.as_str()).or_default() += pos.total_pnl();
    }
    for (&market_id, pnl) in &pnl_by_market {
        if qualifying(market_id).is_none() || pnl.is_zero() {
            continue;
        }
        results.insert(market_id, pnl.is_sign_positive());
    }
    let from_positions = results.len();

    // USD bought per outcome, per market, in first-seen order.
    let mut bought: Vec<(&str, Vec<(&str, Decimal)>)> = Vec::new();
    for trade in trades.iter().filter(|t| t.side == Side::Buy) {
        let idx = match bought.iter().position(|(m, _)| *m == trade.market_id) {
            Some(i) => i,
            None => {
                bought.push((trade.market_id.as_str(), Vec::new()));
                bought.len() - 1
            }
        };
        let outcomes = &mut bought[idx].1;
        match outcomes.iter_mut().find(|(o, _)| *o == trade.outcome) {
            Some((_, usd)) => *usd += trade_usd_value(trade),
            None => outcomes.push((trade.outcome.as_str(), trade_usd_value(trade))),
        }
    }

    for (market_id, outcomes) in &bought {
        let market_id: &str = market_id;
        if results.contains_key(market_id) {
            continue;
        }
        let Some(resolved_outcome) = qualifying(market_id).and_then(|m| m.outcome.as_deref())
        else {
            continue;
        };
        let mut dominant: Option<(&str, Decimal)> = None;
        for &(outcome, usd) in outcomes {
            if dominant.map_or(true, |(_, best)| usd > best) {
                dominant = Some((outcome, usd));
            }
        }
        if let Some((outcome, _)) = dominant {
            results.insert(market_id, outcome.eq_ignore_ascii_case(resolved_outcome));
        }
    }
    let inferred = results.len() - from_positions;

    let total = results.len();
    let wins = results.values().filter(|won| **won).count();

    if total == 0 {
        return make_signal(
            Decimal::ZERO,
            weight,
            "No resolved markets within 90 days of first trade",
        );
    }

    let rate = Decimal::from(wins as i64) / Decimal::from(total as i64);

    let raw = if rate > Decimal::new(9, 1) && total >= 3 {
        Decimal::ONE
    } else if rate > Decimal::new(8, 1) && total >= 3 {
        Decimal::new(8, 1)
    } else if rate > Decimal::new(7, 1) && total >= 2 {
        Decimal::new(6, 1)
    } else if rate > Decimal::new(6, 1) && total >= 2 {
        Decimal::new(3, 1)
    } else if total == 1 && wins == 1 {
        Decimal::new(2, 1)
    } else {
        Decimal::ZERO
    };

    if total < 2 && raw.is_zero() {
        return make_signal(
            Decimal::ZERO,
            weight,
            format!("Only {total} qualifying market (need >= 2)"),
        );
    }

    make_signal(
        raw,
        weight,
        format!(
            "Win rate: {wins}/{total} = {}% on resolved markets ({from_positions} from positions, {inferred} inferred from trades)",
            (rate * Decimal::ONE_HUNDRED).round_dp(1)
        ),
    )
}
