use crate::models::{AlertTier, SignalResults};

/// Scores strictly above this raise a HIGH alert.
pub const HIGH_THRESHOLD: i32 = 60;
/// Scores strictly above this raise an EXTREME alert.
pub const EXTREME_THRESHOLD: i32 = 80;

const TOP_SIGNALS: usize = 3;

/// Alert tier for a composite score, if any.
///
/// Rules:
/// - **Extreme**: score > 80.
/// - **High**: 60 < score <= 80.
/// - nothing at 60 or below.
pub fn alert_tier(score: i32) -> Option<AlertTier> {
    if score > EXTREME_THRESHOLD {
        Some(AlertTier::Extreme)
    } else if score > HIGH_THRESHOLD {
        Some(AlertTier::High)
    } else {
        None
    }
}

/// Alert rationale naming the three largest weighted contributions, e.g.
/// `Score 85/100. Top signals: bet_timing: 20.0, wallet_age: 15.0, win_rate: 12.0`.
///
/// Equal contributions keep the fixed signal order.
pub fn build_alert_details(score: i32, signals: &SignalResults) -> String {
    let mut ranked: Vec<_> = signals.iter().collect();
    // sort_by is stable, so ties stay in evaluation order
    ranked.sort_by(|(_, a), (_, b)| b.weighted.cmp(&a.weighted));

    let top = ranked
        .iter()
        .take(TOP_SIGNALS)
        .map(|(kind, s)| format!("{kind}: {:.1}", s.weighted))
        .collect::<Vec<_>>()
        .join(", ");

    format!("Score {score}/100. Top signals: {top}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
