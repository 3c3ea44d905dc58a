mod common;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use insiderscope::errors::{ScoringError, VenueError};
use insiderscope::intelligence::{CompositeScorer, SignalWeights};
use insiderscope::models::{MarketMetadata, Position, Venue};
use insiderscope::services::AccountScorer;

use common::{market_info, redeem, trade, FakeVenue, InMemoryStore};

const NOW: i64 = 1_700_000_000;
const ACCOUNT: &str = "0xinsider";

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(NOW, 0).unwrap()
}

fn scorer_with(venue: FakeVenue, store: Arc<InMemoryStore>) -> (AccountScorer, Arc<FakeVenue>) {
    let venue = Arc::new(venue);
    let scorer = AccountScorer::new(store, CompositeScorer::new(SignalWeights::DEFAULT).unwrap())
        .with_venue(venue.clone());
    (scorer, venue)
}

/// Fresh account, one $30k buy 20 minutes before a deep market ends, redeemed
/// five minutes after. Scores 85: every signal but win rate maxes out.
fn insider_venue() -> FakeVenue {
    let mut venue = FakeVenue::new().with_market("m1", market_info(NOW - 600, 1_000_000));
    venue.trades = vec![trade(ACCOUNT, "m1", 50_000, Decimal::new(6, 1), NOW - 1_800)];
    venue.activities = vec![redeem("m1", NOW - 300)];
    venue
}

#[tokio::test]
async fn zero_trade_account_scores_zero_without_alert() {
    let store = Arc::new(InMemoryStore::new());
    let (scorer, _) = scorer_with(FakeVenue::new(), store.clone());

    let result = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    assert_eq!(result.total_score, 0);
    for (kind, signal) in result.signals.iter() {
        assert_eq!(signal.raw, Decimal::ZERO, "{kind} should be zero");
        assert!(signal.details.starts_with("No "), "{kind}: {}", signal.details);
    }
    assert_eq!(result.metadata.trade_count, 0);
    assert_eq!(result.metadata.first_trade_at, None);
    assert!(store.alerts().is_empty());

    let row = store.account(ACCOUNT).expect("account row written");
    assert_eq!(row.total_score, 0);
}

#[tokio::test]
async fn insider_pattern_emits_extreme_alert() {
    let store = Arc::new(InMemoryStore::new());
    let (scorer, _) = scorer_with(insider_venue(), store.clone());

    let result = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    assert_eq!(result.total_score, 85);
    assert_eq!(result.signals.bet_timing.weighted, Decimal::from(20));
    assert_eq!(result.signals.withdrawal_speed.raw, Decimal::ONE);
    assert_eq!(result.signals.win_rate.raw, Decimal::ZERO);
    assert_eq!(result.metadata.total_volume, Decimal::from(30_000));
    assert_eq!(result.metadata.first_trade_at, Some(NOW - 1_800));

    let alerts = store.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].tier, "EXTREME");
    assert_eq!(alerts[0].score_at_time, 85);
    assert_eq!(
        alerts[0].details,
        "Score 85/100. Top signals: bet_timing: 20.0, wallet_age: 15.0, first_bet_size: 15.0"
    );
}

#[tokio::test]
async fn writes_happen_in_order() {
    let store = Arc::new(InMemoryStore::new());
    let (scorer, _) = scorer_with(insider_venue(), store.clone());

    scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    let expected: Vec<String> = [
        "upsert_market:m1",
        "upsert_account:0xinsider",
        "replace_trades:0xinsider",
        "replace_activities:0xinsider",
        "append_alert:0xinsider",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(store.ops(), expected);
}

#[tokio::test]
async fn rescoring_preserves_created_at_and_replaces_records() {
    let store = Arc::new(InMemoryStore::new());
    let (scorer, _) = scorer_with(insider_venue(), store.clone());

    scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();
    let first = store.account(ACCOUNT).unwrap();

    let later = now() + Duration::hours(3);
    scorer.score_account_at(ACCOUNT, Venue::Polymarket, later).await.unwrap();
    let second = store.account(ACCOUNT).unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.scored_at, later);
    // Replaced, not appended.
    assert_eq!(store.trades(ACCOUNT).len(), 1);
    assert_eq!(store.activities(ACCOUNT).len(), 1);
    // One alert per crossing pass, no deduplication.
    assert_eq!(store.alerts().len(), 2);
}

#[tokio::test]
async fn same_input_scores_identically() {
    let store = Arc::new(InMemoryStore::new());
    let (scorer, _) = scorer_with(insider_venue(), store.clone());

    let a = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();
    let b = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn venue_failure_writes_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let mut venue = insider_venue();
    venue.fail_positions = true;
    let (scorer, _) = scorer_with(venue, store.clone());

    let err = scorer
        .score_account_at(ACCOUNT, Venue::Polymarket, now())
        .await
        .unwrap_err();

    assert!(matches!(err, ScoringError::Venue(VenueError::RateLimited { .. })));
    assert!(store.ops().is_empty());
    assert!(store.account(ACCOUNT).is_none());
}

#[tokio::test]
async fn unregistered_venue_is_an_error() {
    let store = Arc::new(InMemoryStore::new());
    let (scorer, _) = scorer_with(FakeVenue::new(), store.clone());

    let err = scorer.score_account_at(ACCOUNT, Venue::Kalshi, now()).await.unwrap_err();
    assert!(matches!(err, ScoringError::Venue(VenueError::NotConfigured(Venue::Kalshi))));
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn persistence_failure_fails_the_pass_before_alerting() {
    let store = Arc::new(InMemoryStore::new());
    store.fail_on("replace_trades");
    let (scorer, _) = scorer_with(insider_venue(), store.clone());

    let err = scorer
        .score_account_at(ACCOUNT, Venue::Polymarket, now())
        .await
        .unwrap_err();

    assert!(matches!(err, ScoringError::Persistence(_)));
    assert!(store.alerts().is_empty());
    assert!(store.trades(ACCOUNT).is_empty());
}

#[tokio::test]
async fn market_failures_degrade_only_market_signals() {
    let store = Arc::new(InMemoryStore::new());
    let mut venue = insider_venue();
    venue.failing_markets.insert("m1".into());
    let (scorer, _) = scorer_with(venue, store.clone());

    let result = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();
    let s = &result.signals;

    for signal in [&s.bet_timing, &s.withdrawal_speed, &s.market_selection, &s.win_rate] {
        assert_eq!(signal.raw, Decimal::ZERO);
        assert!(signal.details.contains("No market data"), "{}", signal.details);
    }
    assert_eq!(s.wallet_age.raw, Decimal::ONE);
    assert_eq!(s.first_bet_size.raw, Decimal::ONE);
    assert_eq!(s.no_hedging.raw, Decimal::ONE);
    assert_eq!(result.total_score, 40);

    assert!(store.market("m1").is_none());
    assert!(store.alerts().is_empty());
}

#[tokio::test]
async fn partial_cache_keeps_successful_markets() {
    let store = Arc::new(InMemoryStore::new());
    let mut venue = insider_venue().with_market("m2", market_info(NOW + 86_400 * 10, 1_000));
    venue.trades.push(trade(ACCOUNT, "m2", 10, Decimal::new(5, 1), NOW - 1_000));
    venue.trades.push(trade(ACCOUNT, "m3", 10, Decimal::new(5, 1), NOW - 900));
    venue.failing_markets.insert("m3".into());
    let (scorer, venue) = scorer_with(venue, store.clone());

    let result = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    assert_eq!(venue.market_calls(), 3);
    assert!(store.market("m1").is_some());
    assert!(store.market("m2").is_some());
    assert!(store.market("m3").is_none());
    // m1 deep, m2 shallow: 1 of 2 markets with data.
    assert!(result.signals.market_selection.details.starts_with("1/2 high-volume markets"));
}

#[tokio::test]
async fn fresh_cached_markets_are_not_refetched() {
    let store = Arc::new(InMemoryStore::new());
    let cached = MarketMetadata::from_info(
        "m1",
        market_info(NOW - 600, 1_000_000),
        Venue::Polymarket,
        now() - Duration::minutes(10),
    );
    store.seed_market(cached.clone());
    let (scorer, venue) = scorer_with(insider_venue(), store.clone());

    scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    assert_eq!(venue.market_calls(), 0);
    assert_eq!(store.market("m1"), Some(cached));
}

#[tokio::test]
async fn stale_cached_markets_are_refreshed() {
    let store = Arc::new(InMemoryStore::new());
    store.seed_market(MarketMetadata::from_info(
        "m1",
        market_info(NOW - 600, 10),
        Venue::Polymarket,
        now() - Duration::hours(2),
    ));
    let (scorer, venue) = scorer_with(insider_venue(), store.clone());

    scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    assert_eq!(venue.market_calls(), 1);
    let refreshed = store.market("m1").unwrap();
    assert_eq!(refreshed.cached_at, now());
    assert_eq!(refreshed.volume, Decimal::from(1_000_000));
}

#[tokio::test]
async fn kalshi_records_score_like_any_other_venue() {
    let store = Arc::new(InMemoryStore::new());
    let mut venue = insider_venue();
    venue.venue = Some(Venue::Kalshi);
    for t in &mut venue.trades {
        t.venue = Venue::Kalshi;
    }
    let (scorer, _) = scorer_with(venue, store.clone());

    let result = scorer.score_account_at(ACCOUNT, Venue::Kalshi, now()).await.unwrap();

    assert_eq!(result.venue, Venue::Kalshi);
    assert_eq!(result.total_score, 85);
    assert_eq!(store.account(ACCOUNT).unwrap().venue, "kalshi");
    assert_eq!(store.market("m1").unwrap().venue, "kalshi");
}

#[tokio::test]
async fn resolved_win_lifts_win_rate() {
    let store = Arc::new(InMemoryStore::new());
    let mut info = market_info(NOW - 600, 1_000_000);
    info.resolved_at = Some(NOW - 500);
    info.outcome = Some("Yes".into());
    let mut venue = insider_venue().with_market("m1", info);
    venue.positions = vec![Position {
        market_id: "m1".into(),
        size: Decimal::ZERO,
        realized_pnl: Decimal::from(20_000),
        cash_pnl: Decimal::ZERO,
        outcome: "Yes".into(),
    }];
    let (scorer, _) = scorer_with(venue, store.clone());

    let result = scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    // A single win is worth 0.2 of the win-rate weight.
    assert_eq!(result.signals.win_rate.raw, Decimal::new(2, 1));
    assert_eq!(result.total_score, 88);
    assert_eq!(result.metadata.total_pnl, Decimal::from(20_000));
}

#[tokio::test]
async fn profile_fields_come_from_the_first_trade_only() {
    let store = Arc::new(InMemoryStore::new());
    let mut venue = insider_venue();
    let mut named = trade(ACCOUNT, "m1", 10, Decimal::new(5, 1), NOW - 1_000);
    named.username = Some("Quiet-Fox".into());
    named.profile_image = Some("https://img.example/fox.png".into());
    venue.trades.push(named);
    let (scorer, _) = scorer_with(venue, store.clone());

    scorer.score_account_at(ACCOUNT, Venue::Polymarket, now()).await.unwrap();

    let row = store.account(ACCOUNT).unwrap();
    assert_eq!(row.username, None);
    assert_eq!(row.profile_image, None);
}
