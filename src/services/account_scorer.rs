use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};

use crate::db::ScoreStore;
use crate::errors::{ScoringError, VenueError};
use crate::intelligence::{alert_tier, build_alert_details, build_market_cache, CompositeScorer};
use crate::models::{AccountRecord, AccountSnapshot, NewAlert, ScoringResult, Venue};
use crate::venue::VenueAdapter;

/// Runs full scoring passes: fetch, cache, score, persist, alert.
///
/// One instance is shared across concurrent passes; it holds no per-account state.
pub struct AccountScorer {
    venues: HashMap<Venue, Arc<dyn VenueAdapter>>,
    store: Arc<dyn ScoreStore>,
    scorer: CompositeScorer,
}

impl AccountScorer {
    pub fn new(store: Arc<dyn ScoreStore>, scorer: CompositeScorer) -> Self {
        Self {
            venues: HashMap::new(),
            store,
            scorer,
        }
    }

    /// Register an adapter under the venue it reports.
    pub fn with_venue(mut self, adapter: Arc<dyn VenueAdapter>) -> Self {
        self.venues.insert(adapter.venue(), adapter);
        self
    }

    pub fn store(&self) -> &Arc<dyn ScoreStore> {
        &self.store
    }

    pub async fn score_account(&self, account: &str, venue: Venue) -> Result<ScoringResult, ScoringError> {
        self.score_account_at(account, venue, Utc::now()).await
    }

    /// `score_account` with an explicit clock, used for cache freshness,
    /// wallet age and the persisted timestamps.
    pub async fn score_account_at(
        &self,
        account: &str,
        venue: Venue,
        now: DateTime<Utc>,
    ) -> Result<ScoringResult, ScoringError> {
        let started = Instant::now();
        let outcome = self.run_pass(account, venue, now).await;
        histogram!("scoring_latency_seconds").record(started.elapsed().as_secs_f64());

        match &outcome {
            Ok(result) => {
                counter!("scoring_passes_total").increment(1);
                tracing::info!(
                    account,
                    venue = %venue,
                    score = result.total_score,
                    trades = result.metadata.trade_count,
                    "Account scored"
                );
            }
            Err(e) => {
                counter!("scoring_failures_total").increment(1);
                tracing::warn!(error = %e, account, venue = %venue, "Scoring pass failed");
            }
        }
        outcome
    }

    async fn run_pass(
        &self,
        account: &str,
        venue: Venue,
        now: DateTime<Utc>,
    ) -> Result<ScoringResult, ScoringError> {
        let adapter = self
            .venues
            .get(&venue)
            .ok_or(VenueError::NotConfigured(venue))?;

        // Any venue failure aborts here, before anything is written.
        let (trades, positions, activities) = tokio::try_join!(
            adapter.get_trades(account),
            adapter.get_positions(account),
            adapter.get_activity(account),
        )?;
        let snapshot = AccountSnapshot {
            trades,
            positions,
            activities,
        };

        let cache = build_market_cache(&snapshot.trades, adapter.as_ref(), self.store.as_ref(), now)
            .await
            .map_err(ScoringError::Persistence)?;

        let result = self
            .scorer
            .score(account, venue, &snapshot, &cache, now.timestamp());

        // Write order: account, trades, activities, alert. An alert never
        // outlives the score it refers to.
        let record = AccountRecord::from_result(&result, &snapshot.trades, now);
        self.store
            .upsert_account(&record)
            .await
            .map_err(ScoringError::Persistence)?;
        self.store
            .replace_trades(account, &snapshot.trades)
            .await
            .map_err(ScoringError::Persistence)?;
        self.store
            .replace_activities(account, &snapshot.activities)
            .await
            .map_err(ScoringError::Persistence)?;

        if let Some(tier) = alert_tier(result.total_score) {
            let alert = NewAlert {
                address: account.to_string(),
                tier,
                details: build_alert_details(result.total_score, &result.signals),
                score_at_time: result.total_score,
                created_at: now,
            };
            self.store
                .append_alert(&alert)
                .await
                .map_err(ScoringError::Persistence)?;

            counter!("alerts_emitted_total", "tier" => tier.as_str()).increment(1);
            tracing::info!(
                account,
                tier = %tier,
                score = result.total_score,
                details = %alert.details,
                "Insider alert emitted"
            );
        }

        Ok(result)
    }
}
