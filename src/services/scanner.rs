use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tokio::time::{interval, Duration, MissedTickBehavior};

use super::account_scorer::AccountScorer;
use crate::errors::VenueError;
use crate::intelligence::alert_tier;
use crate::models::Venue;
use crate::polymarket::PolymarketAdapter;

/// Source of candidate accounts for a scan.
#[async_trait]
pub trait TraderDiscovery: Send + Sync {
    fn venue(&self) -> Venue;

    /// Recently active accounts, most recent first, without duplicates.
    async fn recent_traders(&self, limit: u32) -> Result<Vec<String>, VenueError>;
}

#[async_trait]
impl TraderDiscovery for PolymarketAdapter {
    fn venue(&self) -> Venue {
        Venue::Polymarket
    }

    async fn recent_traders(&self, limit: u32) -> Result<Vec<String>, VenueError> {
        self.data_client().get_recent_traders(limit).await
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub max_accounts: usize,
    pub concurrency: usize,
    pub rescore_after_secs: i64,
    pub discovery_limit: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_accounts: 25,
            concurrency: 5,
            rescore_after_secs: 7200,
            discovery_limit: 500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Accounts returned by discovery.
    pub discovered: usize,
    /// Accounts scored successfully.
    pub scanned: usize,
    pub new_alerts: usize,
    /// One `"{account}: {error}"` line per failed account.
    pub errors: Vec<String>,
}

/// One scan: discover, skip recently scored accounts, score the rest.
///
/// At most `max_accounts` passes run, `concurrency` at a time. A failed pass
/// is recorded in the summary and does not stop the scan; only a discovery
/// failure does.
pub async fn run_scan(
    scorer: &AccountScorer,
    discovery: &dyn TraderDiscovery,
    config: &ScanConfig,
) -> Result<ScanSummary, VenueError> {
    let venue = discovery.venue();
    let candidates = discovery.recent_traders(config.discovery_limit).await?;

    let mut summary = ScanSummary {
        discovered: candidates.len(),
        ..Default::default()
    };

    let now = Utc::now();
    let mut due: Vec<String> = Vec::new();
    for account in candidates {
        if due.len() >= config.max_accounts {
            break;
        }
        match scorer.store().get_account(&account).await {
            Ok(Some(row)) if (now - row.scored_at).num_seconds() < config.rescore_after_secs => {
                tracing::debug!(account = %account, scored_at = %row.scored_at, "Recently scored, skipping");
            }
            Ok(_) => due.push(account),
            Err(e) => summary.errors.push(format!("{account}: {e}")),
        }
    }

    let results: Vec<_> = stream::iter(due)
        .map(|account| async move {
            let outcome = scorer.score_account(&account, venue).await;
            (account, outcome)
        })
        .buffer_unordered(config.concurrency.max(1))
        .collect()
        .await;

    for (account, outcome) in results {
        match outcome {
            Ok(result) => {
                summary.scanned += 1;
                if alert_tier(result.total_score).is_some() {
                    summary.new_alerts += 1;
                }
            }
            Err(e) => summary.errors.push(format!("{account}: {e}")),
        }
    }

    tracing::info!(
        venue = %venue,
        discovered = summary.discovered,
        scanned = summary.scanned,
        new_alerts = summary.new_alerts,
        errors = summary.errors.len(),
        "Scan complete"
    );

    Ok(summary)
}

/// Run `run_scan` every `interval_secs`, forever. The first scan starts
/// immediately.
pub async fn run_scan_loop(
    scorer: Arc<AccountScorer>,
    discovery: Arc<dyn TraderDiscovery>,
    config: ScanConfig,
    interval_secs: u64,
) {
    tracing::info!(interval_secs, max_accounts = config.max_accounts, "Scan loop started");

    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if let Err(e) = run_scan(&scorer, discovery.as_ref(), &config).await {
            tracing::error!(error = %e, "Scan failed: trader discovery unavailable");
        }
    }
}
