pub mod account_repo;
pub mod activity_repo;
pub mod alert_repo;
pub mod market_repo;
pub mod trade_repo;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{
    AccountRecord, AccountRow, Activity, AlertRow, MarketMetadata, NewAlert, Trade,
};

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Everything a scoring pass reads from or writes to storage.
///
/// Each write targets a single account or market, so concurrent passes for
/// different accounts never contend.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn get_market(&self, market_id: &str) -> anyhow::Result<Option<MarketMetadata>>;

    async fn upsert_market(&self, market: &MarketMetadata) -> anyhow::Result<()>;

    async fn get_account(&self, address: &str) -> anyhow::Result<Option<AccountRow>>;

    /// Must leave an existing row's `created_at` untouched.
    async fn upsert_account(&self, record: &AccountRecord) -> anyhow::Result<AccountRow>;

    /// Full replacement, never a merge.
    async fn replace_trades(&self, address: &str, trades: &[Trade]) -> anyhow::Result<()>;

    /// Full replacement, never a merge.
    async fn replace_activities(&self, address: &str, activities: &[Activity]) -> anyhow::Result<()>;

    async fn append_alert(&self, alert: &NewAlert) -> anyhow::Result<AlertRow>;
}

/// `ScoreStore` backed by the Postgres repos.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreStore for PgStore {
    async fn get_market(&self, market_id: &str) -> anyhow::Result<Option<MarketMetadata>> {
        market_repo::get_market(&self.pool, market_id).await
    }

    async fn upsert_market(&self, market: &MarketMetadata) -> anyhow::Result<()> {
        market_repo::upsert_market(&self.pool, market).await?;
        Ok(())
    }

    async fn get_account(&self, address: &str) -> anyhow::Result<Option<AccountRow>> {
        account_repo::get_account(&self.pool, address).await
    }

    async fn upsert_account(&self, record: &AccountRecord) -> anyhow::Result<AccountRow> {
        account_repo::upsert_account(&self.pool, record).await
    }

    async fn replace_trades(&self, address: &str, trades: &[Trade]) -> anyhow::Result<()> {
        trade_repo::replace_trades(&self.pool, address, trades).await
    }

    async fn replace_activities(&self, address: &str, activities: &[Activity]) -> anyhow::Result<()> {
        activity_repo::replace_activities(&self.pool, address, activities).await
    }

    async fn append_alert(&self, alert: &NewAlert) -> anyhow::Result<AlertRow> {
        alert_repo::insert_alert(&self.pool, alert).await
    }
}
