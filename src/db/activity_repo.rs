use sqlx::PgPool;

use crate::models::Activity;

/// Swap an account's stored activity feed for `activities`, atomically.
pub async fn replace_activities(
    pool: &PgPool,
    address: &str,
    activities: &[Activity],
) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM account_activities WHERE address = $1")
        .bind(address)
        .execute(&mut *tx)
        .await?;

    for activity in activities {
        sqlx::query(
            r#"
            INSERT INTO account_activities
                (address, kind, market_id, side, size, usdc_size, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(address)
        .bind(activity.kind.as_str())
        .bind(&activity.market_id)
        .bind(activity.side.map(|s| s.as_str()))
        .bind(activity.size)
        .bind(activity.usdc_size)
        .bind(activity.timestamp)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

pub async fn count_activities(pool: &PgPool, address: &str) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM account_activities WHERE address = $1")
        .bind(address)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
