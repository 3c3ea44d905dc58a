use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AlertRow, NewAlert};

/// Append an alert. Alerts are never updated or deduplicated here.
pub async fn insert_alert(pool: &PgPool, alert: &NewAlert) -> anyhow::Result<AlertRow> {
    let row = sqlx::query_as::<_, AlertRow>(
        r#"
        INSERT INTO alerts (id, address, tier, details, score_at_time, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&alert.address)
    .bind(alert.tier.as_str())
    .bind(&alert.details)
    .bind(alert.score_at_time)
    .bind(alert.created_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Alerts for one account, newest first.
pub async fn get_alerts_by_address(pool: &PgPool, address: &str) -> anyhow::Result<Vec<AlertRow>> {
    let rows = sqlx::query_as::<_, AlertRow>(
        "SELECT * FROM alerts WHERE address = $1 ORDER BY created_at DESC",
    )
    .bind(address)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
