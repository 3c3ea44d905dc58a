use sqlx::PgPool;

use crate::models::Trade;

/// Swap an account's stored trades for `trades` in one transaction, so readers
/// see either the previous pull or the new one.
pub async fn replace_trades(pool: &PgPool, address: &str, trades: &[Trade]) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM account_trades WHERE address = $1")
        .bind(address)
        .execute(&mut *tx)
        .await?;

    for trade in trades {
        sqlx::query(
            r#"
            INSERT INTO account_trades
                (address, market_id, side, size, price, timestamp, outcome,
                 slug, title, event_slug, transaction_hash, venue)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(address)
        .bind(&trade.market_id)
        .bind(trade.side.as_str())
        .bind(trade.size)
        .bind(trade.price)
        .bind(trade.timestamp)
        .bind(&trade.outcome)
        .bind(&trade.slug)
        .bind(&trade.title)
        .bind(&trade.event_slug)
        .bind(&trade.transaction_hash)
        .bind(trade.venue.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

pub async fn count_trades(pool: &PgPool, address: &str) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM account_trades WHERE address = $1")
        .bind(address)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}
