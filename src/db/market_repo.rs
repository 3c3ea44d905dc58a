use sqlx::PgPool;

use crate::models::MarketMetadata;

/// Fetch a cached market by id, fresh or not.
pub async fn get_market(pool: &PgPool, market_id: &str) -> anyhow::Result<Option<MarketMetadata>> {
    let row = sqlx::query_as::<_, MarketMetadata>(
        "SELECT * FROM markets WHERE market_id = $1",
    )
    .bind(market_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert or refresh a cached market.
pub async fn upsert_market(pool: &PgPool, market: &MarketMetadata) -> anyhow::Result<MarketMetadata> {
    let row = sqlx::query_as::<_, MarketMetadata>(
        r#"
        INSERT INTO markets
            (market_id, title, slug, end_date, resolved_at, outcome, active, volume, cached_at, venue)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (market_id) DO UPDATE SET
            title = EXCLUDED.title,
            slug = EXCLUDED.slug,
            end_date = EXCLUDED.end_date,
            resolved_at = EXCLUDED.resolved_at,
            outcome = EXCLUDED.outcome,
            active = EXCLUDED.active,
            volume = EXCLUDED.volume,
            cached_at = EXCLUDED.cached_at,
            venue = EXCLUDED.venue
        RETURNING *
        "#,
    )
    .bind(&market.market_id)
    .bind(&market.title)
    .bind(&market.slug)
    .bind(market.end_date)
    .bind(market.resolved_at)
    .bind(&market.outcome)
    .bind(market.active)
    .bind(market.volume)
    .bind(market.cached_at)
    .bind(&market.venue)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
