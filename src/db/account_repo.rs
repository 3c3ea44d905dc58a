use sqlx::PgPool;

use crate::models::{AccountRecord, AccountRow};

pub async fn get_account(pool: &PgPool, address: &str) -> anyhow::Result<Option<AccountRow>> {
    let row = sqlx::query_as::<_, AccountRow>(
        "SELECT * FROM accounts WHERE address = $1",
    )
    .bind(address)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Write the latest scoring record. `created_at` is set on first insert only.
pub async fn upsert_account(pool: &PgPool, record: &AccountRecord) -> anyhow::Result<AccountRow> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        INSERT INTO accounts (
            address, venue, username, profile_image, total_score,
            signal_wallet_age, signal_first_bet, signal_bet_timing,
            signal_withdrawal_speed, signal_market_selection, signal_win_rate,
            signal_no_hedging, total_volume, total_pnl,
            first_trade_at, last_trade_at, trade_count, scored_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        ON CONFLICT (address) DO UPDATE SET
            venue = EXCLUDED.venue,
            username = COALESCE(EXCLUDED.username, accounts.username),
            profile_image = COALESCE(EXCLUDED.profile_image, accounts.profile_image),
            total_score = EXCLUDED.total_score,
            signal_wallet_age = EXCLUDED.signal_wallet_age,
            signal_first_bet = EXCLUDED.signal_first_bet,
            signal_bet_timing = EXCLUDED.signal_bet_timing,
            signal_withdrawal_speed = EXCLUDED.signal_withdrawal_speed,
            signal_market_selection = EXCLUDED.signal_market_selection,
            signal_win_rate = EXCLUDED.signal_win_rate,
            signal_no_hedging = EXCLUDED.signal_no_hedging,
            total_volume = EXCLUDED.total_volume,
            total_pnl = EXCLUDED.total_pnl,
            first_trade_at = EXCLUDED.first_trade_at,
            last_trade_at = EXCLUDED.last_trade_at,
            trade_count = EXCLUDED.trade_count,
            scored_at = EXCLUDED.scored_at
        RETURNING *
        "#,
    )
    .bind(&record.address)
    .bind(&record.venue)
    .bind(&record.username)
    .bind(&record.profile_image)
    .bind(record.total_score)
    .bind(record.signal_wallet_age)
    .bind(record.signal_first_bet)
    .bind(record.signal_bet_timing)
    .bind(record.signal_withdrawal_speed)
    .bind(record.signal_market_selection)
    .bind(record.signal_win_rate)
    .bind(record.signal_no_hedging)
    .bind(record.total_volume)
    .bind(record.total_pnl)
    .bind(record.first_trade_at)
    .bind(record.last_trade_at)
    .bind(record.trade_count)
    .bind(record.scored_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
