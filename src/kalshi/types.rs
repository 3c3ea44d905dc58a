use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::intelligence::utils::iso_to_unix;
use crate::models::{Activity, ActivityKind, MarketInfo, Position, Side, Trade, Venue};

/// Kalshi quotes prices and PnL in cents.
fn cents_to_dollars(cents: Decimal) -> Decimal {
    cents / Decimal::ONE_HUNDRED
}

fn parse_dollars(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|s| s.trim().parse::<Decimal>().ok())
}

fn contract_label(side: &str) -> Option<&'static str> {
    match side.trim().to_lowercase().as_str() {
        "yes" => Some("Yes"),
        "no" => Some("No"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Fill (/portfolio/fills)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiFill {
    #[serde(default)]
    pub fill_id: Option<String>,
    #[serde(default)]
    pub trade_id: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub market_ticker: Option<String>,
    /// `yes` or `no`: which contract was traded.
    #[serde(default)]
    pub side: Option<String>,
    /// `buy` or `sell`.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub count: Option<Decimal>,
    #[serde(default)]
    pub yes_price: Option<Decimal>,
    #[serde(default)]
    pub no_price: Option<Decimal>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub ts: Option<i64>,
}

impl KalshiFill {
    fn market(&self) -> Option<&str> {
        self.market_ticker
            .as_deref()
            .or(self.ticker.as_deref())
            .filter(|t| !t.is_empty())
    }

    fn timestamp(&self) -> Option<i64> {
        self.ts.or_else(|| iso_to_unix(self.created_time.as_deref()))
    }

    /// Price of the traded contract, in dollars.
    fn contract_price(&self) -> Option<Decimal> {
        let cents = match contract_label(self.side.as_deref()?)? {
            "Yes" => self.yes_price?,
            _ => self.no_price?,
        };
        Some(cents_to_dollars(cents))
    }

    pub fn to_trade(&self, account: &str) -> Option<Trade> {
        Some(Trade {
            account: account.to_string(),
            market_id: self.market()?.to_string(),
            side: Side::from_api_str(self.action.as_deref()?)?,
            size: self.count?,
            price: self.contract_price()?,
            timestamp: self.timestamp()?,
            outcome: contract_label(self.side.as_deref()?)?.to_string(),
            slug: None,
            title: None,
            event_slug: None,
            transaction_hash: self.trade_id.clone().or_else(|| self.fill_id.clone()),
            venue: Venue::Kalshi,
            username: None,
            profile_image: None,
        })
    }

    /// Fills double as the TRADE entries of the activity feed.
    pub fn to_activity(&self) -> Option<Activity> {
        let size = self.count?;
        let usdc_size = self.contract_price().map(|p| p * size);
        Some(Activity {
            kind: ActivityKind::Trade,
            market_id: Some(self.market()?.to_string()),
            side: self.action.as_deref().and_then(Side::from_api_str),
            size: Some(size),
            usdc_size,
            timestamp: self.timestamp()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiFillsResponse {
    #[serde(default)]
    pub fills: Vec<KalshiFill>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Position (/portfolio/positions)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiMarketPosition {
    pub ticker: String,
    /// Positive is YES contracts, negative is NO.
    #[serde(default)]
    pub position: Decimal,
    #[serde(default)]
    pub realized_pnl: Option<Decimal>,
    #[serde(default)]
    pub realized_pnl_dollars: Option<String>,
}

impl KalshiMarketPosition {
    pub fn to_position(&self) -> Position {
        let realized_pnl = parse_dollars(self.realized_pnl_dollars.as_deref())
            .or_else(|| self.realized_pnl.map(cents_to_dollars))
            .unwrap_or_default();

        Position {
            market_id: self.ticker.clone(),
            size: self.position.abs(),
            realized_pnl,
            cash_pnl: Decimal::ZERO,
            outcome: if self.position.is_sign_negative() { "No" } else { "Yes" }.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiPositionsResponse {
    #[serde(default)]
    pub market_positions: Vec<KalshiMarketPosition>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Market (/markets/{ticker})
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiMarket {
    pub ticker: String,
    #[serde(default)]
    pub title: Option<String>,
    /// unopened | open | active | paused | closed | settled | finalized
    #[serde(default)]
    pub status: Option<String>,
    /// `yes` / `no` once settled, empty before.
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub settlement_ts: Option<String>,
    /// Contracts traded. Each contract pays at most $1, so this is the
    /// notional ceiling in dollars.
    #[serde(default)]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub volume_fp: Option<String>,
}

impl KalshiMarket {
    pub fn into_info(self) -> MarketInfo {
        let status = self.status.as_deref().unwrap_or("").to_lowercase();
        let closed = matches!(status.as_str(), "closed" | "settled" | "finalized" | "determined");
        let close_time = iso_to_unix(self.close_time.as_deref());

        let resolved_at = if closed {
            iso_to_unix(self.settlement_ts.as_deref()).or(close_time)
        } else {
            None
        };

        MarketInfo {
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| self.ticker.clone()),
            slug: None,
            end_date: close_time,
            resolved_at,
            outcome: self.result.as_deref().and_then(contract_label).map(str::to_string),
            active: matches!(status.as_str(), "open" | "active"),
            volume: parse_dollars(self.volume_fp.as_deref())
                .or(self.volume)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KalshiMarketResponse {
    pub market: KalshiMarket,
}
