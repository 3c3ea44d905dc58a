use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::intelligence::utils::iso_to_unix;
use crate::models::{Activity, ActivityKind, MarketInfo, Position, Side, Trade, Venue};

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// The Data API mixes JSON numbers and numeric strings (sometimes empty) for
/// the same field. Anything unparseable becomes `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_decimal))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_decimal).and_then(|d| d.trunc().try_into().ok()))
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(s).ok())
        }
        _ => None,
    }
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref().filter(|v| !v.trim().is_empty()).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Trade (Data API /trades)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTrade {
    #[serde(default)]
    pub proxy_wallet: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub event_slug: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pseudonym: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

impl ApiTrade {
    /// Normalize into a `Trade` attributed to `account`. Rows missing a market,
    /// side, size, price or timestamp are dropped.
    pub fn to_trade(&self, account: &str) -> Option<Trade> {
        Some(Trade {
            account: account.to_string(),
            market_id: non_empty(&self.condition_id)?,
            side: Side::from_api_str(self.side.as_deref()?)?,
            size: self.size?,
            price: self.price?,
            timestamp: self.timestamp?,
            outcome: self.outcome.clone().unwrap_or_default(),
            slug: non_empty(&self.slug),
            title: non_empty(&self.title),
            event_slug: non_empty(&self.event_slug),
            transaction_hash: non_empty(&self.transaction_hash),
            venue: Venue::Polymarket,
            username: non_empty(&self.name).or_else(|| non_empty(&self.pseudonym)),
            profile_image: non_empty(&self.profile_image),
        })
    }
}

// ---------------------------------------------------------------------------
// Position (Data API /positions)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPosition {
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cash_pnl: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub realized_pnl: Option<Decimal>,
    #[serde(default)]
    pub outcome: Option<String>,
}

impl ApiPosition {
    pub fn to_position(&self) -> Option<Position> {
        Some(Position {
            market_id: non_empty(&self.condition_id)?,
            size: self.size.unwrap_or_default(),
            realized_pnl: self.realized_pnl.unwrap_or_default(),
            cash_pnl: self.cash_pnl.unwrap_or_default(),
            outcome: self.outcome.clone().unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Activity (Data API /activity)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiActivity {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usdc_size: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub side: Option<String>,
}

impl ApiActivity {
    /// Unknown activity types (rewards, conversions) are dropped.
    pub fn to_activity(&self) -> Option<Activity> {
        Some(Activity {
            kind: ActivityKind::from_api_str(self.kind.as_deref()?)?,
            market_id: non_empty(&self.condition_id),
            side: self.side.as_deref().and_then(Side::from_api_str),
            size: self.size,
            usdc_size: self.usdc_size,
            timestamp: self.timestamp?,
        })
    }
}

// ---------------------------------------------------------------------------
// Market (Gamma API /markets)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub closed: Option<bool>,
    #[serde(default)]
    pub closed_time: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Stringified JSON array of outcome labels, e.g. `["Yes","No"]`.
    #[serde(default)]
    pub outcomes: Option<String>,
    /// Stringified JSON array of prices aligned with `outcomes`. A resolved
    /// market shows `"1"` for the winner.
    #[serde(default)]
    pub outcome_prices: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume_num: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub volume: Option<Decimal>,
}

impl GammaMarket {
    fn parse_string_array(raw: Option<&str>) -> Vec<String> {
        raw.and_then(|s| serde_json::from_str::<Vec<Value>>(s).ok())
            .unwrap_or_default()
            .into_iter()
            .map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }

    /// Winning outcome: the label priced at exactly 1, else `resolution`.
    pub fn derive_outcome(&self) -> Option<String> {
        let outcomes = Self::parse_string_array(self.outcomes.as_deref());
        let prices = Self::parse_string_array(self.outcome_prices.as_deref());

        let from_prices = prices
            .iter()
            .position(|p| p.trim().parse::<Decimal>().map_or(false, |d| d == Decimal::ONE))
            .and_then(|i| outcomes.get(i).cloned());

        from_prices.or_else(|| non_empty(&self.resolution))
    }

    /// Normalize into venue-neutral market info. `lookup_slug` stands in for
    /// a missing title or slug.
    pub fn into_info(self, lookup_slug: &str) -> MarketInfo {
        let closed = self.closed.unwrap_or(false);
        let resolved_at = if closed {
            iso_to_unix(self.closed_time.as_deref()).or_else(|| iso_to_unix(self.updated_at.as_deref()))
        } else {
            None
        };
        let outcome = if closed { self.derive_outcome() } else { None };

        let title = non_empty(&self.question)
            .or_else(|| non_empty(&self.title))
            .or_else(|| non_empty(&self.slug))
            .unwrap_or_else(|| lookup_slug.to_string());

        MarketInfo {
            title,
            slug: non_empty(&self.slug).or_else(|| Some(lookup_slug.to_string())),
            end_date: iso_to_unix(self.end_date.as_deref()),
            resolved_at,
            outcome,
            active: self.active.unwrap_or(false),
            volume: self.volume_num.or(self.volume).unwrap_or_default(),
        }
    }
}
