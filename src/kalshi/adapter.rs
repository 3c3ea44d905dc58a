use async_trait::async_trait;

use super::client::KalshiClient;
use crate::errors::VenueError;
use crate::models::{Activity, MarketInfo, Position, Trade, Venue};
use crate::venue::VenueAdapter;

/// Kalshi as a `VenueAdapter`.
///
/// Kalshi only exposes fills and positions for the account that owns the API
/// key, so `account` labels the records rather than selecting them.
#[derive(Debug, Clone)]
pub struct KalshiAdapter {
    client: KalshiClient,
}

impl KalshiAdapter {
    pub fn new(client: KalshiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VenueAdapter for KalshiAdapter {
    fn venue(&self) -> Venue {
        Venue::Kalshi
    }

    async fn get_trades(&self, account: &str) -> Result<Vec<Trade>, VenueError> {
        let fills = self.client.get_fills().await?;
        Ok(fills.iter().filter_map(|f| f.to_trade(account)).collect())
    }

    async fn get_positions(&self, _account: &str) -> Result<Vec<Position>, VenueError> {
        let positions = self.client.get_positions().await?;
        Ok(positions.iter().map(|p| p.to_position()).collect())
    }

    async fn get_activity(&self, _account: &str) -> Result<Vec<Activity>, VenueError> {
        let fills = self.client.get_fills().await?;
        Ok(fills.iter().filter_map(|f| f.to_activity()).collect())
    }

    async fn get_market_by_key(&self, key: &str) -> Result<Option<MarketInfo>, VenueError> {
        let market = self.client.get_market(key).await?;
        Ok(market.map(|m| m.into_info()))
    }
}
