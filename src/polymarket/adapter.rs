use async_trait::async_trait;

use super::data_client::{DataClient, ACTIVITY_LIMIT, TRADE_LIMIT};
use super::gamma_client::GammaClient;
use crate::errors::VenueError;
use crate::models::{Activity, MarketInfo, Position, Trade, Venue};
use crate::venue::{HttpFetcher, VenueAdapter};

/// Polymarket as a `VenueAdapter`: Data API for account records, Gamma for
/// market metadata. Both share one fetcher and so one rate limit.
#[derive(Debug, Clone)]
pub struct PolymarketAdapter {
    data: DataClient,
    gamma: GammaClient,
}

impl PolymarketAdapter {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            data: DataClient::new(fetcher.clone()),
            gamma: GammaClient::new(fetcher),
        }
    }

    pub fn data_client(&self) -> &DataClient {
        &self.data
    }
}

#[async_trait]
impl VenueAdapter for PolymarketAdapter {
    fn venue(&self) -> Venue {
        Venue::Polymarket
    }

    async fn get_trades(&self, account: &str) -> Result<Vec<Trade>, VenueError> {
        let raw = self.data.get_user_trades(account, TRADE_LIMIT).await?;
        let trades: Vec<Trade> = raw.iter().filter_map(|t| t.to_trade(account)).collect();
        if trades.len() < raw.len() {
            tracing::debug!(
                account,
                dropped = raw.len() - trades.len(),
                "Dropped malformed trades"
            );
        }
        Ok(trades)
    }

    async fn get_positions(&self, account: &str) -> Result<Vec<Position>, VenueError> {
        let raw = self.data.get_positions(account).await?;
        Ok(raw.iter().filter_map(|p| p.to_position()).collect())
    }

    async fn get_activity(&self, account: &str) -> Result<Vec<Activity>, VenueError> {
        let raw = self.data.get_activity(account, ACTIVITY_LIMIT).await?;
        Ok(raw.iter().filter_map(|a| a.to_activity()).collect())
    }

    async fn get_market_by_key(&self, key: &str) -> Result<Option<MarketInfo>, VenueError> {
        let market = self.gamma.get_market_by_slug(key).await?;
        Ok(market.map(|m| m.into_info(key)))
    }
}
