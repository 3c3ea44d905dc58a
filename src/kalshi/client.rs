use std::sync::Arc;

use super::auth::KalshiAuth;
use super::types::{KalshiFill, KalshiFillsResponse, KalshiMarket, KalshiMarketPosition, KalshiMarketResponse, KalshiPositionsResponse};
use crate::errors::VenueError;
use crate::venue::{build_url, HttpFetcher};

const KALSHI_API_BASE: &str = "https://api.elections.kalshi.com/trade-api/v2";

const FILL_LIMIT: u32 = 200;
const POSITION_LIMIT: u32 = 1000;

#[derive(Debug, Clone)]
pub struct KalshiClient {
    fetcher: HttpFetcher,
    auth: Arc<KalshiAuth>,
    base_url: String,
}

impl KalshiClient {
    pub fn new(fetcher: HttpFetcher, auth: Arc<KalshiAuth>) -> Self {
        Self {
            fetcher,
            auth,
            base_url: KALSHI_API_BASE.into(),
        }
    }

    /// Fills of the account that owns the API key.
    pub async fn get_fills(&self) -> Result<Vec<KalshiFill>, VenueError> {
        let url = build_url(&self.base_url, "/portfolio/fills", &[("limit", FILL_LIMIT.to_string())])?;
        let headers = self.auth.headers("GET", url.path())?;
        let resp: Option<KalshiFillsResponse> = self.fetcher.get_json_with_headers(url, headers).await?;
        Ok(resp.map(|r| r.fills).unwrap_or_default())
    }

    pub async fn get_positions(&self) -> Result<Vec<KalshiMarketPosition>, VenueError> {
        let url = build_url(
            &self.base_url,
            "/portfolio/positions",
            &[("limit", POSITION_LIMIT.to_string())],
        )?;
        let headers = self.auth.headers("GET", url.path())?;
        let resp: Option<KalshiPositionsResponse> = self.fetcher.get_json_with_headers(url, headers).await?;
        Ok(resp.map(|r| r.market_positions).unwrap_or_default())
    }

    /// Public market lookup by ticker.
    pub async fn get_market(&self, ticker: &str) -> Result<Option<KalshiMarket>, VenueError> {
        let mut url = build_url(&self.base_url, "/markets", &[])?;
        url.path_segments_mut()
            .map_err(|_| VenueError::InvalidUrl(self.base_url.clone()))?
            .push(ticker);
        let resp: Option<KalshiMarketResponse> = self.fetcher.get_json(url).await?;
        Ok(resp.map(|r| r.market))
    }
}
