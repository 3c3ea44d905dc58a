use super::types::GammaMarket;
use crate::errors::VenueError;
use crate::venue::{build_url, HttpFetcher};

const GAMMA_API_BASE: &str = "https://gamma-api.polymarket.com";

#[derive(Debug, Clone)]
pub struct GammaClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl GammaClient {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            base_url: GAMMA_API_BASE.into(),
        }
    }

    /// Look a market up by slug. Slug lookups are reliable on Gamma where
    /// condition-id filters are not.
    pub async fn get_market_by_slug(&self, slug: &str) -> Result<Option<GammaMarket>, VenueError> {
        let url = build_url(
            &self.base_url,
            "/markets",
            &[("slug", slug.to_string()), ("limit", "1".to_string())],
        )?;
        let markets: Option<Vec<GammaMarket>> = self.fetcher.get_json(url).await?;
        Ok(markets.and_then(|m| m.into_iter().next()))
    }
}
