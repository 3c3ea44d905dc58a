use std::collections::HashSet;

use super::types::{ApiActivity, ApiPosition, ApiTrade};
use crate::errors::VenueError;
use crate::venue::{build_url, HttpFetcher};

const DATA_API_BASE: &str = "https://data-api.polymarket.com";

pub const TRADE_LIMIT: u32 = 300;
pub const ACTIVITY_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct DataClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl DataClient {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self {
            fetcher,
            base_url: DATA_API_BASE.into(),
        }
    }

    /// Fetch up to `limit` trades for a wallet, newest first.
    pub async fn get_user_trades(&self, wallet: &str, limit: u32) -> Result<Vec<ApiTrade>, VenueError> {
        let url = build_url(
            &self.base_url,
            "/trades",
            &[("user", wallet.to_string()), ("limit", limit.to_string())],
        )?;
        Ok(self.fetcher.get_json(url).await?.unwrap_or_default())
    }

    pub async fn get_positions(&self, wallet: &str) -> Result<Vec<ApiPosition>, VenueError> {
        let url = build_url(&self.base_url, "/positions", &[("user", wallet.to_string())])?;
        Ok(self.fetcher.get_json(url).await?.unwrap_or_default())
    }

    pub async fn get_activity(&self, wallet: &str, limit: u32) -> Result<Vec<ApiActivity>, VenueError> {
        let url = build_url(
            &self.base_url,
            "/activity",
            &[("user", wallet.to_string()), ("limit", limit.to_string())],
        )?;
        Ok(self.fetcher.get_json(url).await?.unwrap_or_default())
    }

    /// Wallets behind the latest `limit` trades across all markets.
    pub async fn get_recent_traders(&self, limit: u32) -> Result<Vec<String>, VenueError> {
        let url = build_url(&self.base_url, "/trades", &[("limit", limit.to_string())])?;
        let trades: Vec<ApiTrade> = self.fetcher.get_json(url).await?.unwrap_or_default();
        Ok(unique_wallets(&trades))
    }
}

/// Lowercased proxy wallets in order of first appearance.
pub fn unique_wallets(trades: &[ApiTrade]) -> Vec<String> {
    let mut seen = HashSet::new();
    trades
        .iter()
        .filter_map(|t| t.proxy_wallet.as_deref())
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_wallets_dedupes_case_insensitively() {
        let trades: Vec<ApiTrade> = serde_json::from_str(
            r#"[
                {"proxyWallet": "0xAA"},
                {"proxyWallet": "0xbb"},
                {"proxyWallet": "0xaa"},
                {"proxyWallet": ""},
                {}
            ]"#,
        )
        .unwrap();
        assert_eq!(unique_wallets(&trades), vec!["0xaa", "0xbb"]);
    }
}
