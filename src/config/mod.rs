use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::intelligence::SignalWeights;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,

    // Kalshi API key (optional, the Kalshi adapter is only registered when both are set)
    pub kalshi_api_key_id: Option<String>,
    pub kalshi_private_key: Option<String>,

    // Outbound rate limit, per venue
    pub rate_limit_max_calls: u32,
    pub rate_limit_window_secs: u64,

    // Scan service
    pub scan_interval_secs: u64,
    pub max_accounts_per_scan: usize,
    pub scan_concurrency: usize,
    pub rescore_after_secs: i64,
    pub discovery_trade_limit: u32,

    pub metrics_addr: Option<SocketAddr>,

    pub weights: SignalWeights,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            kalshi_api_key_id: non_empty_var("KALSHI_API_KEY_ID"),
            kalshi_private_key: non_empty_var("KALSHI_API_PRIVATE_KEY"),

            rate_limit_max_calls: parse_var("RATE_LIMIT_MAX_CALLS", 1000)?,
            rate_limit_window_secs: parse_var("RATE_LIMIT_WINDOW_SECS", 3600)?,

            scan_interval_secs: parse_var("SCAN_INTERVAL_SECS", 900)?,
            max_accounts_per_scan: parse_var("MAX_ACCOUNTS_PER_SCAN", 25)?,
            scan_concurrency: parse_var("SCAN_CONCURRENCY", 5)?,
            rescore_after_secs: parse_var("RESCORE_AFTER_SECS", 7200)?,
            discovery_trade_limit: parse_var("DISCOVERY_TRADE_LIMIT", 500)?,

            metrics_addr: non_empty_var("METRICS_ADDR")
                .map(|raw| {
                    raw.parse().map_err(|_| ConfigError::Invalid {
                        var: "METRICS_ADDR".into(),
                        value: raw.clone(),
                    })
                })
                .transpose()?,

            weights: SignalWeights::from_env()?,
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `name`, falling back to `default` when unset. A set but unparsable
/// value is an error rather than a silent default.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match non_empty_var(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: name.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.

    #[test]
    fn parse_var_defaults_when_unset() {
        assert_eq!(parse_var::<u32>("INSIDERSCOPE_TEST_UNSET", 42).unwrap(), 42);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        env::set_var("INSIDERSCOPE_TEST_GARBAGE", "twelve");
        let err = parse_var::<u32>("INSIDERSCOPE_TEST_GARBAGE", 1).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "INSIDERSCOPE_TEST_GARBAGE"));
    }

    #[test]
    fn parse_var_reads_value() {
        env::set_var("INSIDERSCOPE_TEST_SET", " 17 ");
        assert_eq!(parse_var::<usize>("INSIDERSCOPE_TEST_SET", 1).unwrap(), 17);
    }
}
