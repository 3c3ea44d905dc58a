use std::env;
use std::sync::Arc;

use anyhow::Context;

use insiderscope::config::AppConfig;
use insiderscope::db::{self, PgStore};
use insiderscope::intelligence::CompositeScorer;
use insiderscope::kalshi::{KalshiAdapter, KalshiAuth, KalshiClient};
use insiderscope::metrics::init_metrics;
use insiderscope::models::Venue;
use insiderscope::polymarket::PolymarketAdapter;
use insiderscope::services::{run_scan, run_scan_loop, AccountScorer, ScanConfig};
use insiderscope::venue::{HttpFetcher, RateLimiter};

const USAGE: &str = "usage: insiderscope [score <account> [--venue polymarket|kalshi] | scan]";

enum Command {
    Score { account: String, venue: Venue },
    Scan,
    Loop,
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Loop),
        Some("scan") => Ok(Command::Scan),
        Some("score") => {
            let account = args.get(1).context(USAGE)?.clone();
            let venue = match args.get(2).map(String::as_str) {
                None => Venue::Polymarket,
                Some("--venue") => {
                    let raw = args.get(3).context(USAGE)?;
                    Venue::from_api_str(raw).with_context(|| format!("unknown venue {raw:?}"))?
                }
                Some(other) => anyhow::bail!("unexpected argument {other:?}\n{USAGE}"),
            };
            Ok(Command::Score { account, venue })
        }
        Some(other) => anyhow::bail!("unknown command {other:?}\n{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = parse_args(&args)?;

    // Weights are validated here; a bad table never reaches a scoring pass.
    let config = AppConfig::from_env()?;
    let scorer = CompositeScorer::new(config.weights)?;

    if let Some(addr) = config.metrics_addr {
        init_metrics(addr)?;
    }

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database connected");

    let http = reqwest::Client::builder()
        .user_agent(concat!("insiderscope/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let new_fetcher = || {
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit_max_calls,
            config.rate_limit_window(),
        ));
        HttpFetcher::new(http.clone(), limiter)
    };

    let polymarket = Arc::new(PolymarketAdapter::new(new_fetcher()));
    let mut account_scorer =
        AccountScorer::new(Arc::new(PgStore::new(pool)), scorer).with_venue(polymarket.clone());

    match (&config.kalshi_api_key_id, &config.kalshi_private_key) {
        (Some(key_id), Some(pem)) => {
            let auth = Arc::new(KalshiAuth::from_pem(key_id.clone(), pem)?);
            let client = KalshiClient::new(new_fetcher(), auth);
            account_scorer = account_scorer.with_venue(Arc::new(KalshiAdapter::new(client)));
            tracing::info!("Kalshi adapter registered");
        }
        _ => tracing::warn!("No Kalshi API credentials, Kalshi scoring disabled"),
    }

    let scan_config = ScanConfig {
        max_accounts: config.max_accounts_per_scan,
        concurrency: config.scan_concurrency,
        rescore_after_secs: config.rescore_after_secs,
        discovery_limit: config.discovery_trade_limit,
    };

    match command {
        Command::Score { account, venue } => {
            let result = account_scorer.score_account(&account, venue).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Scan => {
            let summary = run_scan(&account_scorer, &*polymarket, &scan_config).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Loop => {
            run_scan_loop(
                Arc::new(account_scorer),
                polymarket,
                scan_config,
                config.scan_interval_secs,
            )
            .await;
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
