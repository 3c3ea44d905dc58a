use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter, serving `/metrics` on `addr`, and register
/// all application metrics.
pub fn init_metrics(addr: SocketAddr) -> anyhow::Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("scoring_passes_total").absolute(0);
    counter!("scoring_failures_total").absolute(0);
    counter!("alerts_emitted_total", "tier" => "HIGH").absolute(0);
    counter!("alerts_emitted_total", "tier" => "EXTREME").absolute(0);
    counter!("market_cache_hits_total").absolute(0);
    counter!("market_cache_misses_total").absolute(0);
    counter!("market_fetch_failures_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("scoring_latency_seconds").record(0.0);

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}
