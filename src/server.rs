//! HTTP Server and Collection Loop
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Collection Loop**: Background task that runs one SnapRoute collection
//!   cycle per tick and feeds the samples into the Prometheus registry
//! - **State Management**: Shared state (config, metrics, collector) behind `Arc`
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - 200 if the last cycle succeeded, 503 otherwise
//!
//! A failed cycle sets `snaproute_up` to 0 and bumps
//! `snaproute_collection_errors_total{kind}`. So does a cycle that ended in an
//! identity failure or a panic, with `kind` set to `identity` or `panic`. The
//! loop keeps running; samples from the failed cycle's earlier domains stay
//! visible. A clean cycle clears the not-ready series.

use crate::collectors::SnapRouteCollector;
use crate::config::Config;
use crate::error::ExporterError;
use crate::metrics::MetricsCollector;
use crate::snaproute::Transport;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    metrics: MetricsCollector,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let metrics = MetricsCollector::new()?;
    let collector = Arc::new(Mutex::new(SnapRouteCollector::from_config(&config)));

    // Start background collection
    let loop_metrics = metrics.clone();
    let period = Duration::from_secs(config.collector.interval_seconds);
    tokio::spawn(async move {
        collect_metrics_loop(collector, loop_metrics, period).await;
    });

    let app = router(metrics);

    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::Server(format!("cannot bind {}: {}", addr, e)))?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::Server(e.to_string()))?;

    Ok(())
}

/// Routes served by the exporter
pub fn router(metrics: MetricsCollector) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { metrics })
}

async fn collect_metrics_loop<T: Transport>(
    collector: Arc<Mutex<SnapRouteCollector<T>>>,
    metrics: MetricsCollector,
    period: Duration,
) {
    let mut ticker = interval(period);
    // A slow device should not cause a burst of back-to-back cycles
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let mut collector = collector.lock().await;
        run_cycle(&mut collector, &metrics).await;
    }
}

/// Run one collection cycle and record its outcome on the fixed metrics
pub async fn run_cycle<T: Transport>(
    collector: &mut SnapRouteCollector<T>,
    metrics: &MetricsCollector,
) -> bool {
    let ok = match collector.gather(metrics).await {
        Ok(()) => match collector.last_fault() {
            Some(fault) => {
                error!("Collection cycle reported not ready ({})", fault.kind());
                metrics
                    .collection_errors_total
                    .with_label_values(&[fault.kind()])
                    .inc();
                false
            }
            None => {
                metrics.clear_not_ready();
                true
            }
        },
        Err(e) => {
            error!("Failed to collect metrics: {}", e);
            metrics
                .collection_errors_total
                .with_label_values(&[e.kind()])
                .inc();
            false
        }
    };

    metrics.up.set(if ok { 1.0 } else { 0.0 });
    metrics
        .last_cycle_timestamp_seconds
        .set(Utc::now().timestamp() as f64);
    ok
}

async fn root_handler() -> impl IntoResponse {
    r#"<html>
<head><title>SnapRoute Exporter</title></head>
<body>
<h1>SnapRoute FlexSwitch Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.metrics.up.get() > 0.0 {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "SnapRoute collection failing")
    }
}
