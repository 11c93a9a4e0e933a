use analytics::client::TelemetryClient;
use analytics::{metrics, rest};
use axum::{routing::get, Router};
use std::env;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let upstream_base_url =
        env::var("UPSTREAM_BASE_URL").unwrap_or_else(|_| "http://localhost:8082".to_string());
    let upstream_timeout_secs: u64 = env::var("UPSTREAM_TIMEOUT_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(30);
    let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting Equipment Analytics Service");
    info!("Ingestion service: {}", upstream_base_url);
    info!("Upstream timeout: {}s", upstream_timeout_secs);
    info!("HTTP server: {}", http_addr);

    // Initialize metrics
    metrics::init_metrics();

    // Build the upstream client with the configured timeout baked in
    let client = match TelemetryClient::new(
        &upstream_base_url,
        Duration::from_secs(upstream_timeout_secs),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build upstream HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    // Build HTTP app with the analytics API and metrics endpoint
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .merge(rest::create_router(client));

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", http_addr, e);
            std::process::exit(1);
        });

    info!("HTTP server listening on {}", http_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap_or_else(|e| {
            error!("HTTP server error: {}", e);
        });
    });

    tokio::select! {
        _ = server_handle => {
            error!("HTTP server terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutting down");
}

async fn metrics_handler() -> String {
    metrics::gather_metrics()
}
