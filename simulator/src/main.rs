mod telemetry;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::env;
use tracing::{error, info};

/// Stand-in ingestion service: serves generated telemetry over the same
/// HTTP contract the real one exposes, so the analytics service can be
/// exercised end to end without it.
#[derive(Debug, Clone)]
struct AppState {
    num_devices: usize,
    readings_per_device: usize,
}

#[tokio::main]
async fn main() {
    let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8082".to_string());
    let num_devices: usize = env::var("DEVICES")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);
    let readings_per_device: usize = env::var("READINGS")
        .unwrap_or_else(|_| "50".to_string())
        .parse()
        .unwrap_or(50);

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting Ingestion Simulator");
    info!(
        "Serving {} devices (press-0..press-{}), {} readings each",
        num_devices,
        num_devices.saturating_sub(1),
        readings_per_device
    );
    info!("HTTP server: {}", http_addr);

    let state = AppState {
        num_devices,
        readings_per_device,
    };

    let app = Router::new()
        .route("/api/telemetry/:equipment_id", get(get_telemetry))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", http_addr, e);
            std::process::exit(1);
        });

    info!("HTTP server listening on {}", http_addr);

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        error!("HTTP server error: {}", e);
    });
}

async fn get_telemetry(
    State(state): State<AppState>,
    Path(equipment_id): Path<String>,
) -> Response {
    info!("Fetching telemetry for equipment: {}", equipment_id);

    if !is_known_equipment(&equipment_id, state.num_devices) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let mut rng = rand::thread_rng();
    let history = telemetry::generate_history(&mut rng, &equipment_id, state.readings_per_device);
    Json(history).into_response()
}

fn is_known_equipment(equipment_id: &str, num_devices: usize) -> bool {
    equipment_id
        .strip_prefix("press-")
        .and_then(|n| n.parse::<usize>().ok())
        .map(|n| n < num_devices)
        .unwrap_or(false)
}
