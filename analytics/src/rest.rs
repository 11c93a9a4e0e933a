use crate::client::{FetchOutcome, TelemetryClient};
use crate::metrics::{
    MALFORMED_UPSTREAM_TOTAL, NOT_FOUND_TOTAL, REQUESTS_TOTAL, REQUEST_LATENCY_SECONDS,
    UPSTREAM_UNAVAILABLE_TOTAL,
};
use crate::summary::summarize;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{error, info};

#[derive(Debug, Clone)]
struct AppState {
    client: TelemetryClient,
}

pub fn create_router(client: TelemetryClient) -> Router {
    let state = AppState { client };

    Router::new()
        .route("/api/analytics/:equipment_id", get(get_analytics))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Maps each retrieval outcome to its user-visible status. Collapsing
/// "not found" and "unavailable" into one status would be an observable
/// regression, so each variant gets its own arm.
async fn get_analytics(
    State(state): State<AppState>,
    Path(equipment_id): Path<String>,
) -> Response {
    info!("Fetching analytics for equipment: {}", equipment_id);
    REQUESTS_TOTAL.inc();
    let timer = REQUEST_LATENCY_SECONDS.start_timer();

    let response = match state.client.fetch_readings(&equipment_id).await {
        FetchOutcome::Empty => {
            info!("No telemetry data found for equipment: {}", equipment_id);
            NOT_FOUND_TOTAL.inc();
            (
                StatusCode::NOT_FOUND,
                format!("No data found for equipment {}", equipment_id),
            )
                .into_response()
        }
        FetchOutcome::Unavailable(e) => {
            error!("Error fetching telemetry from ingestion service: {}", e);
            UPSTREAM_UNAVAILABLE_TOTAL.inc();
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Ingestion service unavailable",
            )
                .into_response()
        }
        FetchOutcome::Malformed(e) => {
            error!("Malformed payload from ingestion service: {}", e);
            MALFORMED_UPSTREAM_TOTAL.inc();
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
        // The client only yields Data for a non-empty sequence, so the
        // summarize error arm is unreachable under correct orchestration.
        FetchOutcome::Data(readings) => match summarize(&equipment_id, &readings) {
            Ok(result) => Json(result).into_response(),
            Err(e) => {
                error!("Error calculating analytics: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        },
    };

    timer.observe_duration();
    response
}
