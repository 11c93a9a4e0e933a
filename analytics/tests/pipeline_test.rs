use analytics::client::TelemetryClient;
use analytics::model::TelemetryReading;
use analytics::rest::create_router;
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use std::net::SocketAddr;
use std::time::Duration;

fn press_readings() -> Vec<TelemetryReading> {
    vec![
        TelemetryReading {
            equipment_id: "press-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            temperature: 70.0,
            vibration: 0.1,
            pressure: 100.0,
        },
        TelemetryReading {
            equipment_id: "press-7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 1, 12, 1, 0).unwrap(),
            temperature: 75.0,
            vibration: 0.2,
            pressure: 102.0,
        },
    ]
}

async fn upstream_stub(Path(equipment_id): Path<String>) -> Response {
    match equipment_id.as_str() {
        "press-7" => Json(press_readings()).into_response(),
        "idle-3" => Json(Vec::<TelemetryReading>::new()).into_response(),
        "haywire-1" => (StatusCode::OK, "<html>definitely not json</html>").into_response(),
        "cranky-2" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "dawdle-5" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(press_readings()).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new().route("/api/telemetry/:equipment_id", get(upstream_stub));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_service(upstream: SocketAddr) -> SocketAddr {
    spawn_service_with_timeout(upstream, Duration::from_secs(5)).await
}

async fn spawn_service_with_timeout(upstream: SocketAddr, timeout: Duration) -> SocketAddr {
    let client = TelemetryClient::new(&format!("http://{}", upstream), timeout).unwrap();
    let app = create_router(client);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_analytics_for_equipment_with_data() {
    let upstream = spawn_upstream().await;
    let service = spawn_service(upstream).await;

    let response = reqwest::get(format!("http://{}/api/analytics/press-7", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["equipmentId"], "press-7");
    assert_eq!(body["readingCount"], 2);
    assert_eq!(body["averageTemperature"], 72.5);
    assert_eq!(body["minTemperature"], 70.0);
    assert_eq!(body["maxTemperature"], 75.0);
    assert_eq!(body["maxVibration"], 0.2);
    assert_eq!(body["averagePressure"], 101.0);
    assert!((body["averageVibration"].as_f64().unwrap() - 0.15).abs() < 1e-9);
    assert_eq!(body["lastReading"]["temperature"], 75.0);
}

#[tokio::test]
async fn test_unknown_equipment_is_not_found() {
    let upstream = spawn_upstream().await;
    let service = spawn_service(upstream).await;

    let response = reqwest::get(format!("http://{}/api/analytics/UNKNOWN", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let body = response.text().await.unwrap();
    assert!(body.contains("No data found for equipment UNKNOWN"));
}

#[tokio::test]
async fn test_empty_reading_array_is_not_found() {
    let upstream = spawn_upstream().await;
    let service = spawn_service(upstream).await;

    let response = reqwest::get(format!("http://{}/api/analytics/idle-3", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_upstream_is_service_unavailable() {
    // Grab a free port, then drop the listener so nothing answers on it.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let service = spawn_service(dead_addr).await;

    let response = reqwest::get(format!("http://{}/api/analytics/press-7", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let body = response.text().await.unwrap();
    assert!(body.contains("Ingestion service unavailable"));
}

#[tokio::test]
async fn test_upstream_timeout_is_service_unavailable() {
    let upstream = spawn_upstream().await;
    // Client gives up after 500ms; the dawdle-5 route answers after 2s.
    let service = spawn_service_with_timeout(upstream, Duration::from_millis(500)).await;

    let response = reqwest::get(format!("http://{}/api/analytics/dawdle-5", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let body = response.text().await.unwrap();
    assert!(body.contains("Ingestion service unavailable"));
}

#[tokio::test]
async fn test_upstream_server_error_is_service_unavailable() {
    let upstream = spawn_upstream().await;
    let service = spawn_service(upstream).await;

    let response = reqwest::get(format!("http://{}/api/analytics/cranky-2", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_upstream_payload_is_internal_error() {
    let upstream = spawn_upstream().await;
    let service = spawn_service(upstream).await;

    let response = reqwest::get(format!("http://{}/api/analytics/haywire-1", service))
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = spawn_upstream().await;
    let service = spawn_service(upstream).await;

    let response = reqwest::get(format!("http://{}/health", service))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}
