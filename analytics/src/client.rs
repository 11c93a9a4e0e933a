use crate::errors::Result;
use crate::model::TelemetryReading;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Classified result of one retrieval attempt against the ingestion service.
///
/// Every call site has to handle all four variants; the client never lets a
/// raw transport error escape unclassified.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Upstream reported no data for this identifier (404, or a 2xx empty
    /// array). Benign, not an error.
    Empty,
    /// Successful retrieval with at least one reading.
    Data(Vec<TelemetryReading>),
    /// Upstream could not be reached, timed out, or answered with an
    /// unexpected status. Carries the cause for logging.
    Unavailable(reqwest::Error),
    /// Upstream answered 2xx but the payload did not decode as a reading
    /// sequence.
    Malformed(serde_json::Error),
}

/// HTTP client for the ingestion service.
///
/// Holds the base address and timeout handed in at construction; no other
/// session state. Cloning is cheap and shares the underlying connection
/// pool, so one instance serves concurrent requests without coordination.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelemetryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Performs exactly one `GET /api/telemetry/{equipmentId}` call and
    /// classifies the outcome. No retries on any path; a timeout surfaces
    /// as `Unavailable`, never as an unclassified error.
    pub async fn fetch_readings(&self, equipment_id: &str) -> FetchOutcome {
        let url = format!("{}/api/telemetry/{}", self.base_url, equipment_id);
        debug!("Requesting telemetry from {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Unavailable(e),
        };

        if response.status() == StatusCode::NOT_FOUND {
            return FetchOutcome::Empty;
        }

        // Unexpected statuses must not be swallowed as an empty result.
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Unavailable(e),
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return FetchOutcome::Unavailable(e),
        };

        match decode_readings(&body) {
            Ok(readings) if readings.is_empty() => FetchOutcome::Empty,
            Ok(readings) => FetchOutcome::Data(readings),
            Err(e) => FetchOutcome::Malformed(e),
        }
    }
}

fn decode_readings(body: &str) -> serde_json::Result<Vec<TelemetryReading>> {
    serde_json::from_str(body)
}
