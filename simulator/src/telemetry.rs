use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryReading {
    pub equipment_id: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
}

/// Generates one reading per minute over the trailing window, newest last.
pub fn generate_history(
    rng: &mut impl Rng,
    equipment_id: &str,
    count: usize,
) -> Vec<TelemetryReading> {
    let now = Utc::now();

    (0..count)
        .map(|i| {
            let age_secs = ((count - 1 - i) * 60) as i64;

            let temperature = if rng.gen_bool(0.05) {
                rng.gen_range(90.0..120.0) // 5% overheating spikes
            } else {
                rng.gen_range(60.0..90.0) // Normal operating range
            };

            let vibration = if rng.gen_bool(0.05) {
                rng.gen_range(0.5..1.5) // 5% worn-bearing outliers
            } else {
                rng.gen_range(0.05..0.5) // Normal range
            };

            let pressure = rng.gen_range(95.0..110.0);

            TelemetryReading {
                equipment_id: equipment_id.to_string(),
                timestamp: now - Duration::seconds(age_secs),
                temperature,
                vibration,
                pressure,
            }
        })
        .collect()
}
