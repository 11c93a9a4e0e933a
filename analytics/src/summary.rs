use crate::errors::{Error, Result};
use crate::model::{AnalyticsResult, TelemetryReading};

/// Reduces a non-empty reading sequence to its aggregate statistics.
///
/// All averages are arithmetic means accumulated in f64; no rounding is
/// applied. The last reading is the element with the greatest timestamp.
/// When several readings share the maximum timestamp, the earliest-arriving
/// one wins (comparison is strict greater-than over the input order).
///
/// Pure: performs no I/O and never partially constructs a result.
pub fn summarize(equipment_id: &str, readings: &[TelemetryReading]) -> Result<AnalyticsResult> {
    let Some(first) = readings.first() else {
        return Err(Error::EmptyInput);
    };

    let mut temperature_sum = 0.0;
    let mut vibration_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut min_temperature = f64::INFINITY;
    let mut max_temperature = f64::NEG_INFINITY;
    let mut max_vibration = f64::NEG_INFINITY;
    let mut last = first;

    for reading in readings {
        temperature_sum += reading.temperature;
        vibration_sum += reading.vibration;
        pressure_sum += reading.pressure;
        min_temperature = min_temperature.min(reading.temperature);
        max_temperature = max_temperature.max(reading.temperature);
        max_vibration = max_vibration.max(reading.vibration);
        if reading.timestamp > last.timestamp {
            last = reading;
        }
    }

    let count = readings.len();
    let n = count as f64;

    Ok(AnalyticsResult {
        equipment_id: equipment_id.to_string(),
        reading_count: count,
        average_temperature: temperature_sum / n,
        min_temperature,
        max_temperature,
        average_vibration: vibration_sum / n,
        max_vibration,
        average_pressure: pressure_sum / n,
        last_reading: last.clone(),
    })
}
