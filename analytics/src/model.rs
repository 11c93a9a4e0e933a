use chrono::{DateTime, Utc};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One sampled observation reported by a piece of equipment.
///
/// Serialized as camelCase JSON. Field matching on inbound payloads is
/// case-insensitive (underscores ignored), so camelCase, PascalCase,
/// snake_case, and any other casing the ingestion service might emit all
/// decode to the same reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryReading {
    pub equipment_id: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
}

impl<'de> Deserialize<'de> for TelemetryReading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReadingVisitor;

        impl<'de> Visitor<'de> for ReadingVisitor {
            type Value = TelemetryReading;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a telemetry reading object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut equipment_id: Option<String> = None;
                let mut timestamp: Option<DateTime<Utc>> = None;
                let mut temperature: Option<f64> = None;
                let mut vibration: Option<f64> = None;
                let mut pressure: Option<f64> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match normalize_field(&key).as_str() {
                        "equipmentid" => equipment_id = Some(map.next_value()?),
                        "timestamp" => timestamp = Some(map.next_value()?),
                        "temperature" => temperature = Some(map.next_value()?),
                        "vibration" => vibration = Some(map.next_value()?),
                        "pressure" => pressure = Some(map.next_value()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }

                Ok(TelemetryReading {
                    equipment_id: equipment_id
                        .ok_or_else(|| de::Error::missing_field("equipmentId"))?,
                    timestamp: timestamp.ok_or_else(|| de::Error::missing_field("timestamp"))?,
                    temperature: temperature
                        .ok_or_else(|| de::Error::missing_field("temperature"))?,
                    vibration: vibration.ok_or_else(|| de::Error::missing_field("vibration"))?,
                    pressure: pressure.ok_or_else(|| de::Error::missing_field("pressure"))?,
                })
            }
        }

        deserializer.deserialize_map(ReadingVisitor)
    }
}

fn normalize_field(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Aggregate statistics over one retrieval for one equipment identifier.
///
/// Built once per request from a snapshot of readings and never mutated.
/// `reading_count` is always at least 1; the summary is only constructed
/// for non-empty input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub equipment_id: String,
    pub reading_count: usize,
    pub average_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub average_vibration: f64,
    pub max_vibration: f64,
    pub average_pressure: f64,
    pub last_reading: TelemetryReading,
}
