//! Core data types for weather snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unix timestamp stamped on the fallback snapshot (2025-01-01T00:00:00Z)
pub const FALLBACK_OBSERVED_AT: i64 = 1_735_689_600;

/// Qualitative direction of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// A numeric reading with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: String,
    pub trend: Trend,
}

impl Measurement {
    pub fn new(value: f64, unit: impl Into<String>, trend: Trend) -> Self {
        Self {
            value,
            unit: unit.into(),
            trend,
        }
    }
}

/// Wind direction as compass text plus degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindDirection {
    /// Compass point, e.g. "NE"
    pub value: String,
    /// Degrees from north (0-360)
    pub degrees: u16,
    pub unit: String,
    pub trend: Trend,
}

/// One complete set of the five measurements at a point in time.
///
/// Snapshots are never patched: a refresh produces a new value that
/// replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: Measurement,
    pub wind_speed: Measurement,
    pub precipitation: Measurement,
    pub pressure: Measurement,
    pub wind_direction: WindDirection,
    pub location: String,
    #[serde(rename = "lastUpdate")]
    pub observed_at: DateTime<Utc>,
}

/// The fixed snapshot displayed whenever live data is unavailable.
///
/// Always identical: it is never derived from earlier live data.
pub fn fallback_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: Measurement::new(23.5, "°C", Trend::Stable),
        wind_speed: Measurement::new(8.2, "m/s", Trend::Increasing),
        precipitation: Measurement::new(2.3, "mm", Trend::Decreasing),
        pressure: Measurement::new(1013.2, "hPa", Trend::Stable),
        wind_direction: WindDirection {
            value: "NE".to_string(),
            degrees: 45,
            unit: "°".to_string(),
            trend: Trend::Stable,
        },
        location: "Sivas, Türkiye".to_string(),
        observed_at: DateTime::from_timestamp(FALLBACK_OBSERVED_AT, 0).unwrap_or_default(),
    }
}
