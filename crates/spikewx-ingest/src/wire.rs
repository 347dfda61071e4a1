//! JSON payload decoding for `GET /api/weather/{slug}`
//!
//! The backend adds an `icon` string to every measurement; it is ignored
//! here since icons are derived locally. `lastUpdate` arrives either as
//! RFC 3339 or as a naive ISO 8601 timestamp in UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use spikewx_core::{FetchError, FetchResult, Measurement, Trend, WeatherSnapshot, WindDirection};

#[derive(Debug, Deserialize)]
struct MeasurementPayload {
    value: f64,
    unit: String,
    trend: Trend,
}

#[derive(Debug, Deserialize)]
struct WindDirectionPayload {
    value: String,
    degrees: u16,
    unit: String,
    trend: Trend,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherPayload {
    temperature: MeasurementPayload,
    wind_speed: MeasurementPayload,
    precipitation: MeasurementPayload,
    pressure: MeasurementPayload,
    wind_direction: WindDirectionPayload,
    location: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    last_update: DateTime<Utc>,
}

/// Parse a timestamp with offset, or a naive one taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn measurement(field: &str, payload: MeasurementPayload) -> FetchResult<Measurement> {
    if !payload.value.is_finite() {
        return Err(FetchError::MalformedPayload(format!(
            "{field}.value is not a finite number"
        )));
    }
    if payload.unit.trim().is_empty() {
        return Err(FetchError::MalformedPayload(format!("{field}.unit is empty")));
    }
    Ok(Measurement::new(payload.value, payload.unit, payload.trend))
}

impl TryFrom<WeatherPayload> for WeatherSnapshot {
    type Error = FetchError;

    fn try_from(payload: WeatherPayload) -> FetchResult<Self> {
        let wind = payload.wind_direction;
        if wind.degrees > 360 {
            return Err(FetchError::MalformedPayload(format!(
                "windDirection.degrees out of range: {}",
                wind.degrees
            )));
        }
        if wind.value.trim().is_empty() {
            return Err(FetchError::MalformedPayload(
                "windDirection.value is empty".into(),
            ));
        }
        if wind.unit.trim().is_empty() {
            return Err(FetchError::MalformedPayload(
                "windDirection.unit is empty".into(),
            ));
        }
        if payload.location.trim().is_empty() {
            return Err(FetchError::MalformedPayload("location is empty".into()));
        }

        Ok(WeatherSnapshot {
            temperature: measurement("temperature", payload.temperature)?,
            wind_speed: measurement("windSpeed", payload.wind_speed)?,
            precipitation: measurement("precipitation", payload.precipitation)?,
            pressure: measurement("pressure", payload.pressure)?,
            wind_direction: WindDirection {
                value: wind.value,
                degrees: wind.degrees,
                unit: wind.unit,
                trend: wind.trend,
            },
            location: payload.location,
            observed_at: payload.last_update,
        })
    }
}

/// Decode a response body into a complete snapshot.
///
/// Any missing field, unknown trend or out-of-range value is a malformed
/// payload; partial snapshots are never produced.
pub fn decode_snapshot(body: &[u8]) -> FetchResult<WeatherSnapshot> {
    let payload: WeatherPayload = serde_json::from_slice(body)
        .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;
    WeatherSnapshot::try_from(payload)
}
