//! Presentation mapping from snapshots to display attributes
//!
//! Everything here is a pure function of its input: mapping the same
//! snapshot twice yields the same output and never touches the snapshot.

use std::fmt;
use std::str::FromStr;

use crate::types::{Trend, WeatherSnapshot};

/// Presentation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("Unknown measurement kind: {0}")]
    UnknownMeasurement(String),
}

/// The five measurements a snapshot carries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementKind {
    Temperature,
    WindSpeed,
    Precipitation,
    Pressure,
    WindDirection,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 5] = [
        MeasurementKind::Temperature,
        MeasurementKind::WindSpeed,
        MeasurementKind::Precipitation,
        MeasurementKind::Pressure,
        MeasurementKind::WindDirection,
    ];

    /// Payload key of this measurement
    pub fn key(self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::WindSpeed => "windSpeed",
            MeasurementKind::Precipitation => "precipitation",
            MeasurementKind::Pressure => "pressure",
            MeasurementKind::WindDirection => "windDirection",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "Temperature",
            MeasurementKind::WindSpeed => "Wind speed",
            MeasurementKind::Precipitation => "Precipitation",
            MeasurementKind::Pressure => "Pressure",
            MeasurementKind::WindDirection => "Wind direction",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MeasurementKind::Temperature => "thermometer",
            MeasurementKind::WindSpeed => "wind",
            MeasurementKind::Precipitation => "cloud-rain",
            MeasurementKind::Pressure => "gauge",
            MeasurementKind::WindDirection => "compass",
        }
    }

    /// Matrix band owned by this measurement; wind direction has none
    pub fn color_zone(self) -> Option<ColorZone> {
        match self {
            MeasurementKind::Temperature => Some(ColorZone::Blue),
            MeasurementKind::WindSpeed => Some(ColorZone::Green),
            MeasurementKind::Precipitation => Some(ColorZone::Yellow),
            MeasurementKind::Pressure => Some(ColorZone::Red),
            MeasurementKind::WindDirection => None,
        }
    }
}

impl FromStr for MeasurementKind {
    type Err = DisplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| DisplayError::UnknownMeasurement(s.to_string()))
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Look up the icon for a measurement by payload key
pub fn icon_for(kind: &str) -> Result<&'static str, DisplayError> {
    kind.parse::<MeasurementKind>().map(MeasurementKind::icon)
}

/// Color of a trend indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendTone {
    Green,
    Red,
    Gray,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Increasing => "rising",
            Trend::Decreasing => "falling",
            Trend::Stable => "steady",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Trend::Increasing => "trending-up",
            Trend::Decreasing => "trending-down",
            Trend::Stable => "minus",
        }
    }

    pub fn tone(self) -> TrendTone {
        match self {
            Trend::Increasing => TrendTone::Green,
            Trend::Decreasing => TrendTone::Red,
            Trend::Stable => TrendTone::Gray,
        }
    }
}

/// Matrix band color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorZone {
    Blue,
    Green,
    Yellow,
    Red,
}

impl ColorZone {
    pub fn name(self) -> &'static str {
        match self {
            ColorZone::Blue => "blue",
            ColorZone::Green => "green",
            ColorZone::Yellow => "yellow",
            ColorZone::Red => "red",
        }
    }

    /// Single-character glyph for text rendering
    pub fn glyph(self) -> char {
        match self {
            ColorZone::Blue => 'B',
            ColorZone::Green => 'G',
            ColorZone::Yellow => 'Y',
            ColorZone::Red => 'R',
        }
    }
}

/// Display attributes of one measurement card
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementDisplay {
    pub kind: MeasurementKind,
    pub icon: &'static str,
    pub trend_icon: &'static str,
    pub trend_label: &'static str,
    pub trend_tone: TrendTone,
    pub color_zone: Option<ColorZone>,
    pub value_text: String,
}

/// Display attributes of a whole snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDisplay {
    pub location: String,
    pub updated_at: String,
    pub measurements: Vec<MeasurementDisplay>,
}

/// Format a reading with one decimal place followed by its unit
pub fn format_value(value: f64, unit: &str) -> String {
    format!("{:.1} {}", value, unit)
}

fn measurement_display(kind: MeasurementKind, trend: Trend, value_text: String) -> MeasurementDisplay {
    MeasurementDisplay {
        kind,
        icon: kind.icon(),
        trend_icon: trend.icon(),
        trend_label: trend.label(),
        trend_tone: trend.tone(),
        color_zone: kind.color_zone(),
        value_text,
    }
}

/// Map a snapshot to its display attributes
pub fn map_to_display(snapshot: &WeatherSnapshot) -> SnapshotDisplay {
    let measurements = MeasurementKind::ALL
        .into_iter()
        .map(|kind| {
            let reading = match kind {
                MeasurementKind::Temperature => &snapshot.temperature,
                MeasurementKind::WindSpeed => &snapshot.wind_speed,
                MeasurementKind::Precipitation => &snapshot.precipitation,
                MeasurementKind::Pressure => &snapshot.pressure,
                MeasurementKind::WindDirection => {
                    let wind = &snapshot.wind_direction;
                    let text = format!("{} ({}{})", wind.value, wind.degrees, wind.unit);
                    return measurement_display(kind, wind.trend, text);
                }
            };
            measurement_display(kind, reading.trend, format_value(reading.value, &reading.unit))
        })
        .collect();

    SnapshotDisplay {
        location: snapshot.location.clone(),
        updated_at: snapshot
            .observed_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        measurements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{fallback_snapshot, Measurement};

    #[test]
    fn test_icon_table() {
        assert_eq!(icon_for("temperature"), Ok("thermometer"));
        assert_eq!(icon_for("windSpeed"), Ok("wind"));
        assert_eq!(icon_for("precipitation"), Ok("cloud-rain"));
        assert_eq!(icon_for("pressure"), Ok("gauge"));
        assert_eq!(icon_for("windDirection"), Ok("compass"));
        assert_eq!(
            icon_for("humidity"),
            Err(DisplayError::UnknownMeasurement("humidity".into()))
        );
    }

    #[test]
    fn test_trend_labels() {
        assert_eq!(Trend::Increasing.label(), "rising");
        assert_eq!(Trend::Decreasing.label(), "falling");
        assert_eq!(Trend::Stable.label(), "steady");
        assert_eq!(Trend::Increasing.tone(), TrendTone::Green);
        assert_eq!(Trend::Decreasing.tone(), TrendTone::Red);
    }

    #[test]
    fn test_stable_temperature_maps_to_steady_thermometer() {
        let mut snapshot = fallback_snapshot();
        snapshot.temperature = Measurement::new(23.5, "°C", Trend::Stable);

        let display = map_to_display(&snapshot);
        let temperature = &display.measurements[0];
        assert_eq!(temperature.kind, MeasurementKind::Temperature);
        assert_eq!(temperature.icon, "thermometer");
        assert_eq!(temperature.trend_label, "steady");
        assert_eq!(temperature.value_text, "23.5 °C");
        assert_eq!(temperature.color_zone, Some(ColorZone::Blue));
    }

    #[test]
    fn test_mapping_is_pure() {
        let snapshot = fallback_snapshot();
        let before = snapshot.clone();

        let first = map_to_display(&snapshot);
        let second = map_to_display(&snapshot);

        assert_eq!(first, second);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_fallback_display_lines() {
        let display = map_to_display(&fallback_snapshot());
        let lines = display
            .measurements
            .iter()
            .map(|m| format!("{} {} {} {}", m.icon, m.value_text, m.trend_icon, m.trend_label))
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(lines, @r"
        thermometer 23.5 °C minus steady
        wind 8.2 m/s trending-up rising
        cloud-rain 2.3 mm trending-down falling
        gauge 1013.2 hPa minus steady
        compass NE (45°) minus steady
        ");
        assert_eq!(display.updated_at, "2025-01-01 00:00:00 UTC");
        assert_eq!(display.location, "Sivas, Türkiye");
    }

    #[test]
    fn test_wind_direction_has_no_matrix_band() {
        assert_eq!(MeasurementKind::WindDirection.color_zone(), None);
        assert_eq!(MeasurementKind::Pressure.color_zone(), Some(ColorZone::Red));
    }

    #[test]
    fn test_zone_table() {
        let zones: Vec<(&str, char)> = MeasurementKind::ALL
            .into_iter()
            .filter_map(MeasurementKind::color_zone)
            .map(|zone| (zone.name(), zone.glyph()))
            .collect();
        assert_eq!(
            zones,
            vec![("blue", 'B'), ("green", 'G'), ("yellow", 'Y'), ("red", 'R')]
        );
    }
}
