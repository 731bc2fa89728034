//! Normalized weather observation model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated weather-state tag.
///
/// `Cloudy`, `PartlyCloudy` and `Clear` are produced by the normalizer when
/// the provider mislabels dry-but-cloudy hours as rain; the remaining values
/// map directly to provider condition strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCondition {
    Dry,
    Fog,
    Rain,
    Sleet,
    Snow,
    Hail,
    Thunderstorm,
    Cloudy,
    PartlyCloudy,
    Clear,
    Unknown,
}

impl WeatherCondition {
    /// Parse a provider condition string; unrecognized values map to `Unknown`
    #[must_use]
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "dry" => Self::Dry,
            "fog" => Self::Fog,
            "rain" => Self::Rain,
            "sleet" => Self::Sleet,
            "snow" => Self::Snow,
            "hail" => Self::Hail,
            "thunderstorm" => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dry => "dry",
            Self::Fog => "fog",
            Self::Rain => "rain",
            Self::Sleet => "sleet",
            Self::Snow => "snow",
            Self::Hail => "hail",
            Self::Thunderstorm => "thunderstorm",
            Self::Cloudy => "cloudy",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Clear => "clear",
            Self::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

/// Display tag derived from condition and day/night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Fog,
    Rain,
    Sleet,
    Snow,
    Hail,
    Thunderstorm,
}

/// One normalized, point-in-time (or forecast-hour) weather record.
///
/// Constructed fresh on every fetch by the normalizer and never mutated
/// afterwards. Absent provider fields stay `None` unless a documented
/// backfill rule applies (humidity, soil temperature).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherObservation {
    /// Provider timestamp, offset preserved (no timezone conversion)
    pub timestamp: DateTime<FixedOffset>,
    /// Air temperature in °C, rounded to 1 decimal
    pub temperature: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// Precipitation probability 0-100
    pub precipitation_probability: Option<f64>,
    /// Relative humidity 0-100 (backfilled from cloud cover / precipitation
    /// when the provider omits it)
    pub relative_humidity: Option<f64>,
    /// Cloud cover 0-100
    pub cloud_cover: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees (0-360)
    pub wind_direction: Option<f64>,
    /// Wind gust speed in km/h
    pub wind_gust_speed: Option<f64>,
    /// Weather condition tag
    pub condition: WeatherCondition,
    /// Display icon derived from condition and hour of day
    pub icon: WeatherIcon,
    /// Soil temperature in °C; a heuristic proxy when not measured
    pub soil_temperature: Option<f64>,
    /// Atmospheric pressure in hPa (passthrough)
    pub pressure: Option<f64>,
    /// Visibility in meters (passthrough)
    pub visibility: Option<f64>,
    /// Dew point in °C (passthrough)
    pub dew_point: Option<f64>,
    /// Provider station id, or the synthetic sentinel
    pub source_id: Option<String>,
}

impl WeatherObservation {
    /// Format temperature with unit, or a placeholder when unknown
    #[must_use]
    pub fn format_temperature(&self) -> String {
        match self.temperature {
            Some(t) => format!("{t:.1}°C"),
            None => "–".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_from_provider() {
        assert_eq!(WeatherCondition::from_provider("rain"), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_provider("snow"), WeatherCondition::Snow);
        assert_eq!(
            WeatherCondition::from_provider("drizzle-ish"),
            WeatherCondition::Unknown
        );
    }

    #[test]
    fn test_condition_display_round_trip() {
        assert_eq!(WeatherCondition::PartlyCloudy.to_string(), "partly-cloudy");
        assert_eq!(WeatherCondition::Thunderstorm.to_string(), "thunderstorm");
    }
}
