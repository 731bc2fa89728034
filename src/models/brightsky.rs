//! Raw wire types of the Bright Sky weather API
//!
//! These structs mirror the provider JSON and are consumed read-only; the
//! normalizer converts them into [`crate::models::WeatherObservation`].
//! Unknown fields are ignored, absent fields stay `None`.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Forecast response body: `{ "weather": [...], "sources": [...] }`
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    /// Hourly weather records, chronological
    #[serde(default)]
    pub weather: Vec<serde_json::Value>,
    /// Measurement sources referenced by the records
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Current-weather response body: `{ "weather": {...}, "sources": [...] }`
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    /// Single current-conditions record
    pub weather: Option<WeatherRecord>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One raw hourly record as delivered by the provider.
///
/// Kept loose on purpose: every measurement is optional and validated only
/// at the normalizer boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRecord {
    /// Record timestamp with provider offset
    pub timestamp: DateTime<FixedOffset>,
    /// Station id of the contributing source
    pub source_id: Option<i64>,
    /// Air temperature in °C
    pub temperature: Option<f64>,
    /// Precipitation in mm
    pub precipitation: Option<f64>,
    /// Precipitation probability 0-100
    pub precipitation_probability: Option<f64>,
    /// Relative humidity 0-100
    pub relative_humidity: Option<f64>,
    /// Cloud cover 0-100
    pub cloud_cover: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_direction: Option<f64>,
    /// Wind gust speed in km/h
    pub wind_gust_speed: Option<f64>,
    /// Pressure at mean sea level in hPa
    pub pressure_msl: Option<f64>,
    /// Visibility in meters
    pub visibility: Option<f64>,
    /// Dew point in °C
    pub dew_point: Option<f64>,
    /// Condition tag ("dry", "rain", "snow", ...)
    pub condition: Option<String>,
}

/// A measurement source (weather station) entry
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub id: Option<i64>,
    pub station_name: Option<String>,
    pub distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let json = r#"{"timestamp": "2026-01-10T06:00:00+01:00", "temperature": -1.5}"#;
        let record: WeatherRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.temperature, Some(-1.5));
        assert!(record.precipitation.is_none());
        assert!(record.condition.is_none());
    }

    #[test]
    fn test_response_defaults_to_empty_arrays() {
        let response: WeatherResponse = serde_json::from_str("{}").unwrap();
        assert!(response.weather.is_empty());
        assert!(response.sources.is_empty());
    }
}
