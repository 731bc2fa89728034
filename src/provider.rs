//! HTTP clients for the weather and geocoding providers
//!
//! Wraps the Bright Sky weather API and a Nominatim-style geocoder behind a
//! narrow fetch interface with retries, timeouts, and typed errors. An empty
//! forecast result falls back to the synthetic generator so callers never see
//! an empty state; an empty current-weather result is a typed error.

use crate::config::ProviderConfig;
use crate::models::brightsky::{CurrentWeatherResponse, WeatherRecord, WeatherResponse};
use crate::models::{Coordinates, Location, WeatherObservation};
use crate::{FrostwachtError, normalizer, synthetic};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Source of weather data, seam for tests and alternative providers
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a coordinate pair
    async fn fetch_current(&self, coordinates: Coordinates) -> Result<WeatherObservation>;

    /// Fetch an hourly forecast covering `from..=to`
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WeatherObservation>>;
}

/// HTTP client for the weather and geocoding providers
pub struct WeatherApiClient {
    http: ClientWithMiddleware,
    config: ProviderConfig,
}

impl WeatherApiClient {
    /// Create a new client with the configured timeout and retry policy
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(u64::from(
                config.timeout_seconds,
            )))
            .user_agent(concat!("frostwacht/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { http, config })
    }

    /// Resolve a free-text address to a location, restricted to DE/AT/CH
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Location> {
        let query = query.trim();
        if query.chars().count() < 3 {
            return Err(FrostwachtError::validation(
                "Address query must be at least 3 characters",
            )
            .into());
        }

        let url = self.geocoding_url(query, Utc::now().timestamp_millis());
        let places: Vec<NominatimPlace> = self.get_json(&url, "geocoding").await?;

        let Some(place) = places.into_iter().next() else {
            return Err(
                FrostwachtError::empty_result(format!("No geocoding results for '{query}'")).into(),
            );
        };

        let latitude = place
            .lat
            .parse::<f64>()
            .with_context(|| format!("Invalid latitude in geocoding response: {}", place.lat))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .with_context(|| format!("Invalid longitude in geocoding response: {}", place.lon))?;

        let coordinates = Coordinates::new(latitude, longitude)?;
        info!(
            "Geocoded '{}' to {} ({})",
            query,
            coordinates.format(),
            place.display_name
        );

        Ok(Location {
            coordinates,
            name: place.display_name,
            country: place
                .address
                .and_then(|a| a.country_code)
                .map(|c| c.to_uppercase()),
        })
    }

    fn current_url(&self, coordinates: Coordinates, cachebuster: i64) -> String {
        format!(
            "{}/current_weather?lat={}&lon={}&tz={}&_={}",
            self.config.weather_base_url,
            coordinates.latitude,
            coordinates.longitude,
            urlencoding::encode(&self.config.timezone),
            cachebuster
        )
    }

    fn forecast_url(
        &self,
        coordinates: Coordinates,
        from: NaiveDate,
        to: NaiveDate,
        cachebuster: i64,
    ) -> String {
        format!(
            "{}/weather?lat={}&lon={}&date={}&last_date={}&tz={}&_={}",
            self.config.weather_base_url,
            coordinates.latitude,
            coordinates.longitude,
            from,
            to,
            urlencoding::encode(&self.config.timezone),
            cachebuster
        )
    }

    fn geocoding_url(&self, query: &str, cachebuster: i64) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1&addressdetails=1&countrycodes=de,at,ch&_={}",
            self.config.geocoding_base_url,
            urlencoding::encode(query),
            cachebuster
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!(%url, "Requesting {what}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_send_error(e, what))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FrostwachtError::api(format!(
                "{what} request failed with status {status}"
            ))
            .into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {what} response"))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self))]
    async fn fetch_current(&self, coordinates: Coordinates) -> Result<WeatherObservation> {
        coordinates.validate()?;

        let url = self.current_url(coordinates, Utc::now().timestamp_millis());
        let response: CurrentWeatherResponse = self.get_json(&url, "current weather").await?;

        let Some(record) = response.weather else {
            return Err(FrostwachtError::empty_result(format!(
                "No current weather for {}",
                coordinates.format()
            ))
            .into());
        };

        Ok(normalizer::normalize(&record))
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WeatherObservation>> {
        coordinates.validate()?;

        let url = self.forecast_url(coordinates, from, to, Utc::now().timestamp_millis());
        let response: WeatherResponse = self.get_json(&url, "forecast").await?;

        let records = parse_records(&response);
        if records.is_empty() {
            let days = (to - from).num_days().max(1).unsigned_abs() as u32;
            warn!(
                "Provider returned no forecast entries for {}, generating {}-day synthetic fallback",
                coordinates.format(),
                days
            );
            let start = from.and_time(NaiveTime::MIN).and_utc().fixed_offset();
            return Ok(synthetic::generate_fallback_forecast(start, days));
        }

        info!(
            "Fetched {} forecast entries for {}",
            records.len(),
            coordinates.format()
        );
        Ok(records.iter().map(normalizer::normalize).collect())
    }
}

/// Decode the raw record array one entry at a time so a single malformed
/// record is skipped (and logged) instead of failing the whole batch
fn parse_records(response: &WeatherResponse) -> Vec<WeatherRecord> {
    response
        .weather
        .iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed weather record: {e}");
                None
            }
        })
        .collect()
}

fn map_send_error(err: reqwest_middleware::Error, what: &str) -> anyhow::Error {
    match err {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
            FrostwachtError::timeout(format!("{what} request timed out: {e}")).into()
        }
        other => FrostwachtError::api(format!("{what} request failed: {other}")).into(),
    }
}

/// One geocoding result from the Nominatim-style search endpoint
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WeatherApiClient {
        WeatherApiClient::new(ProviderConfig::default()).unwrap()
    }

    #[test]
    fn test_forecast_url_contains_window_and_cachebuster() {
        let coordinates = Coordinates::new(52.52, 13.405).unwrap();
        let from = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 1, 24).unwrap();
        let url = client().forecast_url(coordinates, from, to, 1700000000000);

        assert!(url.starts_with("https://api.brightsky.dev/weather?"));
        assert!(url.contains("lat=52.52"));
        assert!(url.contains("lon=13.405"));
        assert!(url.contains("date=2026-01-10"));
        assert!(url.contains("last_date=2026-01-24"));
        assert!(url.contains("tz=Europe%2FBerlin"));
        assert!(url.contains("_=1700000000000"));
    }

    #[test]
    fn test_geocoding_url_is_country_restricted() {
        let url = client().geocoding_url("Hauptstraße 1, Chemnitz", 42);
        assert!(url.contains("countrycodes=de,at,ch"));
        assert!(url.contains("limit=1"));
        assert!(url.contains("q=Hauptstra%C3%9Fe%201%2C%20Chemnitz"));
    }

    #[tokio::test]
    async fn test_geocode_rejects_short_query_before_network() {
        let err = client().geocode("  ab ").await.unwrap_err();
        let frost = err.downcast_ref::<FrostwachtError>().unwrap();
        assert!(matches!(frost, FrostwachtError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_fetch_fails_fast_on_invalid_coordinates() {
        let bad = Coordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        let err = client().fetch_current(bad).await.unwrap_err();
        let frost = err.downcast_ref::<FrostwachtError>().unwrap();
        assert!(matches!(frost, FrostwachtError::Validation { .. }));
    }

    #[test]
    fn test_parse_records_skips_malformed_entries() {
        let response: WeatherResponse = serde_json::from_str(
            r#"{
                "weather": [
                    {"timestamp": "2026-01-10T06:00:00+01:00", "temperature": -1.0},
                    {"timestamp": "not a timestamp"},
                    {"timestamp": "2026-01-10T07:00:00+01:00", "temperature": -0.5}
                ],
                "sources": []
            }"#,
        )
        .unwrap();

        let records = parse_records(&response);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].temperature, Some(-1.0));
    }
}
