//! Synthetic fallback forecast generator
//!
//! Produces a clearly-marked placeholder forecast when the provider returns
//! no usable data, so callers never have to render an empty state. The
//! temperature follows a diurnal sine curve around a seasonal monthly
//! baseline; precipitation chance is randomized but bounded, seeded from the
//! start time so a given window always generates the same series.

use crate::models::{WeatherCondition, WeatherIcon, WeatherObservation};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Sentinel source id carried by every synthetic entry, so callers can
/// distinguish placeholder data from real provider data
pub const SYNTHETIC_SOURCE_ID: &str = "synthetic";

/// Monthly baseline temperatures in °C (January..December), roughly matching
/// the German lowland climate the service area lies in
const MONTHLY_BASELINE: [f64; 12] = [
    0.5, 1.5, 5.0, 9.5, 14.0, 17.0, 19.0, 18.5, 14.5, 9.5, 4.5, 1.5,
];

/// Amplitude of the diurnal temperature swing in °C
const DIURNAL_AMPLITUDE: f64 = 4.0;

/// Chance of any given synthetic hour carrying precipitation
const PRECIPITATION_CHANCE: f64 = 0.25;

/// Generate a deterministic hourly placeholder forecast starting at `from`
/// and spanning `days` days.
#[must_use]
pub fn generate_fallback_forecast(from: DateTime<FixedOffset>, days: u32) -> Vec<WeatherObservation> {
    let hours = u64::from(days) * 24;
    let mut rng = StdRng::seed_from_u64(from.timestamp().unsigned_abs());
    let mut forecast = Vec::with_capacity(hours as usize);

    for offset in 0..hours {
        let timestamp = from + Duration::hours(offset as i64);
        forecast.push(synthetic_hour(timestamp, &mut rng));
    }

    forecast
}

fn synthetic_hour(timestamp: DateTime<FixedOffset>, rng: &mut StdRng) -> WeatherObservation {
    let baseline = MONTHLY_BASELINE[timestamp.month0() as usize];
    let temperature = round_tenth(baseline + diurnal_offset(timestamp.hour()));

    let raining = rng.random_bool(PRECIPITATION_CHANCE);
    let precipitation = if raining {
        round_tenth(rng.random_range(0.1..1.5))
    } else {
        0.0
    };
    let precipitation_probability = if raining {
        (rng.random_range(40.0..80.0_f64)).round()
    } else {
        (rng.random_range(0.0..30.0_f64)).round()
    };

    let condition = if precipitation > 0.0 {
        if temperature <= 2.0 {
            WeatherCondition::Snow
        } else {
            WeatherCondition::Rain
        }
    } else {
        WeatherCondition::PartlyCloudy
    };

    let night = timestamp.hour() < 6 || timestamp.hour() > 20;
    let icon = match condition {
        WeatherCondition::Snow => WeatherIcon::Snow,
        WeatherCondition::Rain => WeatherIcon::Rain,
        _ if night => WeatherIcon::PartlyCloudyNight,
        _ => WeatherIcon::PartlyCloudyDay,
    };

    WeatherObservation {
        timestamp,
        temperature: Some(temperature),
        precipitation: Some(precipitation),
        precipitation_probability: Some(precipitation_probability),
        relative_humidity: Some(if precipitation > 0.0 { 85.0 } else { 60.0 }),
        cloud_cover: Some(50.0),
        wind_speed: Some(10.0),
        wind_direction: Some(225.0),
        wind_gust_speed: Some(18.0),
        condition,
        icon,
        soil_temperature: Some(round_tenth(0.7 * temperature + 0.3 * (temperature - 2.0))),
        pressure: Some(1013.0),
        visibility: Some(10_000.0),
        dew_point: None,
        source_id: Some(SYNTHETIC_SOURCE_ID.to_string()),
    }
}

/// Diurnal sine offset: coldest towards 04:00, warmest towards 16:00
fn diurnal_offset(hour: u32) -> f64 {
    let phase = (f64::from(hour) - 10.0) / 24.0 * std::f64::consts::TAU;
    DIURNAL_AMPLITUDE * phase.sin()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<FixedOffset> {
        "2026-01-10T00:00:00+01:00".parse().unwrap()
    }

    #[test]
    fn test_fallback_horizon_length_and_sentinel() {
        let forecast = generate_fallback_forecast(start(), 14);
        assert_eq!(forecast.len(), 336);
        assert!(
            forecast
                .iter()
                .all(|o| o.source_id.as_deref() == Some(SYNTHETIC_SOURCE_ID))
        );
    }

    #[test]
    fn test_fallback_is_deterministic_for_same_start() {
        let first = generate_fallback_forecast(start(), 2);
        let second = generate_fallback_forecast(start(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_timestamps_are_hourly_and_chronological() {
        let forecast = generate_fallback_forecast(start(), 1);
        for pair in forecast.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(1));
        }
    }

    #[test]
    fn test_diurnal_curve_warmer_in_afternoon() {
        let forecast = generate_fallback_forecast(start(), 1);
        let at_4 = forecast[4].temperature.unwrap();
        let at_16 = forecast[16].temperature.unwrap();
        assert!(at_16 > at_4);
    }

    #[test]
    fn test_precipitation_is_bounded() {
        let forecast = generate_fallback_forecast(start(), 14);
        for observation in &forecast {
            let precipitation = observation.precipitation.unwrap();
            assert!((0.0..=1.5).contains(&precipitation));
            let probability = observation.precipitation_probability.unwrap();
            assert!((0.0..=100.0).contains(&probability));
        }
    }
}
