//! Weather observation normalizer
//!
//! Converts one raw provider record into a canonical [`WeatherObservation`].
//! Missing condition, icon, humidity and soil temperature are inferred with
//! simple heuristics; all heuristic backfills are named as approximations so
//! they are not mistaken for measured values. A single malformed record never
//! fails a batch: absent fields propagate as `None`.

use crate::models::brightsky::WeatherRecord;
use crate::models::{WeatherCondition, WeatherIcon, WeatherObservation};
use chrono::Timelike;
use tracing::warn;

/// Hours strictly before this one are treated as night
const NIGHT_END_HOUR: u32 = 6;
/// Hours strictly after this one are treated as night
const NIGHT_START_HOUR: u32 = 20;

/// Normalize one raw provider record. Pure and idempotent.
#[must_use]
pub fn normalize(raw: &WeatherRecord) -> WeatherObservation {
    log_suspicious_values(raw);

    let precipitation = raw.precipitation;
    let cloud_cover = raw.cloud_cover;

    let parsed = raw
        .condition
        .as_deref()
        .map_or(WeatherCondition::Unknown, WeatherCondition::from_provider);
    let condition = reclassify_condition(parsed, precipitation, cloud_cover);

    let hour = raw.timestamp.hour();
    let icon = select_icon(condition, cloud_cover, hour);

    let relative_humidity = raw
        .relative_humidity
        .or_else(|| Some(approximate_humidity(precipitation, cloud_cover)));

    let soil_temperature = raw.temperature.map(approximate_soil_temperature);

    WeatherObservation {
        timestamp: raw.timestamp,
        temperature: raw.temperature.map(round_tenth),
        precipitation: precipitation.map(round_tenth),
        precipitation_probability: raw.precipitation_probability.map(round_whole),
        relative_humidity: relative_humidity.map(round_whole),
        cloud_cover: cloud_cover.map(round_whole),
        wind_speed: raw.wind_speed.map(round_tenth),
        wind_direction: raw.wind_direction.map(round_whole),
        wind_gust_speed: raw.wind_gust_speed.map(round_tenth),
        condition,
        icon,
        soil_temperature,
        pressure: raw.pressure_msl.map(round_tenth),
        visibility: raw.visibility.map(round_whole),
        dew_point: raw.dew_point.map(round_tenth),
        source_id: raw.source_id.map(|id| id.to_string()),
    }
}

/// The provider sometimes mislabels dry-but-cloudy hours as rain.
/// Reclassify "rain" with zero precipitation using cloud cover.
fn reclassify_condition(
    condition: WeatherCondition,
    precipitation: Option<f64>,
    cloud_cover: Option<f64>,
) -> WeatherCondition {
    if condition == WeatherCondition::Rain && precipitation.unwrap_or(0.0) == 0.0 {
        let cover = cloud_cover.unwrap_or(0.0);
        if cover > 50.0 {
            WeatherCondition::Cloudy
        } else if cover > 10.0 {
            WeatherCondition::PartlyCloudy
        } else {
            WeatherCondition::Clear
        }
    } else {
        condition
    }
}

/// Pick a display icon from condition and hour of day
fn select_icon(condition: WeatherCondition, cloud_cover: Option<f64>, hour: u32) -> WeatherIcon {
    let night = hour < NIGHT_END_HOUR || hour > NIGHT_START_HOUR;

    match condition {
        WeatherCondition::Clear => day_night(WeatherIcon::ClearDay, WeatherIcon::ClearNight, night),
        WeatherCondition::PartlyCloudy => day_night(
            WeatherIcon::PartlyCloudyDay,
            WeatherIcon::PartlyCloudyNight,
            night,
        ),
        WeatherCondition::Cloudy => WeatherIcon::Cloudy,
        WeatherCondition::Fog => WeatherIcon::Fog,
        WeatherCondition::Rain => WeatherIcon::Rain,
        WeatherCondition::Sleet => WeatherIcon::Sleet,
        WeatherCondition::Snow => WeatherIcon::Snow,
        WeatherCondition::Hail => WeatherIcon::Hail,
        WeatherCondition::Thunderstorm => WeatherIcon::Thunderstorm,
        // "dry" and unknown conditions carry no sky state; fall back to
        // the same cloud-cover mapping used for reclassification
        WeatherCondition::Dry | WeatherCondition::Unknown => {
            let cover = cloud_cover.unwrap_or(0.0);
            if cover > 50.0 {
                WeatherIcon::Cloudy
            } else if cover > 10.0 {
                day_night(
                    WeatherIcon::PartlyCloudyDay,
                    WeatherIcon::PartlyCloudyNight,
                    night,
                )
            } else {
                day_night(WeatherIcon::ClearDay, WeatherIcon::ClearNight, night)
            }
        }
    }
}

fn day_night(day: WeatherIcon, night_icon: WeatherIcon, night: bool) -> WeatherIcon {
    if night { night_icon } else { day }
}

/// Crude humidity proxy from precipitation and cloud cover.
/// An approximation, not a measurement.
#[must_use]
pub fn approximate_humidity(precipitation: Option<f64>, cloud_cover: Option<f64>) -> f64 {
    if precipitation.unwrap_or(0.0) > 0.0 {
        85.0
    } else if cloud_cover.unwrap_or(0.0) > 50.0 {
        75.0
    } else {
        60.0
    }
}

/// Weighted blend of air temperature as a soil temperature proxy.
/// An approximation, not a measurement.
#[must_use]
pub fn approximate_soil_temperature(air_temperature: f64) -> f64 {
    round_tenth(0.7 * air_temperature + 0.3 * (air_temperature - 2.0))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_whole(value: f64) -> f64 {
    value.round()
}

/// Log physically implausible values. Defensive bounds only: suspicious
/// records are logged, never rejected.
fn log_suspicious_values(raw: &WeatherRecord) {
    if let Some(t) = raw.temperature {
        if !(-50.0..=50.0).contains(&t) {
            warn!(
                timestamp = %raw.timestamp,
                temperature = t,
                "Suspicious temperature outside [-50, 50]°C"
            );
        }
    }
    if let Some(h) = raw.relative_humidity {
        if !(0.0..=100.0).contains(&h) {
            warn!(
                timestamp = %raw.timestamp,
                humidity = h,
                "Suspicious relative humidity outside [0, 100]"
            );
        }
    }
    if let Some(p) = raw.precipitation {
        if p < 0.0 {
            warn!(
                timestamp = %raw.timestamp,
                precipitation = p,
                "Suspicious negative precipitation"
            );
        }
    }
}
