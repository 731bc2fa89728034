//! Derived-advisory calculators
//!
//! Pure functions computing ice risk, optimal clearing time, salt/grit
//! dosage and snowfall prediction from normalized observations. Calculators
//! never fail: missing data degrades to the most conservative defensible
//! answer (for example an empty forecast yields "no snow").

use crate::models::{
    GritRequirement, IceRiskAssessment, IceRiskLevel, SnowfallPrediction, WeatherObservation,
};
use chrono::{DateTime, FixedOffset, Timelike};

/// Temperature at or below which winter service is considered required, °C
pub const WINTER_SERVICE_TEMPERATURE: f64 = 3.0;

/// Upper temperature bound for an hour to count as a snowfall hour, °C
pub const SNOW_TEMPERATURE_LIMIT: f64 = 2.0;

/// Assess surface icing risk from temperature (°C), precipitation (mm) and
/// relative humidity (%).
///
/// Ordered rule cascade, first match wins. More severe conditions are tested
/// first since later rules are strict supersets.
#[must_use]
pub fn calculate_ice_risk(
    temperature: f64,
    precipitation: f64,
    humidity: f64,
) -> IceRiskAssessment {
    let (risk, description) = if temperature <= 0.0 && precipitation > 0.0 {
        (
            IceRiskLevel::High,
            "Freezing temperatures with precipitation: icing very likely",
        )
    } else if temperature <= -3.0 {
        (
            IceRiskLevel::High,
            "Severe frost: residual moisture will freeze on surfaces",
        )
    } else if temperature <= 0.0 && humidity > 80.0 {
        (
            IceRiskLevel::Medium,
            "Freezing temperatures with high humidity: hoarfrost possible",
        )
    } else if temperature <= 0.0
        || (temperature <= WINTER_SERVICE_TEMPERATURE && precipitation > 0.0)
    {
        (
            IceRiskLevel::Medium,
            "Near-freezing conditions: ice patches possible",
        )
    } else if temperature <= WINTER_SERVICE_TEMPERATURE {
        (
            IceRiskLevel::Low,
            "Temperatures close to freezing: monitor conditions",
        )
    } else {
        (IceRiskLevel::Low, "No significant risk of icing")
    };

    IceRiskAssessment {
        risk,
        description: description.to_string(),
    }
}

/// Whether current conditions call for winter service at all
#[must_use]
pub fn winter_service_required(temperature: f64) -> bool {
    temperature <= WINTER_SERVICE_TEMPERATURE
}

/// Find the best hour to clear within a forecast sequence.
///
/// Each hour is scored as `2*temp` (or a cold penalty of -5 when at or below
/// freezing or unknown), minus `10*precip`, plus a daylight bonus of +5 for
/// hours 6..=20 (else -5). Returns the timestamp of the highest score; ties
/// are broken by first occurrence. `None` for an empty forecast.
#[must_use]
pub fn calculate_optimal_clearing_time(
    forecast: &[WeatherObservation],
) -> Option<DateTime<FixedOffset>> {
    let mut best: Option<(DateTime<FixedOffset>, f64)> = None;

    for observation in forecast {
        let temperature_score = match observation.temperature {
            Some(t) if t > 0.0 => 2.0 * t,
            _ => -5.0,
        };
        let precipitation_penalty = 10.0 * observation.precipitation.unwrap_or(0.0);
        let hour = observation.timestamp.hour();
        let daylight_bonus = if (6..=20).contains(&hour) { 5.0 } else { -5.0 };

        let score = temperature_score - precipitation_penalty + daylight_bonus;

        // strict comparison keeps the first occurrence on ties
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((observation.timestamp, score));
        }
    }

    best.map(|(timestamp, _)| timestamp)
}

/// Salt and grit dosage for a surface area at a given risk level.
///
/// Dosage table: low 20 g/m², medium 30 g/m², high 40 g/m².
/// Grit is dimensioned at 1.5x the salt weight.
#[must_use]
pub fn calculate_required_grit(area_m2: f64, risk: IceRiskLevel) -> GritRequirement {
    let dosage_g_per_m2 = match risk {
        IceRiskLevel::Low => 20.0,
        IceRiskLevel::Medium => 30.0,
        IceRiskLevel::High => 40.0,
    };

    let salt_kg = area_m2 * dosage_g_per_m2 / 1000.0;
    GritRequirement {
        salt_kg,
        grit_kg: salt_kg * 1.5,
    }
}

/// Per-hour snow accumulation in cm for a given temperature and
/// precipitation.
///
/// Uses the uniform two-bucket conversion table: factor 10 at or below
/// freezing, factor 7 above (up to the snow temperature limit). This one
/// table is applied everywhere snow amounts are derived.
#[must_use]
pub fn snow_amount_cm(temperature: f64, precipitation: f64) -> f64 {
    let factor = if temperature <= 0.0 { 10.0 } else { 7.0 };
    precipitation * factor / 10.0
}

/// Scan the first `horizon_hours` entries of a forecast for snowfall.
///
/// A snow interval is a maximal contiguous run where temperature ≤ 2°C and
/// precipitation > 0. The prediction reports the first start and last end
/// across the whole scanned window (not per interval) and the summed snow
/// amount. Hours with unknown temperature never count as snow hours.
#[must_use]
pub fn predict_snowfall(
    forecast: &[WeatherObservation],
    horizon_hours: usize,
) -> SnowfallPrediction {
    let window = &forecast[..forecast.len().min(horizon_hours)];

    let mut start_time = None;
    let mut end_time = None;
    let mut total_amount_cm = 0.0;

    for observation in window {
        let (Some(temperature), Some(precipitation)) =
            (observation.temperature, observation.precipitation)
        else {
            continue;
        };

        if temperature <= SNOW_TEMPERATURE_LIMIT && precipitation > 0.0 {
            if start_time.is_none() {
                start_time = Some(observation.timestamp);
            }
            end_time = Some(observation.timestamp);
            total_amount_cm += snow_amount_cm(temperature, precipitation);
        }
    }

    SnowfallPrediction {
        will_snow: start_time.is_some(),
        start_time,
        end_time,
        total_amount_cm,
    }
}
