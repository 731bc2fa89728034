//! Derived advisory models: ice risk, snowfall, grit dosage, daily summaries

use crate::models::weather::{WeatherCondition, WeatherIcon};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative likelihood of surface icing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IceRiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for IceRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IceRiskLevel::Low => write!(f, "low"),
            IceRiskLevel::Medium => write!(f, "medium"),
            IceRiskLevel::High => write!(f, "high"),
        }
    }
}

/// Result of the ice risk rule cascade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceRiskAssessment {
    /// Risk level
    pub risk: IceRiskLevel,
    /// Human-readable explanation of the matched rule
    pub description: String,
}

/// Predicted snowfall window derived from a forecast sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowfallPrediction {
    /// Whether any snowfall interval was found within the horizon
    pub will_snow: bool,
    /// First hour of the earliest snowfall interval
    pub start_time: Option<DateTime<FixedOffset>>,
    /// Last hour of the latest snowfall interval
    pub end_time: Option<DateTime<FixedOffset>>,
    /// Accumulated snow over the whole scanned window, in cm
    pub total_amount_cm: f64,
}

impl SnowfallPrediction {
    /// Prediction for a window without snowfall
    #[must_use]
    pub fn none() -> Self {
        Self {
            will_snow: false,
            start_time: None,
            end_time: None,
            total_amount_cm: 0.0,
        }
    }
}

/// Salt and grit dosage for a surface area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GritRequirement {
    /// Road salt in kg
    pub salt_kg: f64,
    /// Grit (abrasive) in kg
    pub grit_kg: f64,
}

/// Aggregate of all hourly entries belonging to one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date (provider-local, no timezone conversion)
    pub date: NaiveDate,
    /// Maximum hourly temperature of the day
    pub max_temperature: Option<f64>,
    /// Minimum hourly temperature of the day
    pub min_temperature: Option<f64>,
    /// Dominant condition (mode by frequency, first-seen wins ties)
    pub condition: WeatherCondition,
    /// Dominant icon (mode by frequency, first-seen wins ties)
    pub icon: WeatherIcon,
    /// Summed precipitation in mm
    pub precipitation_sum: f64,
    /// Averaged precipitation probability 0-100
    pub precipitation_probability: Option<f64>,
    /// Summed derived snow amount in cm
    pub snow_amount_cm: f64,
}
