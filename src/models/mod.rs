//! Data models for the `Frostwacht` weather advisory engine
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and geocoding metadata
//! - Weather: Normalized observations, conditions, and daily aggregates
//! - Advisory: Derived assessments (ice risk, snowfall, grit dosage)
//! - Notification: User-facing alert records
//! - Brightsky: Raw wire types of the weather provider

pub mod advisory;
pub mod brightsky;
pub mod location;
pub mod notification;
pub mod weather;

// Re-export all public types for convenient access
pub use advisory::{DailySummary, GritRequirement, IceRiskAssessment, IceRiskLevel, SnowfallPrediction};
pub use location::{Coordinates, Location};
pub use notification::{Notification, NotificationKind};
pub use weather::{WeatherCondition, WeatherIcon, WeatherObservation};
