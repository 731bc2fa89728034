//! Frostwacht - winter-service weather advisories for facility management
//!
//! This library fetches and normalizes weather observations, derives
//! winter-service advisories (ice risk, clearing time, grit dosage, snowfall
//! prediction), and maintains a short-lived weather cache with a listener bus
//! and a threshold-based notification engine.

pub mod advisory;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod notifications;
pub mod provider;
pub mod storage;
pub mod synthetic;

// Re-export core types for public API
pub use cache::{CacheEntry, SessionSnapshot, WeatherStore};
pub use config::FrostwachtConfig;
pub use error::FrostwachtError;
pub use models::{
    Coordinates, DailySummary, GritRequirement, IceRiskAssessment, IceRiskLevel, Location,
    Notification, NotificationKind, SnowfallPrediction, WeatherObservation,
};
pub use notifications::{AlertMonitor, NotificationCenter, Notifier};
pub use provider::{WeatherApiClient, WeatherProvider};
pub use storage::{FjallStorage, MemoryStorage, Storage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the typed-error layer of the library
pub type Result<T> = std::result::Result<T, FrostwachtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
