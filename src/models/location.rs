//! Location models for geographic coordinates and geocoding metadata

use crate::FrostwachtError;
use serde::{Deserialize, Serialize};

/// Tolerance used when matching cached coordinates against a request.
/// Both sides are rounded to two decimals first; see [`Coordinates::matches`].
pub const COORDINATE_TOLERANCE: f64 = 0.01;

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, failing fast on out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(FrostwachtError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(FrostwachtError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Re-check range invariants, for coordinates built from struct literals
    pub fn validate(&self) -> crate::Result<()> {
        Self::new(self.latitude, self.longitude).map(|_| ())
    }

    /// Round both components to two decimal places
    #[must_use]
    pub fn rounded(&self) -> (f64, f64) {
        (
            (self.latitude * 100.0).round() / 100.0,
            (self.longitude * 100.0).round() / 100.0,
        )
    }

    /// Tolerance match against another coordinate pair.
    ///
    /// Both sides are rounded to two decimals and accepted when within
    /// [`COORDINATE_TOLERANCE`] of each other. This is deliberately not
    /// exact equality: nearby requests should share a cache entry.
    #[must_use]
    pub fn matches(&self, other: &Coordinates) -> bool {
        let (lat_a, lon_a) = self.rounded();
        let (lat_b, lon_b) = other.rounded();
        (lat_a - lat_b).abs() <= COORDINATE_TOLERANCE
            && (lon_a - lon_b).abs() <= COORDINATE_TOLERANCE
    }

    /// Format coordinates for display and logging
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A resolved location (geocoding result)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Geographic coordinates
    pub coordinates: Coordinates,
    /// Display name (street, city, region)
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2), when known
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(coordinates: Coordinates, name: String) -> Self {
        Self {
            coordinates,
            name,
            country: None,
        }
    }
}
