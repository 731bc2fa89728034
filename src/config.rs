//! Configuration management for the `Frostwacht` weather advisory engine
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::FrostwachtError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `Frostwacht` engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrostwachtConfig {
    /// Weather and geocoding provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Weather cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Notification threshold engine configuration
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Timezone requested from the weather provider
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient request failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Forecast horizon in days (also the synthetic fallback horizon)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in minutes
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
    /// Storage directory for the best-effort key/value store
    #[serde(default = "default_storage_location")]
    pub storage_location: String,
}

/// Notification engine configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Poll interval in minutes while subscribed
    #[serde(default = "default_poll_interval")]
    pub poll_interval_minutes: u32,
    /// Forecast window scanned by the snowfall check, in hours
    #[serde(default = "default_snowfall_horizon")]
    pub snowfall_horizon_hours: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.brightsky.dev".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_forecast_days() -> u32 {
    14
}

fn default_cache_ttl() -> u32 {
    15
}

fn default_storage_location() -> String {
    "~/.cache/frostwacht".to_string()
}

fn default_poll_interval() -> u32 {
    30
}

fn default_snowfall_horizon() -> u32 {
    24
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            weather_base_url: default_weather_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            timezone: default_timezone(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
            storage_location: default_storage_location(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: default_poll_interval(),
            snowfall_horizon_hours: default_snowfall_horizon(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for FrostwachtConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
            notifications: NotificationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FrostwachtConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with FROSTWACHT_ prefix
        builder = builder.add_source(
            Environment::with_prefix("FROSTWACHT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: FrostwachtConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("frostwacht").join("config.toml"))
    }

    /// Request timeout as a [`Duration`]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.provider.timeout_seconds))
    }

    /// Cache TTL as a [`Duration`]
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.cache.ttl_minutes) * 60)
    }

    /// Notification poll interval as a [`Duration`]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.notifications.poll_interval_minutes) * 60)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.provider.timeout_seconds == 0 || self.provider.timeout_seconds > 300 {
            return Err(FrostwachtError::config(
                "Provider timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.provider.max_retries > 10 {
            return Err(FrostwachtError::config("Provider max retries cannot exceed 10").into());
        }

        if self.provider.forecast_days == 0 || self.provider.forecast_days > 16 {
            return Err(
                FrostwachtError::config("Forecast horizon must be between 1 and 16 days").into(),
            );
        }

        if self.cache.ttl_minutes == 0 || self.cache.ttl_minutes > 24 * 60 {
            return Err(FrostwachtError::config(
                "Cache TTL must be between 1 minute and 24 hours",
            )
            .into());
        }

        if self.notifications.poll_interval_minutes == 0 {
            return Err(
                FrostwachtError::config("Poll interval must be at least 1 minute").into(),
            );
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FrostwachtError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for url in [
            &self.provider.weather_base_url,
            &self.provider.geocoding_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FrostwachtError::config(
                    "Provider base URLs must be valid HTTP or HTTPS URLs",
                )
                .into());
            }
        }

        Ok(())
    }
}
