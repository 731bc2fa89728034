//! Error types and handling for the `Frostwacht` weather advisory engine

use thiserror::Error;

/// Main error type for the `Frostwacht` library
#[derive(Error, Debug)]
pub enum FrostwachtError {
    /// Input validation errors (bad coordinates, too-short address)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Weather or geocoding provider did not answer within the timeout
    #[error("Provider timeout: {message}")]
    ProviderTimeout { message: String },

    /// Provider answered but returned no usable data
    #[error("Provider returned no data: {message}")]
    ProviderEmptyResult { message: String },

    /// API communication errors (network failures, bad responses)
    #[error("API error: {message}")]
    Api { message: String },

    /// Weather cache errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Best-effort storage errors (never surfaced to callers directly)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl FrostwachtError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new provider timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::ProviderTimeout {
            message: message.into(),
        }
    }

    /// Create a new empty-result error
    pub fn empty_result<S: Into<String>>(message: S) -> Self {
        Self::ProviderEmptyResult {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FrostwachtError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            FrostwachtError::ProviderTimeout { .. } => {
                "The weather service took too long to respond. Please try again in a moment."
                    .to_string()
            }
            FrostwachtError::ProviderEmptyResult { .. } => {
                "The weather service returned no data for this location.".to_string()
            }
            FrostwachtError::Api { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
            FrostwachtError::Cache { .. } => "Weather cache operation failed.".to_string(),
            FrostwachtError::Storage { .. } => {
                "Local storage is unavailable. Data will not be persisted.".to_string()
            }
            FrostwachtError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FrostwachtError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            FrostwachtError::General { message } => message.clone(),
        }
    }
}
