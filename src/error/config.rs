//! Configuration errors.

use thiserror::Error;

use super::category::ErrorCategory;

/// Invalid configuration values, usually from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable that must be a number was not.
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: String, value: String },

    /// The stream buffer bound must leave room for at least one frame.
    #[error("stream buffer limit must be greater than zero")]
    ZeroBufferLimit,

    /// The base URL is not an http(s) URL.
    #[error("base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

impl ConfigError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidNumber { .. } => "E_CONFIG_NUMBER",
            ConfigError::ZeroBufferLimit => "E_CONFIG_BUFFER",
            ConfigError::InvalidBaseUrl(_) => "E_CONFIG_URL",
        }
    }
}
