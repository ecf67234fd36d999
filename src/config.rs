//! Decoder and client configuration.
//!
//! Both configs use the builder pattern:
//!
//! ```
//! use chatwire::config::{ClientConfig, DecoderConfig};
//!
//! let decoder = DecoderConfig::new().with_max_buffer_bytes(64 * 1024);
//! let client = ClientConfig::new()
//!     .with_base_url("http://localhost:9000")
//!     .with_max_buffer_bytes(decoder.max_buffer_bytes);
//! assert_eq!(client.chat_url(), "http://localhost:9000/api/chat");
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Default bound on unterminated buffered text (1 MiB).
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 1024 * 1024;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default path of the streaming chat endpoint.
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable overriding the backend address.
pub const ENV_URL: &str = "CHATWIRE_URL";
/// Environment variable overriding the buffer bound, in bytes.
pub const ENV_MAX_BUFFER: &str = "CHATWIRE_MAX_BUFFER";
/// Environment variable overriding the connect timeout, in seconds.
pub const ENV_CONNECT_TIMEOUT: &str = "CHATWIRE_CONNECT_TIMEOUT_SECS";

/// Settings for a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Largest unterminated frame text held before the decode fails
    pub max_buffer_bytes: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
        }
    }
}

impl DecoderConfig {
    /// Create a DecoderConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer bound.
    pub fn with_max_buffer_bytes(mut self, bytes: usize) -> Self {
        self.max_buffer_bytes = bytes;
        self
    }

    /// Reject settings that could never decode a frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_buffer_bytes == 0 {
            return Err(ConfigError::ZeroBufferLimit);
        }
        Ok(())
    }
}

/// Settings for [`ChatClient`](crate::client::ChatClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend address, without a trailing slash
    pub base_url: String,
    /// Path of the streaming chat endpoint
    pub chat_path: String,
    /// Buffer bound passed to each decode
    pub max_buffer_bytes: usize,
    /// Connect timeout for the HTTP transport
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults overridden by `CHATWIRE_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_URL) {
            config = config.with_base_url(url);
        }
        if let Some(bytes) = env_number(ENV_MAX_BUFFER)? {
            config.max_buffer_bytes = bytes as usize;
        }
        if let Some(secs) = env_number(ENV_CONNECT_TIMEOUT)? {
            config.connect_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the backend address. A trailing slash is removed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the chat endpoint path.
    pub fn with_chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = path.into();
        self
    }

    /// Set the buffer bound.
    pub fn with_max_buffer_bytes(mut self, bytes: usize) -> Self {
        self.max_buffer_bytes = bytes;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        if self.chat_path.starts_with('/') {
            format!("{}{}", self.base_url, self.chat_path)
        } else {
            format!("{}/{}", self.base_url, self.chat_path)
        }
    }

    /// Decoder settings derived from this config.
    pub fn decoder(&self) -> DecoderConfig {
        DecoderConfig::new().with_max_buffer_bytes(self.max_buffer_bytes)
    }

    /// Check the base URL scheme and the buffer bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        self.decoder().validate()
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_number(var: &str) -> Result<Option<u64>, ConfigError> {
    match env_value(var) {
        None => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                var: var.to_string(),
                value,
            }),
    }
}
