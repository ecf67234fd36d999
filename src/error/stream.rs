//! Streaming-related error types.
//!
//! Only conditions that end a decode are represented here. Per-character
//! encoding problems, malformed frames and malformed chunk payloads are
//! absorbed by the decoder and never surface as errors.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Terminal failures of a chat stream.
#[derive(Debug, Clone)]
pub enum StreamError {
    /// The stream could not be opened (connect failure, timeout, ...).
    Request(HttpError),

    /// The server answered with a non-success status.
    HttpStatus {
        status: u16,
        message: String,
    },

    /// The byte source failed after the stream was opened.
    Transport(HttpError),

    /// The sender produced more unterminated frame text than allowed.
    BufferOverflow {
        limit: usize,
        buffered: usize,
    },

    /// The chat request could not be encoded.
    InvalidRequest {
        message: String,
    },
}

impl StreamError {
    /// Classify an error returned while opening the stream.
    pub fn from_open(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => StreamError::HttpStatus { status, message },
            other => StreamError::Request(other),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StreamError::Request(_) | StreamError::Transport(_) => ErrorCategory::Network,
            StreamError::HttpStatus { status, .. } => {
                if *status >= 500 || *status == 429 || *status == 408 {
                    ErrorCategory::Server
                } else {
                    ErrorCategory::Protocol
                }
            }
            StreamError::BufferOverflow { .. } => ErrorCategory::Protocol,
            StreamError::InvalidRequest { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is likely transient and the request can be sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamError::Request(HttpError::Cancelled) => false,
            _ => self.category().is_retryable(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Request(_) => {
                "Unable to reach the assistant. Please check your connection.".to_string()
            }
            StreamError::HttpStatus { status, .. } => match *status {
                400 => "The assistant rejected the request.".to_string(),
                404 => "The assistant endpoint was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The assistant is experiencing issues. Please try again later.".to_string(),
                _ => format!("The assistant returned an error (HTTP {}).", status),
            },
            StreamError::Transport(_) => {
                "The connection dropped before the reply finished. The reply is incomplete."
                    .to_string()
            }
            StreamError::BufferOverflow { .. } => {
                "The assistant sent a malformed stream. The reply is incomplete.".to_string()
            }
            StreamError::InvalidRequest { message } => {
                format!("The chat request could not be sent: {}", message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Request(_) => "E_STREAM_REQUEST",
            StreamError::HttpStatus { .. } => "E_STREAM_STATUS",
            StreamError::Transport(_) => "E_STREAM_TRANSPORT",
            StreamError::BufferOverflow { .. } => "E_STREAM_OVERFLOW",
            StreamError::InvalidRequest { .. } => "E_STREAM_REQUEST_BODY",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Request(err) => write!(f, "Failed to open stream: {}", err),
            StreamError::HttpStatus { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            StreamError::Transport(err) => write!(f, "Stream transport failed: {}", err),
            StreamError::BufferOverflow { limit, buffered } => write!(
                f,
                "Stream buffer overflow: {} bytes pending without a frame delimiter (limit {})",
                buffered, limit
            ),
            StreamError::InvalidRequest { message } => {
                write!(f, "Invalid chat request: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Request(err) | StreamError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(e: serde_json::Error) -> Self {
        StreamError::InvalidRequest {
            message: e.to_string(),
        }
    }
}
