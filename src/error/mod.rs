//! Error handling for chatwire.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Stream Errors**: the conditions that end a decode
//! - **Config Errors**: invalid settings from code or environment
//!
//! Recoverable stream conditions (invalid UTF-8, malformed frames,
//! malformed chunk payloads) are absorbed by the decoder and logged; they
//! never show up as values of these types.
//!
//! | Error | Category | Retryable |
//! |-------|----------|-----------|
//! | `StreamError::Request` | Network | Yes |
//! | `StreamError::Transport` | Network | Yes |
//! | `StreamError::HttpStatus` (5xx, 408, 429) | Server | Yes |
//! | `StreamError::HttpStatus` (other) | Protocol | No |
//! | `StreamError::BufferOverflow` | Protocol | No |
//! | `ConfigError` | Configuration | No |

mod category;
mod config;
mod result;
mod stream;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use result::StreamResult;
pub use stream::StreamError;
