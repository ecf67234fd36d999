//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming HTTP transport
//! - [`StreamSink`] - consumer of decoded stream signals

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use sink::{Completion, StreamSink};
