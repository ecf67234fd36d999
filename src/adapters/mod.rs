//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`Callbacks`], [`ChannelSink`], [`ReplyBuffer`] - stream sinks
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::byte_stream`] and friends - byte sources with exact chunk boundaries

pub mod mock;
pub mod reqwest_http;
pub mod sinks;

pub use mock::MockHttpClient;
pub use reqwest_http::ReqwestHttpClient;
pub use sinks::{Callbacks, ChannelSink, ReplyBuffer, StreamUpdate};
