//! Mock implementations for testing.
//!
//! Enables decoder and client tests without network access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - transport with scripted response bodies
//! - [`stream`] helpers - build byte sources with exact chunk boundaries

pub mod http;
pub mod stream;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use stream::{byte_stream, chunks_of, failing_stream, split_at, stalled_stream, DropCounter};
