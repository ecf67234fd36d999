//! chatwire - incremental decoding of streamed assistant replies
//!
//! A chat backend answers `POST /api/chat` with a server-sent event stream:
//!
//! ```text
//! event: chunk
//! data: {"text": "Hel"}
//!
//! event: chunk
//! data: {"text": "lo"}
//!
//! event: done
//! data: {}
//! ```
//!
//! This crate turns the raw response body into text fragments and a single
//! completion signal as the bytes arrive, regardless of where the transport
//! splits them.
//!
//! - [`sse`] - the decoding stages (UTF-8, frame splitting, parsing, dispatch)
//! - [`decoder`] - the decode loop, cancellation and task handle
//! - [`client`] - the `/api/chat` client
//! - [`adapters`] - transport and sink implementations, plus test mocks

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod traits;
