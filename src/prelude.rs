//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use chatwire::prelude::*;
//! ```
//!
//! This will import:
//! - The decode entry points and their handle types
//! - The sink trait and the ready-made sinks
//! - The client, its request model and configuration
//! - Error types

// Decoding
pub use crate::decoder::{
    decode, decode_with_cancel, CancelHandle, CancelToken, DecodeHandle, DecodeOutcome,
    StreamDecoder,
};

// Sinks
pub use crate::adapters::{Callbacks, ChannelSink, ReplyBuffer, StreamUpdate};
pub use crate::traits::{ByteStream, Completion, HttpClient, StreamSink};

// Client
pub use crate::client::ChatClient;
pub use crate::config::{ClientConfig, DecoderConfig};
pub use crate::models::{ChatMessage, ChatRequest, Role};

// Errors
pub use crate::error::{ConfigError, StreamError, StreamResult};
