//! Common test utilities for integration tests.
//!
//! Builders for SSE wire text and a helper that decodes a scripted chunk
//! sequence into a [`ReplyBuffer`].
//!
//! # Example
//!
//! ```ignore
//! use common::{decode_chunks, sse_chunk, sse_done};
//!
//! let wire = format!("{}{}", sse_chunk("hi"), sse_done());
//! let (outcome, reply) = decode_chunks(vec![wire.into()]).await;
//! ```

#![allow(dead_code)]

use bytes::Bytes;
use chatwire::adapters::mock::byte_stream;
use chatwire::adapters::ReplyBuffer;
use chatwire::config::DecoderConfig;
use chatwire::decoder::{decode_with_cancel, CancelHandle, DecodeOutcome};
use chatwire::error::StreamResult;

/// Wire text for one `chunk` event carrying `text`.
pub fn sse_chunk(text: &str) -> String {
    format!(
        "event: chunk\ndata: {}\n\n",
        serde_json::json!({ "text": text })
    )
}

/// Wire text for a `done` event.
pub fn sse_done() -> String {
    "event: done\ndata: {}\n\n".to_string()
}

/// Wire text for an `error` event.
pub fn sse_error(message: &str) -> String {
    format!(
        "event: error\ndata: {}\n\n",
        serde_json::json!({ "error": message })
    )
}

/// A complete reply whose text contains multi-byte characters.
pub fn multibyte_reply() -> (String, &'static str) {
    let parts = ["Grüße, ", "世界", " 🚀", "!"];
    let wire: String = parts.iter().map(|p| sse_chunk(p)).collect::<String>() + &sse_done();
    (wire, "Grüße, 世界 🚀!")
}

/// Decode `chunks` with the default config.
pub async fn decode_chunks(chunks: Vec<Bytes>) -> (StreamResult<DecodeOutcome>, ReplyBuffer) {
    decode_chunks_with(chunks, DecoderConfig::default()).await
}

/// Decode `chunks` with a custom config.
pub async fn decode_chunks_with(
    chunks: Vec<Bytes>,
    config: DecoderConfig,
) -> (StreamResult<DecodeOutcome>, ReplyBuffer) {
    let mut reply = ReplyBuffer::new();
    let cancel = CancelHandle::new();
    let result = decode_with_cancel(byte_stream(chunks), &mut reply, config, cancel.token()).await;
    (result, reply)
}
