//! SSE (Server-Sent Events) stream decoding
//!
//! SSE format consists of:
//! - `event: <type>` - event type line
//! - `data: <json>` - data payload line
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `text` - incremental UTF-8 decoding (TextAccumulator)
//! - `splitter` - blank-line frame extraction (FrameSplitter)
//! - `events` - line and record types (SseLine, EventRecord)
//! - `parser` - frame parsing (parse_frame, parse_sse_line)
//! - `payloads` - internal payload deserialization structs
//! - `dispatcher` - record to sink dispatch (EventDispatcher)

mod dispatcher;
mod events;
mod parser;
pub(crate) mod payloads;
mod splitter;
mod text;

// Re-export public types
pub use dispatcher::{DispatchState, DispatchStats, EndReason, EventDispatcher};
pub use events::{EventKind, EventRecord, SseLine};
pub use parser::{has_recognized_field, parse_frame, parse_sse_line};
pub use splitter::FrameSplitter;
pub use text::{TextAccumulator, REPLACEMENT};
