//! SSE line and event record types
//!
//! Contains the per-line classification used while parsing a frame and the
//! `EventRecord` produced for each complete frame.

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: chunk")
    Event(String),
    /// Data payload (e.g., "data: {\"text\": \"hello\"}")
    Data(String),
    /// Empty line
    Empty,
    /// Comment line (starts with ':')
    Comment(String),
    /// A `label: value` line with a label this stream does not use
    Other { label: String, value: String },
    /// A line with no `:` at all
    Malformed(String),
}

impl SseLine {
    /// Whether this line carries one of the recognized fields.
    pub fn is_recognized(&self) -> bool {
        matches!(self, SseLine::Event(_) | SseLine::Data(_))
    }
}

/// Recognized values of the `event` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Incremental text fragment
    Chunk,
    /// Stream completed successfully
    Done,
    /// Stream ended with a backend error
    Error,
}

impl EventKind {
    /// Map an `event` field value to a kind, `None` if unrecognized.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "chunk" => Some(EventKind::Chunk),
            "done" => Some(EventKind::Done),
            "error" => Some(EventKind::Error),
            _ => None,
        }
    }

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Chunk => "chunk",
            EventKind::Done => "done",
            EventKind::Error => "error",
        }
    }
}

/// The parsed result of one frame.
///
/// Payloads are kept as raw text; decoding the `chunk` payload is the
/// dispatcher's job so that a malformed payload only skips that chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum EventRecord {
    /// `event: chunk`, with the `data` field if present
    Chunk { data: Option<String> },
    /// `event: done`, with an optional diagnostic payload
    Done { detail: Option<String> },
    /// `event: error`, with an optional diagnostic payload
    Error { detail: Option<String> },
    /// Unrecognized or missing event kind
    Unknown { event: Option<String> },
}

impl EventRecord {
    /// Returns the event type name as a string for debugging purposes.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            EventRecord::Chunk { .. } => "chunk",
            EventRecord::Done { .. } => "done",
            EventRecord::Error { .. } => "error",
            EventRecord::Unknown { .. } => "unknown",
        }
    }

    /// Whether this record ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventRecord::Done { .. } | EventRecord::Error { .. })
    }
}
