//! SSE frame parsing logic
//!
//! Turns the text of one complete frame into an [`EventRecord`]. Parsing
//! never fails: anything that cannot be understood becomes
//! [`EventRecord::Unknown`], which the dispatcher ignores.

use crate::sse::events::{EventKind, EventRecord, SseLine};

/// Parse a single SSE line into its component type
///
/// The line is trimmed first. `label: value` is split on the first `:` only,
/// so JSON payloads containing colons survive intact.
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim();
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    let Some((label, value)) = line.split_once(':') else {
        return SseLine::Malformed(line.to_string());
    };

    let label = label.trim();
    let value = value.trim().to_string();
    match label {
        "event" => SseLine::Event(value),
        "data" => SseLine::Data(value),
        _ => SseLine::Other {
            label: label.to_string(),
            value,
        },
    }
}

/// Parse one frame (without its delimiter) into an event record
///
/// The last `event` and the last `data` line win. Frames are expected to use
/// `\n` or `\r\n` between lines.
pub fn parse_frame(frame: &str) -> EventRecord {
    let mut event: Option<String> = None;
    let mut data: Option<String> = None;

    for line in frame.lines() {
        match parse_sse_line(line) {
            SseLine::Event(value) => event = Some(value),
            SseLine::Data(value) => data = Some(value),
            SseLine::Empty
            | SseLine::Comment(_)
            | SseLine::Other { .. }
            | SseLine::Malformed(_) => {}
        }
    }

    match event.as_deref().and_then(EventKind::from_label) {
        Some(EventKind::Chunk) => EventRecord::Chunk { data },
        Some(EventKind::Done) => EventRecord::Done { detail: data },
        Some(EventKind::Error) => EventRecord::Error { detail: data },
        None => EventRecord::Unknown { event },
    }
}

/// Whether `text` contains at least one `event:` or `data:` line
///
/// Used to decide if an unterminated remainder at end-of-stream is worth a
/// best-effort parse.
pub fn has_recognized_field(text: &str) -> bool {
    text.lines().any(|line| parse_sse_line(line).is_recognized())
}
