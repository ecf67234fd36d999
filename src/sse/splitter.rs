//! Blank-line frame splitting over accumulated text.
//!
//! An SSE frame ends at the first blank line, i.e. a line break followed
//! directly by another line break. Both `\n` and `\r\n` count as a line
//! break, so `\n\n`, `\r\n\r\n` and the mixed forms all delimit a frame.

use crate::config::DEFAULT_MAX_BUFFER_BYTES;
use crate::error::StreamError;

/// Buffers decoded text and hands out complete frames.
#[derive(Debug)]
pub struct FrameSplitter {
    /// Text received but not yet resolved into a complete frame
    pending: String,
    /// Offset in `pending` where the next delimiter scan resumes
    scan_from: usize,
    /// Largest `pending` the splitter tolerates without a delimiter
    max_buffer_bytes: usize,
}

impl Default for FrameSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUFFER_BYTES)
    }
}

impl FrameSplitter {
    /// Create a splitter that overflows once more than `max_buffer_bytes`
    /// of unterminated text is pending.
    pub fn new(max_buffer_bytes: usize) -> Self {
        Self {
            pending: String::new(),
            scan_from: 0,
            max_buffer_bytes,
        }
    }

    /// Append `text` and return every frame it completed, in stream order.
    ///
    /// The returned frames exclude their delimiter. Empty frames (runs of
    /// blank lines) are not returned.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.pending.push_str(text);

        let mut frames = Vec::new();
        let mut start = 0;
        let mut cursor = self.scan_from;

        while let Some((frame_end, next)) = find_delimiter(&self.pending, cursor) {
            if frame_end > start {
                frames.push(self.pending[start..frame_end].to_string());
            }
            start = next;
            cursor = next;
        }

        if start > 0 {
            self.pending.drain(..start);
        }
        // A delimiter may still complete across the last two bytes
        self.scan_from = self.pending.len().saturating_sub(2);

        frames
    }

    /// Fail if the unterminated remainder has grown past the bound.
    pub fn check_bound(&self) -> Result<(), StreamError> {
        if self.pending.len() > self.max_buffer_bytes {
            return Err(StreamError::BufferOverflow {
                limit: self.max_buffer_bytes,
                buffered: self.pending.len(),
            });
        }
        Ok(())
    }

    /// Text not yet part of a complete frame.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Length in bytes of the pending text.
    pub fn buffered_len(&self) -> usize {
        self.pending.len()
    }

    /// Configured bound on pending text.
    pub fn max_buffer_bytes(&self) -> usize {
        self.max_buffer_bytes
    }

    /// Take the unterminated remainder at end-of-stream.
    ///
    /// Returns `None` when nothing but whitespace is left.
    pub fn take_remainder(&mut self) -> Option<String> {
        self.scan_from = 0;
        let remainder = std::mem::take(&mut self.pending);
        if remainder.trim().is_empty() {
            None
        } else {
            Some(remainder)
        }
    }
}

/// Find the first blank-line delimiter at or after `from`.
///
/// Returns `(frame_end, next)` where `frame_end` is where the frame text
/// stops and `next` is the first byte after the delimiter.
fn find_delimiter(buf: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = buf.as_bytes();
    let mut i = from;

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let mut j = i + 1;
            if j < bytes.len() && bytes[j] == b'\r' {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'\n' {
                let frame_end = if i > 0 && bytes[i - 1] == b'\r' { i - 1 } else { i };
                return Some((frame_end, j + 1));
            }
        }
        i += 1;
    }

    None
}
