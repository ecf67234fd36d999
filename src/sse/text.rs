//! Incremental UTF-8 decoding for the SSE byte stream.
//!
//! Transport chunks carry no character boundaries, so a multi-byte
//! character can arrive split across two reads. `TextAccumulator` keeps the
//! unfinished tail of one chunk and prefixes it onto the next.

/// Substituted for bytes that can never form valid UTF-8.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Stateful bytes-to-text decoder.
///
/// # Example
///
/// ```
/// use chatwire::sse::TextAccumulator;
///
/// let mut text = TextAccumulator::new();
/// // "é" is 0xC3 0xA9; split it across two chunks
/// assert_eq!(text.push(b"caf\xC3"), "caf");
/// assert_eq!(text.push(b"\xA9!"), "é!");
/// assert_eq!(text.finish(), None);
/// ```
#[derive(Debug, Default)]
pub struct TextAccumulator {
    /// Bytes of an incomplete trailing character (never more than 3)
    tail: Vec<u8>,
}

impl TextAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that can be resolved so far.
    ///
    /// Invalid sequences are replaced with [`REPLACEMENT`]; an incomplete
    /// sequence at the end of the chunk is held back for the next call.
    pub fn push(&mut self, chunk: &[u8]) -> String {
        if self.tail.is_empty() {
            return self.decode(chunk);
        }

        let mut joined = std::mem::take(&mut self.tail);
        joined.extend_from_slice(chunk);
        self.decode(&joined)
    }

    /// Signal end-of-stream.
    ///
    /// Returns a single replacement character if a truncated character was
    /// still pending, `None` otherwise.
    pub fn finish(&mut self) -> Option<String> {
        if self.tail.is_empty() {
            return None;
        }
        self.tail.clear();
        Some(REPLACEMENT.to_string())
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_bytes(&self) -> usize {
        self.tail.len()
    }

    fn decode(&mut self, mut bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());

        loop {
            match std::str::from_utf8(bytes) {
                Ok(valid) => {
                    out.push_str(valid);
                    return out;
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // `valid_up_to` marks an already verified prefix
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match err.error_len() {
                        Some(bad) => {
                            out.push(REPLACEMENT);
                            bytes = &rest[bad..];
                        }
                        None => {
                            // Incomplete character at the very end
                            self.tail.extend_from_slice(rest);
                            return out;
                        }
                    }
                }
            }
        }
    }
}
