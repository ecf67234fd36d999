//! Consumer-side trait for decoded stream signals.
//!
//! The decoder reports exactly two kinds of signal to its consumer: an
//! incremental text fragment and a single completion. Implement
//! [`StreamSink`] to receive them, or use one of the ready-made sinks in
//! `crate::adapters`.

use crate::sse::payloads::parse_error_message;

/// How the stream finished, as seen by the completion callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The backend sent `event: done`
    Done {
        /// Raw `data` payload, if any (diagnostics only)
        detail: Option<String>,
    },
    /// The backend sent `event: error`
    Error {
        /// Raw `data` payload, if any (diagnostics only)
        detail: Option<String>,
    },
}

impl Completion {
    /// Whether the backend reported an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Completion::Error { .. })
    }

    /// Raw diagnostic payload.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Completion::Done { detail } | Completion::Error { detail } => detail.as_deref(),
        }
    }

    /// Human-readable error message for an error completion.
    ///
    /// Uses the `error` (or `message`) field of a JSON payload, falling back
    /// to the raw payload text. Always `None` for `Done`.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Completion::Done { .. } => None,
            Completion::Error { detail } => {
                let detail = detail.as_deref()?;
                parse_error_message(detail).or_else(|| Some(detail.to_string()))
            }
        }
    }
}

/// Receiver of decoded stream signals.
///
/// Callbacks are invoked in stream order from the decode loop. `on_done` is
/// called at most once and nothing is called after it.
///
/// # Example
///
/// ```
/// use chatwire::traits::{Completion, StreamSink};
///
/// struct Printer;
///
/// impl StreamSink for Printer {
///     fn on_chunk(&mut self, text: &str) {
///         print!("{}", text);
///     }
///
///     fn on_done(&mut self, completion: Completion) {
///         if let Some(message) = completion.error_message() {
///             eprintln!("assistant error: {}", message);
///         }
///     }
/// }
/// ```
pub trait StreamSink: Send {
    /// An incremental text fragment arrived.
    fn on_chunk(&mut self, text: &str);

    /// The stream reached a `done` or `error` record.
    fn on_done(&mut self, completion: Completion);
}

impl<S: StreamSink + ?Sized> StreamSink for Box<S> {
    fn on_chunk(&mut self, text: &str) {
        (**self).on_chunk(text)
    }

    fn on_done(&mut self, completion: Completion) {
        (**self).on_done(completion)
    }
}

impl<S: StreamSink + ?Sized> StreamSink for &mut S {
    fn on_chunk(&mut self, text: &str) {
        (**self).on_chunk(text)
    }

    fn on_done(&mut self, completion: Completion) {
        (**self).on_done(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_message_from_json() {
        let completion = Completion::Error {
            detail: Some(r#"{"error":"model overloaded"}"#.to_string()),
        };
        assert!(completion.is_error());
        assert_eq!(
            completion.error_message(),
            Some("model overloaded".to_string())
        );
    }

    #[test]
    fn test_completion_error_message_falls_back_to_raw() {
        let completion = Completion::Error {
            detail: Some("upstream closed".to_string()),
        };
        assert_eq!(completion.error_message(), Some("upstream closed".to_string()));

        let bare = Completion::Error { detail: None };
        assert_eq!(bare.error_message(), None);
    }

    #[test]
    fn test_done_has_no_error_message() {
        let completion = Completion::Done {
            detail: Some("{}".to_string()),
        };
        assert!(!completion.is_error());
        assert_eq!(completion.detail(), Some("{}"));
        assert_eq!(completion.error_message(), None);
    }
}
