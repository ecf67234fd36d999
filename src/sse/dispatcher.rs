//! Event dispatch to the stream consumer.
//!
//! Maps each [`EventRecord`] to at most one [`StreamSink`] call and tracks
//! the `Streaming -> Done` transition. `Done` is absorbing: once a terminal
//! record (or end-of-stream) has been seen, every later record is dropped.

use crate::sse::events::EventRecord;
use crate::sse::payloads::parse_chunk_text;
use crate::traits::{Completion, StreamSink};

/// Dispatcher state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Records are being dispatched
    Streaming,
    /// A terminal signal was observed; the dispatcher is inert
    Done,
}

/// Why the dispatcher left `Streaming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// An `event: done` record
    DoneRecord,
    /// An `event: error` record
    ErrorRecord,
    /// The byte source ended without a terminal record
    EndOfStream,
}

/// Counters kept for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// `on_chunk` invocations
    pub chunks: u64,
    /// Chunk records skipped because their payload did not decode
    pub malformed_chunks: u64,
    /// Unknown records and chunk records without data
    pub ignored: u64,
}

/// Routes event records to a sink.
#[derive(Debug)]
pub struct EventDispatcher<S> {
    sink: S,
    state: DispatchState,
    end_reason: Option<EndReason>,
    stats: DispatchStats,
}

impl<S: StreamSink> EventDispatcher<S> {
    /// Create a dispatcher in the `Streaming` state.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: DispatchState::Streaming,
            end_reason: None,
            stats: DispatchStats::default(),
        }
    }

    /// Dispatch one record and return the resulting state.
    pub fn dispatch(&mut self, record: EventRecord) -> DispatchState {
        if self.state == DispatchState::Done {
            tracing::trace!(
                event = record.event_type_name(),
                "Ignoring record after terminal signal"
            );
            return self.state;
        }

        match record {
            EventRecord::Chunk { data: Some(data) } => match parse_chunk_text(&data) {
                Ok(text) => {
                    self.stats.chunks += 1;
                    self.sink.on_chunk(&text);
                }
                Err(e) => {
                    self.stats.malformed_chunks += 1;
                    tracing::warn!("Skipping chunk with malformed payload: {}", e);
                }
            },
            EventRecord::Chunk { data: None } => {
                self.stats.ignored += 1;
                tracing::debug!("Chunk record without data");
            }
            EventRecord::Done { detail } => {
                self.finish(EndReason::DoneRecord);
                self.sink.on_done(Completion::Done { detail });
            }
            EventRecord::Error { detail } => {
                tracing::debug!(detail = ?detail, "Backend reported an error");
                self.finish(EndReason::ErrorRecord);
                self.sink.on_done(Completion::Error { detail });
            }
            EventRecord::Unknown { event } => {
                self.stats.ignored += 1;
                tracing::debug!(event = ?event, "Ignoring unrecognized record");
            }
        }

        self.state
    }

    /// Mark the source as exhausted without notifying the sink.
    ///
    /// Has no effect if a terminal record was already dispatched.
    pub fn end_of_stream(&mut self) {
        if self.state == DispatchState::Streaming {
            self.finish(EndReason::EndOfStream);
        }
    }

    /// Current state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Whether the dispatcher has become inert.
    pub fn is_done(&self) -> bool {
        self.state == DispatchState::Done
    }

    /// Why dispatching ended, `None` while still streaming.
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Diagnostic counters.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Recover the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn finish(&mut self, reason: EndReason) {
        self.state = DispatchState::Done;
        self.end_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ReplyBuffer;

    fn chunk(text: &str) -> EventRecord {
        EventRecord::Chunk {
            data: Some(serde_json::json!({ "text": text }).to_string()),
        }
    }

    #[test]
    fn test_chunks_then_done() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());

        assert_eq!(dispatcher.dispatch(chunk("Hello, ")), DispatchState::Streaming);
        assert_eq!(dispatcher.dispatch(chunk("world!")), DispatchState::Streaming);
        assert_eq!(
            dispatcher.dispatch(EventRecord::Done { detail: None }),
            DispatchState::Done
        );

        assert_eq!(dispatcher.end_reason(), Some(EndReason::DoneRecord));
        let reply = dispatcher.into_sink();
        assert_eq!(reply.text(), "Hello, world!");
        assert_eq!(reply.completion(), Some(&Completion::Done { detail: None }));
        assert_eq!(reply.completions(), 1);
    }

    #[test]
    fn test_records_after_done_are_ignored() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());
        dispatcher.dispatch(EventRecord::Done { detail: None });
        dispatcher.dispatch(chunk("late"));
        dispatcher.dispatch(EventRecord::Done { detail: None });
        dispatcher.dispatch(EventRecord::Error { detail: None });

        let reply = dispatcher.sink();
        assert_eq!(reply.text(), "");
        assert_eq!(reply.completions(), 1);
    }

    #[test]
    fn test_error_is_terminal_and_completes() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());
        dispatcher.dispatch(chunk("partial"));
        let state = dispatcher.dispatch(EventRecord::Error {
            detail: Some(r#"{"error":"rate limited"}"#.to_string()),
        });

        assert_eq!(state, DispatchState::Done);
        assert_eq!(dispatcher.end_reason(), Some(EndReason::ErrorRecord));
        let reply = dispatcher.into_sink();
        assert_eq!(reply.text(), "partial");
        assert_eq!(
            reply.completion().and_then(Completion::error_message),
            Some("rate limited".to_string())
        );
    }

    #[test]
    fn test_malformed_chunk_is_skipped() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());
        dispatcher.dispatch(EventRecord::Chunk {
            data: Some("{not json".to_string()),
        });
        dispatcher.dispatch(chunk("after"));

        assert!(!dispatcher.is_done());
        assert_eq!(dispatcher.stats().malformed_chunks, 1);
        assert_eq!(dispatcher.stats().chunks, 1);
        assert_eq!(dispatcher.sink().text(), "after");
        assert_eq!(dispatcher.sink().completions(), 0);
    }

    #[test]
    fn test_unknown_and_empty_chunk_are_noops() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());
        dispatcher.dispatch(EventRecord::Unknown {
            event: Some("ping".to_string()),
        });
        dispatcher.dispatch(EventRecord::Chunk { data: None });

        assert_eq!(dispatcher.state(), DispatchState::Streaming);
        assert_eq!(dispatcher.stats().ignored, 2);
        assert!(dispatcher.sink().chunks().is_empty());
    }

    #[test]
    fn test_end_of_stream_does_not_complete() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());
        dispatcher.dispatch(chunk("cut"));
        dispatcher.end_of_stream();

        assert!(dispatcher.is_done());
        assert_eq!(dispatcher.end_reason(), Some(EndReason::EndOfStream));
        assert_eq!(dispatcher.sink().completions(), 0);
    }

    #[test]
    fn test_end_of_stream_keeps_earlier_reason() {
        let mut dispatcher = EventDispatcher::new(ReplyBuffer::new());
        dispatcher.dispatch(EventRecord::Done { detail: None });
        dispatcher.end_of_stream();
        assert_eq!(dispatcher.end_reason(), Some(EndReason::DoneRecord));
    }
}
