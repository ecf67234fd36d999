//! The decode loop.
//!
//! [`StreamDecoder`] wires the stages together for one stream:
//!
//! ```text
//! ByteStream -> TextAccumulator -> FrameSplitter -> parse_frame -> EventDispatcher -> StreamSink
//! ```
//!
//! [`decode`] runs a decoder over a [`ByteStream`] on its own tokio task and
//! returns a [`DecodeHandle`] for cancellation and joining.
//! [`decode_with_cancel`] runs the same loop on the current task.

use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::DecoderConfig;
use crate::error::{StreamError, StreamResult};
use crate::sse::{
    has_recognized_field, parse_frame, DispatchState, DispatchStats, EndReason, EventDispatcher,
    FrameSplitter, TextAccumulator,
};
use crate::traits::{ByteStream, StreamSink};

/// How a decode ended without a terminal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The backend sent `event: done`
    Completed,
    /// The backend sent `event: error`
    Failed,
    /// The byte source ended before any terminal record
    Exhausted,
    /// The consumer cancelled the decode
    Cancelled,
}

impl DecodeOutcome {
    /// Whether the completion callback fired.
    pub fn reached_completion(&self) -> bool {
        matches!(self, DecodeOutcome::Completed | DecodeOutcome::Failed)
    }

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeOutcome::Completed => "completed",
            DecodeOutcome::Failed => "failed",
            DecodeOutcome::Exhausted => "exhausted",
            DecodeOutcome::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DecodeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests cancellation of one or more decodes.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

/// Observes a [`CancelHandle`].
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelHandle {
    /// Create a handle in the not-cancelled state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// A token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested.
    ///
    /// Never resolves if every [`CancelHandle`] is dropped first.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Per-stream decoder state.
///
/// Feeding is synchronous; the async loop in [`decode_with_cancel`] only
/// adds the reads and cancellation around it.
#[derive(Debug)]
pub struct StreamDecoder<S> {
    text: TextAccumulator,
    splitter: FrameSplitter,
    dispatcher: EventDispatcher<S>,
}

impl<S: StreamSink> StreamDecoder<S> {
    /// Create a decoder delivering to `sink`.
    pub fn new(sink: S, config: DecoderConfig) -> Self {
        Self {
            text: TextAccumulator::new(),
            splitter: FrameSplitter::new(config.max_buffer_bytes),
            dispatcher: EventDispatcher::new(sink),
        }
    }

    /// Feed one chunk, dispatching every frame it completes.
    ///
    /// Returns `Some(outcome)` once a terminal record has been dispatched.
    /// Fails with `BufferOverflow` if the unterminated remainder exceeds the
    /// configured bound after dispatch.
    pub fn feed(&mut self, chunk: &[u8]) -> StreamResult<Option<DecodeOutcome>> {
        self.feed_with(chunk, || false)
    }

    /// Signal end-of-stream and resolve the final outcome.
    ///
    /// A trailing unterminated frame is dispatched if it carries an `event`
    /// or `data` field, and discarded otherwise. The completion callback is
    /// not invoked when no terminal record was seen.
    pub fn finish(&mut self) -> DecodeOutcome {
        self.finish_with(|| false)
    }

    fn feed_with(
        &mut self,
        chunk: &[u8],
        is_cancelled: impl Fn() -> bool,
    ) -> StreamResult<Option<DecodeOutcome>> {
        if let Some(outcome) = self.outcome() {
            return Ok(Some(outcome));
        }
        // A previous overflow leaves the buffer over the bound
        self.splitter.check_bound()?;

        let text = self.text.push(chunk);
        let frames = self.splitter.push(&text);
        if let Some(outcome) = self.dispatch_frames(frames, &is_cancelled) {
            return Ok(Some(outcome));
        }

        self.splitter.check_bound()?;
        Ok(None)
    }

    fn finish_with(&mut self, is_cancelled: impl Fn() -> bool) -> DecodeOutcome {
        if let Some(outcome) = self.outcome() {
            return outcome;
        }

        if let Some(tail) = self.text.finish() {
            tracing::debug!("Stream ended inside a UTF-8 sequence");
            let frames = self.splitter.push(&tail);
            if let Some(outcome) = self.dispatch_frames(frames, &is_cancelled) {
                return outcome;
            }
        }

        if let Some(remainder) = self.splitter.take_remainder() {
            if !has_recognized_field(&remainder) {
                tracing::debug!(
                    bytes = remainder.len(),
                    "Discarding unterminated remainder at end of stream"
                );
            } else if is_cancelled() {
                return DecodeOutcome::Cancelled;
            } else {
                tracing::debug!(
                    bytes = remainder.len(),
                    "Dispatching unterminated final frame"
                );
                self.dispatcher.dispatch(parse_frame(&remainder));
            }
        }

        self.dispatcher.end_of_stream();
        self.outcome().unwrap_or(DecodeOutcome::Exhausted)
    }

    fn dispatch_frames(
        &mut self,
        frames: Vec<String>,
        is_cancelled: &impl Fn() -> bool,
    ) -> Option<DecodeOutcome> {
        for frame in frames {
            if is_cancelled() {
                return Some(DecodeOutcome::Cancelled);
            }
            if self.dispatcher.dispatch(parse_frame(&frame)) == DispatchState::Done {
                return self.outcome();
            }
        }
        None
    }

    /// Outcome once the dispatcher is done, `None` while streaming.
    pub fn outcome(&self) -> Option<DecodeOutcome> {
        self.dispatcher.end_reason().map(|reason| match reason {
            EndReason::DoneRecord => DecodeOutcome::Completed,
            EndReason::ErrorRecord => DecodeOutcome::Failed,
            EndReason::EndOfStream => DecodeOutcome::Exhausted,
        })
    }

    /// Dispatcher state.
    pub fn state(&self) -> DispatchState {
        self.dispatcher.state()
    }

    /// Bytes of text waiting for a frame delimiter.
    pub fn buffered_len(&self) -> usize {
        self.splitter.buffered_len()
    }

    /// Diagnostic counters.
    pub fn stats(&self) -> DispatchStats {
        self.dispatcher.stats()
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        self.dispatcher.sink()
    }

    /// Recover the sink.
    pub fn into_sink(self) -> S {
        self.dispatcher.into_sink()
    }
}

/// A decode running on its own task.
#[derive(Debug)]
pub struct DecodeHandle {
    stream_id: Uuid,
    cancel: CancelHandle,
    task: JoinHandle<StreamResult<DecodeOutcome>>,
}

impl DecodeHandle {
    /// Request cancellation. No sink callback fires after the task observes it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A cloneable handle for cancelling from elsewhere (e.g. a signal handler).
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Identifier attached to this decode's log span.
    pub fn stream_id(&self) -> Uuid {
        self.stream_id
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the decode to end.
    ///
    /// A panic inside a sink callback is resumed on the caller.
    pub async fn join(self) -> StreamResult<DecodeOutcome> {
        match self.task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Ok(DecodeOutcome::Cancelled),
        }
    }
}

/// Spawn a decode of `source` into `sink` on the tokio runtime.
///
/// Dropping the returned handle detaches the task; it keeps running until
/// the stream ends.
///
/// # Example
///
/// ```ignore
/// use chatwire::adapters::ReplyBuffer;
/// use chatwire::config::DecoderConfig;
/// use chatwire::decoder::decode;
///
/// let handle = decode(source, ReplyBuffer::new(), DecoderConfig::default());
/// let outcome = handle.join().await?;
/// ```
pub fn decode<S>(source: ByteStream, sink: S, config: DecoderConfig) -> DecodeHandle
where
    S: StreamSink + 'static,
{
    let stream_id = Uuid::new_v4();
    let cancel = CancelHandle::new();
    let token = cancel.token();

    let span = tracing::info_span!("decode", %stream_id);
    let task = tokio::spawn(run(source, sink, config, token).instrument(span));

    DecodeHandle {
        stream_id,
        cancel,
        task,
    }
}

/// Decode `source` into `sink` on the current task until it ends, fails or
/// `token` is cancelled.
///
/// The source is dropped before this returns, releasing the connection.
pub async fn decode_with_cancel<S>(
    source: ByteStream,
    sink: S,
    config: DecoderConfig,
    token: CancelToken,
) -> StreamResult<DecodeOutcome>
where
    S: StreamSink,
{
    let stream_id = Uuid::new_v4();
    run(source, sink, config, token)
        .instrument(tracing::info_span!("decode", %stream_id))
        .await
}

async fn run<S: StreamSink>(
    mut source: ByteStream,
    sink: S,
    config: DecoderConfig,
    token: CancelToken,
) -> StreamResult<DecodeOutcome> {
    let mut decoder = StreamDecoder::new(sink, config);
    let is_cancelled = || token.is_cancelled();
    tracing::debug!(max_buffer_bytes = config.max_buffer_bytes, "Decode started");

    let result = loop {
        let item = tokio::select! {
            biased;
            _ = token.cancelled() => break Ok(DecodeOutcome::Cancelled),
            item = source.next() => item,
        };

        match item {
            Some(Ok(chunk)) => match decoder.feed_with(&chunk, is_cancelled) {
                Ok(Some(outcome)) => break Ok(outcome),
                Ok(None) => {}
                Err(e) => break Err(e),
            },
            Some(Err(e)) => break Err(StreamError::Transport(e)),
            None => break Ok(decoder.finish_with(is_cancelled)),
        }
    };
    drop(source);

    let stats = decoder.stats();
    match &result {
        Ok(outcome) => tracing::debug!(
            outcome = outcome.as_str(),
            chunks = stats.chunks,
            malformed = stats.malformed_chunks,
            "Decode finished"
        ),
        Err(e) => tracing::warn!(
            code = e.error_code(),
            chunks = stats.chunks,
            "Decode failed: {}",
            e
        ),
    }
    result
}
