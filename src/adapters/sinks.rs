//! Ready-made [`StreamSink`] implementations.
//!
//! - [`Callbacks`] - a pair of closures, one per signal
//! - [`ChannelSink`] - forwards [`StreamUpdate`] messages over a tokio channel
//! - [`ReplyBuffer`] - collects the whole assistant reply in memory

use tokio::sync::mpsc;

use crate::traits::{Completion, StreamSink};

/// Sink built from two closures.
///
/// # Example
///
/// ```
/// use chatwire::adapters::Callbacks;
///
/// let mut reply = String::new();
/// let sink = Callbacks::new(
///     move |text: &str| reply.push_str(text),
///     |completion| println!("finished: {:?}", completion),
/// );
/// # let _ = sink;
/// ```
pub struct Callbacks<C, D> {
    on_chunk: C,
    on_done: D,
}

impl<C, D> Callbacks<C, D>
where
    C: FnMut(&str) + Send,
    D: FnMut(Completion) + Send,
{
    /// Wrap the incremental-text and completion callbacks.
    pub fn new(on_chunk: C, on_done: D) -> Self {
        Self { on_chunk, on_done }
    }
}

impl<C, D> StreamSink for Callbacks<C, D>
where
    C: FnMut(&str) + Send,
    D: FnMut(Completion) + Send,
{
    fn on_chunk(&mut self, text: &str) {
        (self.on_chunk)(text)
    }

    fn on_done(&mut self, completion: Completion) {
        (self.on_done)(completion)
    }
}

/// Message emitted by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum StreamUpdate {
    /// Incremental text fragment
    Chunk(String),
    /// Terminal completion
    Done(Completion),
}

impl StreamUpdate {
    /// Replay this update into another sink.
    pub fn apply<S: StreamSink + ?Sized>(self, sink: &mut S) {
        match self {
            StreamUpdate::Chunk(text) => sink.on_chunk(&text),
            StreamUpdate::Done(completion) => sink.on_done(completion),
        }
    }
}

/// Sink that forwards every signal over an unbounded tokio channel.
///
/// Useful when the consumer runs its own event loop and wants stream
/// updates interleaved with other messages.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StreamUpdate>,
}

impl ChannelSink {
    /// Create a sink sending into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<StreamUpdate>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiving half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StreamUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, update: StreamUpdate) {
        // The receiver going away is not an error for the decoder
        if self.tx.send(update).is_err() {
            tracing::debug!("Stream update receiver dropped");
        }
    }
}

impl StreamSink for ChannelSink {
    fn on_chunk(&mut self, text: &str) {
        self.send(StreamUpdate::Chunk(text.to_string()));
    }

    fn on_done(&mut self, completion: Completion) {
        self.send(StreamUpdate::Done(completion));
    }
}

/// Sink that accumulates the assistant reply.
#[derive(Debug, Clone, Default)]
pub struct ReplyBuffer {
    chunks: Vec<String>,
    text: String,
    completion: Option<Completion>,
    completions: usize,
}

impl ReplyBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenation of every chunk received so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Individual chunks in arrival order.
    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    /// The completion, once received.
    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Number of completion callbacks observed.
    pub fn completions(&self) -> usize {
        self.completions
    }

    /// Whether the reply finished with `done`.
    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Some(Completion::Done { .. }))
    }
}

impl StreamSink for ReplyBuffer {
    fn on_chunk(&mut self, text: &str) {
        self.text.push_str(text);
        self.chunks.push(text.to_string());
    }

    fn on_done(&mut self, completion: Completion) {
        self.completions += 1;
        self.completion = Some(completion);
    }
}
