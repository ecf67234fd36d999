//! Scripted byte sources for decoder tests.
//!
//! These build a [`ByteStream`] directly, without an HTTP client, so tests
//! can control exactly where chunk boundaries fall.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::traits::{ByteStream, HttpError};

/// Counts how many tracked streams have been dropped.
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Arc<AtomicUsize>);

impl DropCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drops observed.
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Whether at least one tracked stream was dropped.
    pub fn dropped(&self) -> bool {
        self.count() > 0
    }

    fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Byte stream wrapper that reports its own drop.
struct TrackedStream {
    inner: ByteStream,
    counter: DropCounter,
}

impl Stream for TrackedStream {
    type Item = Result<Bytes, HttpError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.counter.record();
    }
}

/// Wrap `inner` so dropping it increments `counter`.
pub fn tracked(inner: ByteStream, counter: DropCounter) -> ByteStream {
    Box::pin(TrackedStream { inner, counter })
}

/// A source that yields `chunks` in order and then ends.
pub fn byte_stream<I, B>(chunks: I) -> ByteStream
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    let chunks: Vec<Bytes> = chunks.into_iter().map(Into::into).collect();
    Box::pin(stream::iter(chunks.into_iter().map(Ok::<Bytes, HttpError>)))
}

/// A source that yields `chunks` and then fails with `error`.
pub fn failing_stream<I, B>(chunks: I, error: HttpError) -> ByteStream
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    Box::pin(byte_stream(chunks).chain(stream::once(async move { Err(error) })))
}

/// A source that yields `chunks` and then never produces another item.
pub fn stalled_stream<I, B>(chunks: I) -> ByteStream
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    Box::pin(byte_stream(chunks).chain(stream::pending()))
}

/// Split `input` into chunks of `size` bytes (the last may be shorter).
pub fn chunks_of(input: &[u8], size: usize) -> Vec<Bytes> {
    input
        .chunks(size.max(1))
        .map(Bytes::copy_from_slice)
        .collect()
}

/// Split `input` into two chunks at byte offset `at`.
pub fn split_at(input: &[u8], at: usize) -> Vec<Bytes> {
    let (head, tail) = input.split_at(at.min(input.len()));
    vec![Bytes::copy_from_slice(head), Bytes::copy_from_slice(tail)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_byte_stream_yields_in_order() {
        let mut source = byte_stream(vec!["a", "b"]);
        assert_eq!(source.next().await, Some(Ok(Bytes::from("a"))));
        assert_eq!(source.next().await, Some(Ok(Bytes::from("b"))));
        assert_eq!(source.next().await, None);
    }

    #[tokio::test]
    async fn test_failing_stream_ends_with_error() {
        let mut source = failing_stream(vec!["a"], HttpError::Io("reset".to_string()));
        assert!(matches!(source.next().await, Some(Ok(_))));
        assert_eq!(
            source.next().await,
            Some(Err(HttpError::Io("reset".to_string())))
        );
    }

    #[test]
    fn test_drop_counter() {
        let counter = DropCounter::new();
        let source = tracked(byte_stream(Vec::<Bytes>::new()), counter.clone());
        assert!(!counter.dropped());
        drop(source);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_chunking_helpers() {
        let chunks = chunks_of(b"abcde", 2);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], Bytes::from("e"));

        let halves = split_at(b"abc", 10);
        assert_eq!(halves[0], Bytes::from("abc"));
        assert!(halves[1].is_empty());
    }
}
