//! Result type alias for stream operations.

use super::stream::StreamError;

/// Type alias for Results using StreamError.
///
/// # Example
///
/// ```ignore
/// use chatwire::error::StreamResult;
///
/// async fn open(client: &ChatClient<ReqwestHttpClient>) -> StreamResult<ByteStream> {
///     client.open_stream(&ChatRequest::from_prompt("hello")).await
/// }
/// ```
pub type StreamResult<T> = Result<T, StreamError>;
