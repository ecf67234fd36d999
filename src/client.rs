//! Client for the streaming chat endpoint.
//!
//! [`ChatClient`] POSTs a [`ChatRequest`] and hands the response body to the
//! decoder. It is generic over the transport so tests can script responses
//! with [`MockHttpClient`](crate::adapters::mock::MockHttpClient).

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::decoder::{decode, DecodeHandle};
use crate::error::{StreamError, StreamResult};
use crate::models::ChatRequest;
use crate::traits::{ByteStream, Headers, HttpClient, StreamSink};

/// Client for streaming assistant replies.
#[derive(Debug, Clone)]
pub struct ChatClient<C> {
    config: ClientConfig,
    http: C,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a client over reqwest using `config`'s connect timeout.
    pub fn from_config(config: ClientConfig) -> StreamResult<Self> {
        let http = ReqwestHttpClient::with_connect_timeout(config.connect_timeout)
            .map_err(StreamError::Request)?;
        Ok(Self::new(http, config))
    }
}

impl<C: HttpClient> ChatClient<C> {
    /// Create a client over an existing transport.
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { config, http }
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Underlying transport.
    pub fn http(&self) -> &C {
        &self.http
    }

    /// Open the reply stream for `request` without decoding it.
    ///
    /// Connect failures map to `StreamError::Request` and non-2xx statuses
    /// to `StreamError::HttpStatus`.
    pub async fn open_stream(&self, request: &ChatRequest) -> StreamResult<ByteStream> {
        let url = self.config.chat_url();
        let body = request.to_body()?;

        tracing::debug!(url = %url, messages = request.messages.len(), "Opening chat stream");

        self.http
            .post_stream(&url, &body, &stream_headers())
            .await
            .map_err(StreamError::from_open)
    }

    /// Open the reply stream and decode it into `sink` on a new task.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use chatwire::adapters::ReplyBuffer;
    /// use chatwire::client::ChatClient;
    /// use chatwire::config::ClientConfig;
    /// use chatwire::models::ChatRequest;
    ///
    /// let client = ChatClient::from_config(ClientConfig::from_env()?)?;
    /// let handle = client
    ///     .stream_reply(&ChatRequest::from_prompt("Hello"), ReplyBuffer::new())
    ///     .await?;
    /// let outcome = handle.join().await?;
    /// ```
    pub async fn stream_reply<S>(&self, request: &ChatRequest, sink: S) -> StreamResult<DecodeHandle>
    where
        S: StreamSink + 'static,
    {
        let source = self.open_stream(request).await?;
        Ok(decode(source, sink, self.config.decoder()))
    }
}

/// Headers sent with every chat request.
fn stream_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::adapters::ReplyBuffer;
    use crate::decoder::DecodeOutcome;
    use crate::traits::HttpError;
    use bytes::Bytes;

    fn client(mock: MockHttpClient) -> ChatClient<MockHttpClient> {
        ChatClient::new(mock, ClientConfig::new().with_base_url("http://test"))
    }

    #[tokio::test]
    async fn test_open_stream_sends_request() {
        let mock = MockHttpClient::new();
        mock.set_response("http://test/api/chat", MockResponse::Stream(Vec::new()));
        let client = client(mock.clone());

        let _source = client
            .open_stream(&ChatRequest::from_prompt("hi"))
            .await
            .unwrap();

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://test/api/chat");
        assert_eq!(
            requests[0].body,
            r#"{"messages":[{"role":"user","content":"hi"}]}"#
        );
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_open_stream_maps_status() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ServerError {
            status: 503,
            message: "busy".to_string(),
        }));

        let err = client(mock)
            .open_stream(&ChatRequest::from_prompt("hi"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StreamError::HttpStatus { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_open_stream_maps_connect_failure() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let err = client(mock)
            .open_stream(&ChatRequest::from_prompt("hi"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StreamError::Request(HttpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_stream_reply_decodes() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Stream(vec![
            Bytes::from("event: chunk\ndata: {\"text\":\"Hi \"}\n\nevent: ch"),
            Bytes::from("unk\ndata: {\"text\":\"there\"}\n\nevent: done\ndata: {}\n\n"),
        ]));
        let (sink, mut rx) = crate::adapters::ChannelSink::channel();

        let handle = client(mock)
            .stream_reply(&ChatRequest::from_prompt("hi"), sink)
            .await
            .unwrap();
        assert_eq!(handle.join().await.unwrap(), DecodeOutcome::Completed);

        let mut reply = ReplyBuffer::new();
        while let Some(update) = rx.recv().await {
            update.apply(&mut reply);
        }
        assert_eq!(reply.text(), "Hi there");
        assert!(reply.is_complete());
    }
}
