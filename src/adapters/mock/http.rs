//! Mock HTTP transport for testing.
//!
//! Provides a configurable mock transport that returns scripted response
//! bodies, stream failures or open errors, and records every request.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::stream::{byte_stream, failing_stream, stalled_stream, tracked, DropCounter};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Body chunks, then a clean end-of-stream
    Stream(Vec<Bytes>),
    /// Body chunks, then a transport failure
    StreamError(Vec<Bytes>, HttpError),
    /// Body chunks, then the connection hangs without closing
    Stalled(Vec<Bytes>),
    /// The request itself fails
    Error(HttpError),
}

/// Mock HTTP transport for testing.
///
/// # Example
///
/// ```ignore
/// use chatwire::adapters::mock::{MockHttpClient, MockResponse};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://test/api/chat",
///     MockResponse::Stream(vec![Bytes::from("event: done\n\n")]),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Drops of body streams handed out by this client
    drops: DropCounter,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            drops: DropCounter::new(),
        }
    }

    /// Set a response for a specific URL.
    ///
    /// The URL is matched exactly first, then as a prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Handle counting how many body streams have been dropped.
    pub fn drop_counter(&self) -> DropCounter {
        self.drops.clone()
    }

    /// Record a request.
    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    /// Get the response for a URL.
    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record_request(url, headers, body);

        let source = match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => byte_stream(chunks),
            Some(MockResponse::StreamError(chunks, err)) => failing_stream(chunks, err),
            Some(MockResponse::Stalled(chunks)) => stalled_stream(chunks),
            Some(MockResponse::Error(err)) => return Err(err),
            None => return Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        };

        Ok(tracked(source, self.drops.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_post_stream_with_chunks() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/stream",
            MockResponse::Stream(vec![Bytes::from("chunk1"), Bytes::from("chunk2")]),
        );

        let mut stream = client
            .post_stream("https://example.com/stream", "{}", &Headers::new())
            .await
            .unwrap();

        let mut chunks = Vec::new();
        while let Some(result) = stream.next().await {
            chunks.push(result.unwrap());
        }
        assert_eq!(chunks, vec![Bytes::from("chunk1"), Bytes::from("chunk2")]);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, "{}");
    }

    #[tokio::test]
    async fn test_open_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/error",
            MockResponse::Error(HttpError::ServerError {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        );

        let result = client
            .post_stream("https://example.com/error", "{}", &Headers::new())
            .await;

        match result {
            Err(HttpError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            _ => panic!("Expected ServerError"),
        }
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client
            .post_stream("https://example.com/missing", "{}", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_default_and_prefix_match() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Stream(vec![Bytes::from("default")]));
        client.set_response(
            "https://example.com/api",
            MockResponse::Stream(vec![Bytes::from("api")]),
        );

        let mut stream = client
            .post_stream("https://example.com/api/chat", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(stream.next().await, Some(Ok(Bytes::from("api"))));

        let mut stream = client
            .post_stream("https://other.example.com", "{}", &Headers::new())
            .await
            .unwrap();
        assert_eq!(stream.next().await, Some(Ok(Bytes::from("default"))));
    }

    #[tokio::test]
    async fn test_headers_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Stream(Vec::new()));

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        let _ = client
            .post_stream("https://example.com/chat", "{}", &headers)
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(
            requests[0].headers.get("Accept"),
            Some(&"text/event-stream".to_string())
        );
    }

    #[tokio::test]
    async fn test_dropping_stream_is_counted() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Stalled(vec![Bytes::from("x")]));

        let stream = client
            .post_stream("https://example.com/chat", "{}", &Headers::new())
            .await
            .unwrap();
        assert!(!client.drop_counter().dropped());
        drop(stream);
        assert_eq!(client.drop_counter().count(), 1);
    }
}
