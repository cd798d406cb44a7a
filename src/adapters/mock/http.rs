//! Scripted mock HTTP client.
//!
//! Retry tests need a different outcome on each successive attempt against the
//! same URL, so outcomes are scripted as a FIFO queue rather than keyed by
//! URL: each `post`/`post_stream` call pops the next [`MockAttempt`].

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::HttpError;
use crate::traits::{ByteStream, Headers, HttpClient, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Headers,
    pub body: String,
}

/// The scripted outcome of one HTTP call.
#[derive(Debug, Clone)]
pub enum MockAttempt {
    /// A buffered response (for `post`).
    Response(Response),
    /// The call fails outright.
    Error(HttpError),
    /// A streaming body delivered as the given chunks, optionally ending in a
    /// mid-stream read error.
    Stream {
        chunks: Vec<Bytes>,
        trailing_error: Option<HttpError>,
    },
}

impl MockAttempt {
    /// A buffered response with the given status and body.
    pub fn response(status: u16, body: &str) -> Self {
        MockAttempt::Response(Response::new(status, Bytes::from(body.to_string())))
    }

    /// A failed call.
    pub fn error(err: HttpError) -> Self {
        MockAttempt::Error(err)
    }

    /// A streaming body delivered chunk by chunk.
    pub fn stream(chunks: &[&str]) -> Self {
        MockAttempt::Stream {
            chunks: chunks
                .iter()
                .map(|c| Bytes::from(c.to_string()))
                .collect(),
            trailing_error: None,
        }
    }

    /// A streaming body that fails mid-read after the given chunks.
    pub fn broken_stream(chunks: &[&str], err: HttpError) -> Self {
        MockAttempt::Stream {
            chunks: chunks
                .iter()
                .map(|c| Bytes::from(c.to_string()))
                .collect(),
            trailing_error: Some(err),
        }
    }
}

/// Mock HTTP client with scripted, sequential outcomes.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<VecDeque<MockAttempt>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next unscripted call.
    pub fn push(&self, attempt: MockAttempt) {
        self.script.lock().unwrap().push_back(attempt);
    }

    /// All requests made so far, in order.
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str, headers: &Headers, body: &str) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn next_attempt(&self) -> Option<MockAttempt> {
        self.script.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record(url, headers, body);
        match self.next_attempt() {
            Some(MockAttempt::Response(response)) => Ok(response),
            Some(MockAttempt::Error(err)) => Err(err),
            Some(MockAttempt::Stream { .. }) => Err(HttpError::Other(
                "scripted stream outcome on buffered request".to_string(),
            )),
            None => Err(HttpError::Other(format!("no scripted outcome for {}", url))),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.record(url, headers, body);
        match self.next_attempt() {
            Some(MockAttempt::Stream {
                chunks,
                trailing_error,
            }) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(trailing_error.into_iter().map(Err))
                    .collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockAttempt::Error(err)) => Err(err),
            Some(MockAttempt::Response(_)) => Err(HttpError::Other(
                "scripted buffered outcome on stream request".to_string(),
            )),
            None => Err(HttpError::Other(format!("no scripted outcome for {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_outcomes_pop_in_order() {
        let client = MockHttpClient::new();
        client.push(MockAttempt::response(200, "first"));
        client.push(MockAttempt::error(HttpError::Timeout("30s".to_string())));

        let first = client.post("http://x/run", "{}", &Headers::new()).await;
        assert_eq!(first.unwrap().text(), "first");

        let second = client.post("http://x/run", "{}", &Headers::new()).await;
        assert!(matches!(second, Err(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_stream_delivers_chunks_then_error() {
        let client = MockHttpClient::new();
        client.push(MockAttempt::broken_stream(
            &["a", "b"],
            HttpError::Io("reset".to_string()),
        ));

        let mut stream = client
            .post_stream("http://x/run_sse", "{}", &Headers::new())
            .await
            .unwrap();

        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from("a"));
        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from("b"));
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_unscripted_call_errors() {
        let client = MockHttpClient::new();
        let result = client.post("http://x/run", "{}", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let client = MockHttpClient::new();
        client.push(MockAttempt::response(200, "{}"));

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        client
            .post("http://x/run", r#"{"streaming":false}"#, &headers)
            .await
            .unwrap();

        let recorded = client.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].url, "http://x/run");
        assert_eq!(recorded[0].body, r#"{"streaming":false}"#);
    }
}
