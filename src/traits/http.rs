//! HTTP client trait abstraction.
//!
//! The transport seam of the request dispatcher: one buffered POST for plain
//! agent calls and one streaming POST for event streams. Implementations
//! include the production reqwest adapter and a scripted mock for tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;

use crate::error::HttpError;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A live, readable response body delivered in arbitrarily sized byte chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string, lossily decoding invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Trait for HTTP client operations.
///
/// Neither method retries internally; retry policy belongs to the caller.
/// `post_stream` must fail with [`HttpError::ServerError`] carrying the
/// response body text when the status is outside the success range, so that
/// the error can be logged verbatim.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and buffer the full response.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request and return the live response body as a stream
    /// of byte chunks.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
