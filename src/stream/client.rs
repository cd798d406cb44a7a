//! Streaming client: dispatch, retry, and the event sequence handed to callers.
//!
//! One call runs up to `max_attempts` full dispatch-and-drain cycles with a
//! collect-then-commit policy: an attempt's events are buffered in memory and
//! only replayed to the caller once the drain proves that some non-blank text
//! arrived. A stream that opens fine but yields only whitespace counts as a
//! failed attempt. After the last failure the caller still receives a normal
//! text stream, carrying exactly one synthetic error event.

use futures::stream::{self, Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;

use crate::config::Config;
use crate::error::StreamError;
use crate::stream::decoder::ChunkDecoder;
use crate::stream::event::{AttemptOutcome, StreamRequest, TextEvent};
use crate::traits::{Headers, HttpClient};

/// The lazy, single-consumption event sequence returned to callers.
///
/// Finite; ends naturally on success or after the single synthetic error
/// event. Dropping it before or during consumption is the cancellation
/// mechanism.
pub type TextEventStream = Pin<Box<dyn Stream<Item = TextEvent> + Send>>;

/// Resilient streaming client over an [`HttpClient`] transport.
#[derive(Debug)]
pub struct StreamClient<C: HttpClient> {
    http: Arc<C>,
    config: Config,
}

impl<C: HttpClient> Clone for StreamClient<C> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            config: self.config.clone(),
        }
    }
}

impl<C: HttpClient + 'static> StreamClient<C> {
    /// Create a client over the given transport and configuration.
    pub fn new(http: Arc<C>, config: Config) -> Self {
        Self { http, config }
    }

    /// The configuration this client was constructed with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue a streaming call.
    ///
    /// No work happens until the returned stream is first polled; at that
    /// point the full retry loop runs, and the winning attempt's events are
    /// replayed in their original order. Failed attempts never leak events.
    pub fn stream(&self, request: StreamRequest) -> TextEventStream {
        let client = self.clone();
        Box::pin(
            stream::once(async move { stream::iter(client.run(request).await) }).flatten(),
        )
    }

    /// Drive the attempt loop to completion, returning the events to replay.
    async fn run(&self, request: StreamRequest) -> Vec<TextEvent> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = StreamError::EmptyContent.to_string();

        for attempt in 1..=max_attempts {
            match self.run_attempt(&request).await {
                AttemptOutcome::Success(events) => {
                    tracing::debug!(
                        attempt,
                        events = events.len(),
                        endpoint = %request.endpoint,
                        "stream attempt succeeded"
                    );
                    return events;
                }
                AttemptOutcome::EmptyContent => {
                    tracing::warn!(attempt, endpoint = %request.endpoint, "stream attempt yielded no content");
                    last_error = StreamError::EmptyContent.to_string();
                }
                AttemptOutcome::TransportError(message) => {
                    tracing::warn!(attempt, endpoint = %request.endpoint, error = %message, "stream attempt failed");
                    last_error = message;
                }
            }

            if attempt < max_attempts {
                tokio::time::sleep(self.config.base_delay * attempt).await;
            }
        }

        let exhausted = StreamError::Exhausted {
            attempts: max_attempts,
            last_error,
        };
        tracing::warn!(%exhausted, endpoint = %request.endpoint, "stream call exhausted");
        vec![TextEvent::new(format!("[{}]", exhausted))]
    }

    /// One full dispatch-and-drain cycle.
    ///
    /// The response body is exclusively owned by a fresh decoder for the
    /// lifetime of the attempt and fully drained into memory before any
    /// outcome is decided.
    async fn run_attempt(&self, request: &StreamRequest) -> AttemptOutcome {
        let url = self.config.endpoint_url(&request.endpoint);
        let body = match serde_json::to_string(&request.payload) {
            Ok(body) => body,
            Err(err) => return AttemptOutcome::TransportError(err.to_string()),
        };

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let mut byte_stream = match self.http.post_stream(&url, &body, &headers).await {
            Ok(stream) => stream,
            Err(err) => return AttemptOutcome::TransportError(err.to_string()),
        };

        let mut decoder = ChunkDecoder::new(request.format);
        let mut events = Vec::new();
        let mut has_content = false;

        while let Some(chunk) = byte_stream.next().await {
            match chunk {
                Ok(bytes) => {
                    for event in decoder.feed(&bytes) {
                        has_content |= event.has_content();
                        events.push(event);
                    }
                }
                // Mid-stream loss discards the whole attempt; nothing has
                // been committed to the caller yet.
                Err(err) => return AttemptOutcome::TransportError(err.to_string()),
            }
        }

        if has_content {
            AttemptOutcome::Success(events)
        } else {
            AttemptOutcome::EmptyContent
        }
    }
}
