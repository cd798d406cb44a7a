//! Data model of the streaming client.

use serde::{Deserialize, Serialize};

/// The unit of text yielded to callers.
///
/// `text` is never empty: empty fragments are filtered during decoding and do
/// not count as content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEvent {
    pub text: String,
}

impl TextEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whether this event carries usable (non-blank) content.
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// On-wire shape of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// The body itself is the content; every decoded fragment is an event.
    RawText,
    /// Line-delimited `data: <json>` frames with a `data: [DONE]` sentinel.
    EventFrames,
}

/// One streaming call against the backend.
///
/// Immutable; built once per call with a fully constructed JSON payload.
#[derive(Debug, Clone)]
pub struct StreamRequest {
    /// Endpoint path relative to the configured base URL, e.g. `run_sse`.
    pub endpoint: String,
    /// Fully built JSON request body.
    pub payload: serde_json::Value,
    /// How the response body is framed.
    pub format: WireFormat,
}

impl StreamRequest {
    /// Request against an endpoint answering with `data:`-framed events.
    pub fn event_frames(endpoint: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload,
            format: WireFormat::EventFrames,
        }
    }

    /// Request against an endpoint answering with raw incremental text.
    pub fn raw_text(endpoint: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload,
            format: WireFormat::RawText,
        }
    }
}

/// Result of one dispatch-and-drain cycle, consumed immediately by the retry
/// loop.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// At least one event with non-blank text was observed; the buffered
    /// events are replayed to the caller in order.
    Success(Vec<TextEvent>),
    /// The drain completed with zero non-blank events.
    EmptyContent,
    /// The dispatch or the body read failed.
    TransportError(String),
}
