//! Per-attempt stream error classification.

use std::fmt;

use crate::error::HttpError;

/// Why a stream attempt (or the whole call) failed.
///
/// `Transport` and `EmptyContent` are recoverable and trigger another attempt;
/// `Exhausted` is terminal for the call but is surfaced to callers as a
/// synthetic text event, never as a fault.
#[derive(Debug, Clone)]
pub enum StreamError {
    /// Transport failure: non-2xx status, connection loss, or body read error.
    Transport(HttpError),

    /// The attempt completed without yielding any non-blank text.
    EmptyContent,

    /// All attempts failed.
    Exhausted { attempts: u32, last_error: String },
}

impl StreamError {
    /// Whether another attempt may resolve this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::Transport(_) | StreamError::EmptyContent)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Transport(err) => write!(f, "{}", err),
            StreamError::EmptyContent => write!(f, "Stream completed without content"),
            StreamError::Exhausted {
                attempts,
                last_error,
            } => write!(f, "Stream failed after {} attempts: {}", attempts, last_error),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<HttpError> for StreamError {
    fn from(err: HttpError) -> Self {
        StreamError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_variants() {
        assert!(StreamError::Transport(HttpError::ConnectionFailed("x".to_string())).is_retryable());
        assert!(StreamError::EmptyContent.is_retryable());
        assert!(!StreamError::Exhausted {
            attempts: 3,
            last_error: "empty".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_display_embeds_attempt_count() {
        let err = StreamError::Exhausted {
            attempts: 3,
            last_error: "Server error (500): boom".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("3 attempts"));
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn test_from_http_error() {
        let err: StreamError = HttpError::Timeout("30s".to_string()).into();
        assert!(matches!(err, StreamError::Transport(HttpError::Timeout(_))));
    }
}
