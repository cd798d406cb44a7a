//! Transport-level error types.

use std::fmt;

/// HTTP transport errors.
///
/// Produced by [`HttpClient`](crate::traits::HttpClient) implementations; the
/// retry orchestrator treats all of these as failures of a single attempt.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection to the server failed before any bytes arrived.
    ConnectionFailed(String),

    /// Request timed out.
    Timeout(String),

    /// Server returned a non-2xx status. `message` carries the response body
    /// text verbatim so it can be logged and surfaced.
    ServerError { status: u16, message: String },

    /// The response body failed mid-read.
    Io(String),

    /// Any other transport failure.
    Other(String),
}

impl HttpError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_) => true,
            HttpError::ServerError { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            HttpError::Other(_) => false,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Classify a reqwest error into an [`HttpError`].
pub fn classify_reqwest_error(err: &reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_connect() {
        HttpError::ConnectionFailed(err.to_string())
    } else if err.is_body() || err.is_decode() {
        HttpError::Io(err.to_string())
    } else {
        HttpError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 500,
                message: "Internal Error".to_string()
            }
            .to_string(),
            "Server error (500): Internal Error"
        );
        assert_eq!(
            HttpError::Io("body dropped".to_string()).to_string(),
            "IO error: body dropped"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(HttpError::ConnectionFailed("x".to_string()).is_retryable());
        assert!(HttpError::Timeout("x".to_string()).is_retryable());
        assert!(HttpError::Io("x".to_string()).is_retryable());
        assert!(HttpError::ServerError {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(HttpError::ServerError {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!HttpError::ServerError {
            status: 404,
            message: String::new()
        }
        .is_retryable());
        assert!(!HttpError::Other("x".to_string()).is_retryable());
    }

    #[test]
    fn test_server_error_carries_body_verbatim() {
        let err = HttpError::ServerError {
            status: 422,
            message: r#"{"detail": "appName missing"}"#.to_string(),
        };
        assert!(err.to_string().contains(r#"{"detail": "appName missing"}"#));
    }
}
