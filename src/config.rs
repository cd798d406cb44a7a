//! Client configuration.
//!
//! The backend base URL is resolved once at process start and injected into
//! clients at construction time; it is never re-read per call.

use std::time::Duration;

/// Environment variable holding the agent backend URL.
pub const BACKEND_URL_ENV: &str = "PROMPTFORGE_BACKEND_URL";

/// Default backend URL when the environment does not provide one.
/// The agent API server listens on port 8000 by default.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Number of stream attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for the streaming client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the agent backend (no trailing slash required).
    pub base_url: String,
    /// Maximum number of dispatch-and-drain attempts per call.
    pub max_attempts: u32,
    /// Base backoff delay; attempt `i` waits `base_delay * i` before `i + 1`.
    pub base_delay: Duration,
}

impl Config {
    /// Create a configuration for the given backend URL with default retry
    /// settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_secs(1),
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// Reads `PROMPTFORGE_BACKEND_URL`, falling back to `http://localhost:8000`.
    /// Intended to be called once at startup; the resulting value is injected
    /// into clients rather than re-read per call.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BACKEND_URL_ENV).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(base_url)
    }

    /// Override the maximum attempt count.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Override the base backoff delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_endpoint_url_joining() {
        let config = Config::new("http://localhost:8000/");
        assert_eq!(
            config.endpoint_url("run_sse"),
            "http://localhost:8000/run_sse"
        );
        assert_eq!(config.endpoint_url("/run"), "http://localhost:8000/run");
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new("http://backend:9000")
            .with_max_attempts(5)
            .with_base_delay(Duration::from_millis(250));
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.base_delay, Duration::from_millis(250));
    }
}
