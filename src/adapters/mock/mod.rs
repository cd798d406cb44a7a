//! Mock implementations for testing.

pub mod http;

pub use http::{MockAttempt, MockHttpClient, RecordedRequest};
