//! Concrete implementations of the transport seam.
//!
//! - [`ReqwestHttpClient`] — production HTTP client over reqwest
//! - [`mock::MockHttpClient`] — scripted per-attempt outcomes for tests

pub mod mock;
pub mod reqwest_http;

pub use mock::MockHttpClient;
pub use reqwest_http::ReqwestHttpClient;
