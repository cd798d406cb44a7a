//! Error types for the promptforge client.
//!
//! Two layers of taxonomy:
//!
//! - [`HttpError`] — transport-level failures (connection, timeout, non-2xx
//!   status, body IO), produced below the retry orchestrator.
//! - [`StreamError`] — per-attempt classification consumed by the retry
//!   orchestrator (transport failure, empty content, exhausted retries).
//!
//! Nothing below the orchestrator ever reaches callers of the streaming API as
//! a fault: exhaustion is surfaced as a synthetic text event instead.

mod network;
mod stream;

pub use network::{classify_reqwest_error, HttpError};
pub use stream::StreamError;
