//! The resilient streaming client.
//!
//! Turns one typed request into a lazy, finite sequence of text events:
//! dispatch a POST, decode the byte stream ([`ChunkDecoder`]), and drive up to
//! N full attempts with linear backoff ([`StreamClient`]). Callers consume the
//! resulting [`TextEventStream`] exactly once; dropping it cancels the call.

mod client;
mod decoder;
mod event;

pub use client::{StreamClient, TextEventStream};
pub use decoder::ChunkDecoder;
pub(crate) use decoder::frame_text;
pub use event::{AttemptOutcome, StreamRequest, TextEvent, WireFormat};
