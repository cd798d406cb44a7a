//! Promptforge client core.
//!
//! The resilient streaming client behind the promptforge workspace: it
//! dispatches prompt requests to the agent backend, incrementally decodes
//! partially-framed byte streams into text events, and wraps the exchange in a
//! bounded retry policy. UI rendering, local persistence, text diffing and
//! markdown rendering are external collaborators, exposed here as traits only.

pub mod adapters;
pub mod api;
pub mod config;
pub mod error;
pub mod stream;
pub mod traits;
