//! Trait abstractions for dependency injection and testability.
//!
//! [`HttpClient`] is the transport seam of the streaming client. The remaining
//! traits describe external collaborators of the workspace (persistence,
//! placeholder scanning, markdown rendering, text diffing); this crate defines
//! their interfaces and data types only and ships no implementations for them.

pub mod http;
pub mod render;
pub mod storage;

pub use http::{ByteStream, Headers, HttpClient, Response};
pub use render::{DiffOp, DiffSpan, MarkdownRenderer, TextDiff};
pub use storage::{
    AppSettings, HistoryEntry, HistoryStore, PromptTemplate, SettingsStore, StorageError,
    TemplateStore, VariableExtractor,
};
