//! Typed operations against the agent backend.
//!
//! One function per workspace agent (creator, enhancer, evaluator, optimizer,
//! playground), layered on the resilient streaming client for streaming
//! operations and on plain POSTs for buffered ones.

mod client;
mod json;
mod payloads;

pub use client::{AgentClient, ApiError};
pub use json::extract_json;
pub use payloads::{
    AgentKind, AgentMessage, CriterionScore, EvaluationResult, FewShotExample, MessagePart,
    OptimizerResult, PromptBlock, RunRequest,
};
