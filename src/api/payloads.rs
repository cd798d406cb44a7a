//! Wire payloads and typed results of the agent backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Agent application name registered on the backend coordinator.
pub const APP_NAME: &str = "prompt_engineering_coordinator";

/// Static user id until multi-user support exists.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Which workspace agent produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Creator,
    Enhancer,
    Evaluator,
    Optimizer,
    Playground,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentKind::Creator => "Creator",
            AgentKind::Enhancer => "Enhancer",
            AgentKind::Evaluator => "Evaluator",
            AgentKind::Optimizer => "Optimizer",
            AgentKind::Playground => "Playground",
        };
        write!(f, "{}", name)
    }
}

/// One text part of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePart {
    pub text: String,
}

/// A message sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    pub parts: Vec<MessagePart>,
}

impl AgentMessage {
    /// A user message with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![MessagePart { text: text.into() }],
        }
    }
}

/// Body of a `run` / `run_sse` call. Field names are camelCase on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub app_name: String,
    pub user_id: String,
    /// Unique per request; sessions are not reused.
    pub session_id: String,
    pub new_message: AgentMessage,
    pub streaming: bool,
}

impl RunRequest {
    /// Build a request carrying the given prompt text.
    pub fn new(prompt: impl Into<String>, streaming: bool) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            session_id: format!("session-{}", Uuid::new_v4().simple()),
            new_message: AgentMessage::user(prompt),
            streaming,
        }
    }

    /// The JSON body of this request.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "appName": self.app_name,
            "userId": self.user_id,
            "sessionId": self.session_id,
            "newMessage": {
                "role": self.new_message.role,
                "parts": self.new_message.parts,
            },
            "streaming": self.streaming,
        })
    }
}

/// One structured block of an enhanced prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptBlock {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub content: String,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// Score for one rubric criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criteria: String,
    pub score: i32,
    pub rationale: String,
}

/// Full evaluation of a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default)]
    pub scores: Vec<CriterionScore>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// One optimized prompt variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerResult {
    pub prompt: String,
    #[serde(alias = "explanation")]
    pub rationale: String,
}

/// One few-shot input/output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FewShotExample {
    pub input: String,
    pub output: String,
}
