//! Typed agent operations.
//!
//! Streaming operations (creator, playground) go through the resilient
//! [`StreamClient`]; buffered operations (enhancer, evaluator, optimizer,
//! few-shot) POST to `run` and parse the JSON the model embedded in its text
//! response.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::api::json::extract_json;
use crate::api::payloads::{
    EvaluationResult, FewShotExample, OptimizerResult, PromptBlock, RunRequest,
};
use crate::config::Config;
use crate::error::HttpError;
use crate::stream::{frame_text, StreamClient, StreamRequest, TextEventStream};
use crate::traits::{Headers, HttpClient};

/// Streaming endpoint of the agent API server.
const RUN_SSE_ENDPOINT: &str = "run_sse";

/// Buffered endpoint of the agent API server.
const RUN_ENDPOINT: &str = "run";

/// Errors of the buffered agent operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] HttpError),

    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response payload: {0}")]
    InvalidResponse(String),
}

/// Client for the workspace agents.
#[derive(Debug)]
pub struct AgentClient<C: HttpClient> {
    http: Arc<C>,
    stream: StreamClient<C>,
}

impl<C: HttpClient + 'static> AgentClient<C> {
    /// Create a client over the given transport and configuration.
    pub fn new(http: Arc<C>, config: Config) -> Self {
        Self {
            stream: StreamClient::new(Arc::clone(&http), config),
            http,
        }
    }

    /// Access the underlying streaming client.
    pub fn stream_client(&self) -> &StreamClient<C> {
        &self.stream
    }

    /// Stream a new prompt from the Creator agent.
    pub fn create_prompt(
        &self,
        goal: &str,
        audience: &str,
        constraints: &str,
        use_search: bool,
    ) -> TextEventStream {
        let search_note = if use_search {
            "\n**Note**: Please use search to verify facts if needed."
        } else {
            ""
        };
        let instruction = format!(
            "You are the Creator Agent.\n\
             Generate a comprehensive LLM prompt based on the following:\n\n\
             **Goal**: {goal}\n\
             **Target Audience**: {audience}\n\
             **Constraints**: {constraints}{search_note}\n\n\
             Output the prompt clearly."
        );
        self.run_streaming(&instruction)
    }

    /// Stream the execution of a prompt through the Playground agent,
    /// substituting the provided variables server-side.
    pub fn test_prompt(
        &self,
        prompt: &str,
        variables: &BTreeMap<String, String>,
    ) -> TextEventStream {
        let variables_json =
            serde_json::to_string_pretty(variables).unwrap_or_else(|_| "{}".to_string());
        let instruction = format!(
            "You are the Playground Agent.\n\
             Execute the following prompt by substituting the provided variables.\n\
             Return the output of the prompt execution.\n\n\
             **Prompt**:\n{prompt}\n\n\
             **Variables**:\n{variables_json}"
        );
        self.run_streaming(&instruction)
    }

    /// Structure a prompt into logical blocks via the Enhancer agent.
    pub async fn enhance_prompt(&self, prompt: &str) -> Result<Vec<PromptBlock>, ApiError> {
        let instruction = format!(
            "You are the Enhancer Agent.\n\
             Analyze the following prompt and structure it into logical blocks \
             (Role, Context, Instruction, Constraints, etc.).\n\
             Return the result as a JSON object with a \"blocks\" key containing a list of \
             blocks, where each block has \"type\", \"content\", and \"rationale\".\n\n\
             **Prompt to Enhance**:\n{prompt}"
        );

        #[derive(Deserialize)]
        struct EnhanceResponse {
            #[serde(default)]
            blocks: Vec<PromptBlock>,
        }

        let parsed: EnhanceResponse = self.run_buffered(&instruction).await?;
        Ok(parsed.blocks)
    }

    /// Evaluate a prompt via the Evaluator agent, optionally against a custom
    /// rubric.
    pub async fn evaluate_prompt(
        &self,
        prompt: &str,
        custom_rubric: Option<&str>,
    ) -> Result<EvaluationResult, ApiError> {
        let rubric_clause = match custom_rubric {
            Some(_) => " and the custom rubric provided",
            None => "",
        };
        let rubric_section = match custom_rubric {
            Some(rubric) => format!("\n\n**Custom Rubric**:\n{rubric}"),
            None => String::new(),
        };
        let instruction = format!(
            "You are the Evaluator Agent.\n\
             Evaluate the following prompt against best practices{rubric_clause}.\n\
             For each criterion provide a score from 0 to 100 and a brief rationale.\n\
             Return the result as a JSON object with \"scores\" (list of objects with \
             \"criteria\", \"score\", \"rationale\"), \"risks\" (list), and \
             \"suggestions\" (list).\n\n\
             **Prompt to Evaluate**:\n{prompt}{rubric_section}"
        );

        self.run_buffered(&instruction).await
    }

    /// Generate optimized prompt variations via the Optimizer agent.
    pub async fn optimize_prompt(
        &self,
        prompt: &str,
        count: usize,
        suggestions: &[String],
    ) -> Result<Vec<OptimizerResult>, ApiError> {
        let suggestion_list = suggestions
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n");
        let instruction = format!(
            "You are the Optimizer Agent.\n\
             Generate {count} optimized variations of the following prompt based on these \
             suggestions:\n{suggestion_list}\n\n\
             Return the result as a JSON object with a \"variations\" key containing a list \
             of objects, each with \"prompt\" (string) and \"rationale\" (string).\n\n\
             **Original Prompt**:\n{prompt}"
        );

        #[derive(Deserialize)]
        struct OptimizeResponse {
            #[serde(default)]
            variations: Vec<OptimizerResult>,
        }

        let parsed: OptimizeResponse = self.run_buffered(&instruction).await?;
        Ok(parsed.variations)
    }

    /// Generate few-shot examples for a prompt.
    pub async fn few_shot_examples(
        &self,
        prompt: &str,
        count: usize,
    ) -> Result<Vec<FewShotExample>, ApiError> {
        let instruction = format!(
            "You are the Few-Shot Generator (part of Optimizer).\n\
             Generate {count} high-quality few-shot examples (input-output pairs) for the \
             following prompt.\n\
             Return the result as a JSON object with an \"examples\" key containing a list \
             of objects, each with \"input\" and \"output\".\n\n\
             **Prompt**:\n{prompt}"
        );

        #[derive(Deserialize)]
        struct ExamplesResponse {
            #[serde(default)]
            examples: Vec<FewShotExample>,
        }

        let parsed: ExamplesResponse = self.run_buffered(&instruction).await?;
        Ok(parsed.examples)
    }

    /// Dispatch a streaming run through the resilient stream client.
    fn run_streaming(&self, instruction: &str) -> TextEventStream {
        let payload = RunRequest::new(instruction, true).to_value();
        self.stream
            .stream(StreamRequest::event_frames(RUN_SSE_ENDPOINT, payload))
    }

    /// Dispatch a buffered run and parse the JSON embedded in the model's
    /// text response.
    async fn run_buffered<T: serde::de::DeserializeOwned>(
        &self,
        instruction: &str,
    ) -> Result<T, ApiError> {
        let request = RunRequest::new(instruction, false);
        let url = self.stream.config().endpoint_url(RUN_ENDPOINT);
        let body = request.to_value().to_string();

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = self.http.post(&url, &body, &headers).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: response.text(),
            });
        }

        let data: Value = response
            .json()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        let text = frame_text(&data)
            .ok_or_else(|| ApiError::InvalidResponse("no text field in response".to_string()))?;
        let json = extract_json(&text)
            .ok_or_else(|| ApiError::InvalidResponse("no JSON found in response text".to_string()))?;
        serde_json::from_str(json).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockAttempt, MockHttpClient};
    use futures_util::StreamExt;

    fn agent_client(mock: MockHttpClient) -> AgentClient<MockHttpClient> {
        AgentClient::new(Arc::new(mock), Config::new("http://backend:8000"))
    }

    #[tokio::test]
    async fn test_enhance_parses_blocks_from_fenced_json() {
        let mock = MockHttpClient::new();
        let inner = r#"```json
{"blocks": [{"type": "ROLE", "content": "You are a pirate."}]}
```"#;
        let body = serde_json::json!({ "text": inner }).to_string();
        mock.push(MockAttempt::response(200, &body));

        let blocks = agent_client(mock.clone())
            .enhance_prompt("Act like a pirate")
            .await
            .unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, "ROLE");
        assert_eq!(mock.recorded()[0].url, "http://backend:8000/run");
    }

    #[tokio::test]
    async fn test_evaluate_reads_parts_fallback() {
        let mock = MockHttpClient::new();
        let inner = r#"{"scores": [{"criteria": "Clarity", "score": 88, "rationale": "clear"}], "risks": [], "suggestions": ["add examples"]}"#;
        let body =
            serde_json::json!({ "parts": [{ "text": inner }] }).to_string();
        mock.push(MockAttempt::response(200, &body));

        let result = agent_client(mock)
            .evaluate_prompt("Summarize this article", None)
            .await
            .unwrap();

        assert_eq!(result.scores[0].score, 88);
        assert_eq!(result.suggestions, vec!["add examples"]);
    }

    #[tokio::test]
    async fn test_optimize_accepts_explanation_alias() {
        let mock = MockHttpClient::new();
        let inner =
            r#"{"variations": [{"prompt": "better prompt", "explanation": "more specific"}]}"#;
        let body = serde_json::json!({ "text": inner }).to_string();
        mock.push(MockAttempt::response(200, &body));

        let variations = agent_client(mock)
            .optimize_prompt("a prompt", 1, &["be specific".to_string()])
            .await
            .unwrap();

        assert_eq!(variations[0].rationale, "more specific");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock = MockHttpClient::new();
        mock.push(MockAttempt::response(422, r#"{"detail": "bad appName"}"#));

        let err = agent_client(mock)
            .enhance_prompt("x")
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("bad appName"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_response_without_json_is_invalid() {
        let mock = MockHttpClient::new();
        let body = serde_json::json!({ "text": "sorry, I cannot do that" }).to_string();
        mock.push(MockAttempt::response(200, &body));

        let err = agent_client(mock).enhance_prompt("x").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_create_prompt_streams_creator_instruction() {
        let mock = MockHttpClient::new();
        mock.push(MockAttempt::stream(&["data: {\"text\":\"Role: ...\"}\n"]));

        let events: Vec<_> = agent_client(mock.clone())
            .create_prompt("a slogan", "developers", "under 10 words", false)
            .collect()
            .await;

        assert_eq!(events.len(), 1);
        let recorded = mock.recorded();
        assert_eq!(recorded[0].url, "http://backend:8000/run_sse");
        assert!(recorded[0].body.contains("Creator Agent"));
        assert!(recorded[0].body.contains("a slogan"));
        assert!(recorded[0].body.contains("\"streaming\":true"));
    }

    #[tokio::test]
    async fn test_test_prompt_embeds_variables() {
        let mock = MockHttpClient::new();
        mock.push(MockAttempt::stream(&["data: {\"text\":\"out\"}\n"]));

        let mut variables = BTreeMap::new();
        variables.insert("topic".to_string(), "rust".to_string());

        let _: Vec<_> = agent_client(mock.clone())
            .test_prompt("Write about {{topic}}", &variables)
            .collect()
            .await;

        let body = &mock.recorded()[0].body;
        assert!(body.contains("Playground Agent"));
        assert!(body.contains("topic"));
    }
}
