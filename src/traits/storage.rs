//! Persistence and template-subsystem interfaces.
//!
//! History, template and settings storage are external collaborators of the
//! workspace. This crate only defines their contracts and the records they
//! exchange; implementations (local JSON files, a database, ...) live with the
//! embedding application.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::AgentKind;

/// Storage operation errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// The requested record does not exist.
    NotFound { id: String },
    /// The backing store could not be read or written.
    Io(String),
    /// A record failed to serialize or deserialize.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound { id } => write!(f, "Record not found: {}", id),
            StorageError::Io(msg) => write!(f, "Storage IO error: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "Corrupt record: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// One entry in the run history panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Which agent produced the result.
    pub agent: AgentKind,
    /// The prompt (or goal summary) that was submitted.
    pub prompt: String,
    /// The final text produced by the agent.
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// A saved, reusable prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub prompt: String,
    pub tags: Vec<String>,
    /// Placeholder names extracted from the prompt (`{{name}}` occurrences).
    pub variables: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// User-adjustable workspace settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub model: String,
    pub temperature: f32,
    pub custom_evaluation_rubric: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: 0.7,
            custom_evaluation_rubric: String::new(),
        }
    }
}

/// Append-only store of agent run history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: HistoryEntry) -> Result<(), StorageError>;
    async fn list(&self) -> Result<Vec<HistoryEntry>, StorageError>;
    async fn clear(&self) -> Result<(), StorageError>;
}

/// CRUD store of prompt templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn save(&self, template: PromptTemplate) -> Result<(), StorageError>;
    async fn get(&self, id: &str) -> Result<PromptTemplate, StorageError>;
    async fn list(&self) -> Result<Vec<PromptTemplate>, StorageError>;
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Store for workspace settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<AppSettings, StorageError>;
    async fn save(&self, settings: AppSettings) -> Result<(), StorageError>;
}

/// Pure, stateless scan for `{{name}}` placeholders in a template body.
///
/// Used by the template subsystem when saving a template; has no retry or
/// concurrency concerns, hence a plain synchronous trait.
pub trait VariableExtractor: Send + Sync {
    /// Return the distinct placeholder names in order of first appearance.
    fn extract(&self, template: &str) -> Vec<String>;
}
