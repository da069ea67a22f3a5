//! Stored configuration records.
//!
//! These are the shapes held by the config store and exchanged over the
//! HTTP surface. Each kind implements [`Record`] so a single generic store
//! can manage all of them.
//!
//! # File Format
//!
//! ```yaml
//! orchestrator:
//!   role: "Request Orchestrator"
//!   goal: "Validate the user request and route it"
//!   backstory: "You triage every incoming question."
//!   model: gpt-4o-mini
//!   tools: []
//! ```

use crate::error::{EngineError, EntityKind, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Pattern every stored entity name and task name must match.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").expect("Invalid entity name regex")
});

/// Check that `name` is a valid entity name.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EngineError::Validation(format!(
            "{} name cannot be empty",
            kind
        )));
    }
    if !NAME_REGEX.is_match(name) {
        return Err(EngineError::Validation(format!(
            "invalid {} name '{}': expected 1-64 characters of letters, digits, '_', '.' or '-' starting with a letter or digit",
            kind, name
        )));
    }
    Ok(())
}

/// A named record managed by a [`Store`](super::Store).
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The entity kind, used in error messages.
    const KIND: EntityKind;

    /// The record's identity.
    fn name(&self) -> &str;

    /// Overwrite the record's identity (used when a file entry omits it).
    fn set_name(&mut self, name: String);

    /// Check the record's shape.
    fn validate(&self) -> Result<()>;
}

// ============================================================================
// Models
// ============================================================================

/// Model providers the service knows how to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Openai,
    Azure,
    Anthropic,
    Google,
    Ollama,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Provider::Openai => "openai",
            Provider::Azure => "azure",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::Ollama => "ollama",
        };
        write!(f, "{}", s)
    }
}

/// A language model configuration, identified by `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub key: String,

    /// Underlying model name sent to the provider.
    pub model: String,

    pub provider: Provider,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

impl Record for ModelConfig {
    const KIND: EntityKind = EntityKind::Model;

    fn name(&self) -> &str {
        &self.key
    }

    fn set_name(&mut self, name: String) {
        self.key = name;
    }

    fn validate(&self) -> Result<()> {
        validate_name("model", &self.key)?;

        if self.model.trim().is_empty() {
            return Err(EngineError::Validation(format!(
                "model '{}' has an empty model name",
                self.key
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(EngineError::Validation(format!(
                "model '{}' has temperature {} outside 0.0..=2.0",
                self.key, self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(EngineError::Validation(format!(
                "model '{}' must allow at least one token",
                self.key
            )));
        }
        if let Some(top_p) = self.top_p
            && !(top_p > 0.0 && top_p <= 1.0)
        {
            return Err(EngineError::Validation(format!(
                "model '{}' has top_p {} outside (0.0, 1.0]",
                self.key, top_p
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Agents
// ============================================================================

/// A named persona bound to a model and a list of tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,

    /// Key of the model this agent runs on.
    pub model: String,

    /// Tool names, in the order they are offered to the agent.
    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub verbose: bool,
}

impl Record for AgentConfig {
    const KIND: EntityKind = EntityKind::Agent;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn validate(&self) -> Result<()> {
        validate_name("agent", &self.name)?;

        for (field, value) in [("role", &self.role), ("goal", &self.goal)] {
            if value.trim().is_empty() {
                return Err(EngineError::Validation(format!(
                    "agent '{}' has an empty {}",
                    self.name, field
                )));
            }
        }
        if self.model.trim().is_empty() {
            return Err(EngineError::Validation(format!(
                "agent '{}' does not name a model",
                self.name
            )));
        }
        if let Some(tool) = self.tools.iter().find(|t| t.trim().is_empty()) {
            return Err(EngineError::Validation(format!(
                "agent '{}' lists an empty tool name '{}'",
                self.name, tool
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Crews
// ============================================================================

/// How a crew runs its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    #[default]
    Sequential,
    /// Parsed so configs using it get a resolution error rather than a parse error.
    Hierarchical,
}

impl std::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessKind::Sequential => write!(f, "sequential"),
            ProcessKind::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// One step of a crew workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    pub description: String,
    pub expected_output: String,

    /// Name of the agent that performs this task.
    pub agent: String,

    /// Output-schema descriptor: JSON text mapping field name to type name.
    pub output_json: String,

    /// Names of earlier tasks whose output this task consumes.
    #[serde(default)]
    pub context: Vec<String>,
}

/// A named, ordered workflow of tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewConfig {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub process: ProcessKind,

    #[serde(default)]
    pub verbose: bool,

    pub workflow: Vec<TaskConfig>,
}

impl Record for CrewConfig {
    const KIND: EntityKind = EntityKind::Crew;

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Shape checks only. References to agents and earlier tasks are checked
    /// at resolution time, since they can change after the crew is stored.
    fn validate(&self) -> Result<()> {
        validate_name("crew", &self.name)?;

        for task in &self.workflow {
            validate_name("task", &task.name).map_err(|e| match e {
                EngineError::Validation(msg) => {
                    EngineError::Validation(format!("crew '{}': {}", self.name, msg))
                }
                other => other,
            })?;
            if task.agent.trim().is_empty() {
                return Err(EngineError::Validation(format!(
                    "crew '{}': task '{}' does not name an agent",
                    self.name, task.name
                )));
            }
        }
        Ok(())
    }
}
