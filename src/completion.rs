//! Crew completions.
//!
//! A completion request carries a chat transcript. The last message must
//! come from the user; it becomes the crew's query and every earlier
//! message becomes chat history.

use crate::catalog::Catalog;
use crate::engine::{CrewEngine, KickoffInputs};
use crate::error::{EngineError, Result};
use crate::resolver::Resolver;
use crate::tools::ToolRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionResponse {
    pub crew: String,

    /// The engine's raw text output.
    pub message: String,

    /// The raw output decoded as JSON, when it is JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,

    pub created: DateTime<Utc>,
}

/// Split a transcript into kickoff inputs.
///
/// # Errors
///
/// `Validation` if the transcript is empty or does not end with a user message.
pub fn kickoff_inputs(messages: &[Message]) -> Result<KickoffInputs> {
    let Some((last, history)) = messages.split_last() else {
        return Err(EngineError::Validation(
            "Messages list cannot be empty".to_string(),
        ));
    };
    if last.role != Role::User {
        return Err(EngineError::Validation(format!(
            "Last message must be from user, got '{}'",
            last.role
        )));
    }

    Ok(KickoffInputs {
        user_query: last.content.clone(),
        chat_history: history.to_vec(),
        context: String::new(),
    })
}

/// Run `crew` against a transcript.
///
/// The transcript is checked before the crew is looked up.
pub async fn create_crew_completion(
    catalog: &Catalog,
    tools: &ToolRegistry,
    engine: &dyn CrewEngine,
    crew: &str,
    messages: &[Message],
) -> Result<CompletionResponse> {
    let inputs = kickoff_inputs(messages)?;
    let resolved = Resolver::new(catalog, tools).resolve_crew(crew)?;

    info!(
        crew,
        engine = engine.name(),
        history = inputs.chat_history.len(),
        "crew kickoff"
    );
    let output = engine.kickoff(&resolved, &inputs).await.map_err(|e| {
        error!(crew, error = %e, "crew kickoff failed");
        EngineError::Internal(format!("Error processing crew: {}", e))
    })?;

    let structured = serde_json::from_str::<Value>(output.raw.trim()).ok();
    Ok(CompletionResponse {
        crew: resolved.name,
        message: output.raw,
        structured,
        created: Utc::now(),
    })
}
