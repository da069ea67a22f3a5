//! Execution engines for resolved crews.
//!
//! The multi-agent engine itself lives outside this service. [`CrewEngine`]
//! is the seam: it receives a [`ResolvedCrew`] plus the kickoff inputs and
//! returns the crew's raw output. Two engines ship with the service:
//!
//! - [`DryRunEngine`] renders each task prompt in order and returns the plan
//! - [`CommandEngine`] hands the request to an external command over stdin

mod command;
mod dry_run;
pub mod template;

#[cfg(test)]
mod tests;

pub use command::CommandEngine;
pub use dry_run::DryRunEngine;
pub use template::{TemplateError, render_template};

use crate::completion::Message;
use crate::config::{EngineKind, Settings};
use crate::error::{EngineError, Result};
use crate::resolver::{ResolvedCrew, ResolvedTask};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Inputs passed to a crew at kickoff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KickoffInputs {
    pub user_query: String,
    pub chat_history: Vec<Message>,
    pub context: String,
}

impl KickoffInputs {
    /// Template variables available to task descriptions.
    pub fn variables(&self) -> HashMap<String, String> {
        let history = self
            .chat_history
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n");

        HashMap::from([
            ("user_query".to_string(), self.user_query.clone()),
            ("chat_history".to_string(), history),
            ("context".to_string(), self.context.clone()),
        ])
    }
}

/// Output of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    pub name: String,
    pub raw: String,
}

/// Output of a whole crew run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewOutput {
    /// The crew's final answer (the last task's output).
    pub raw: String,
    #[serde(default)]
    pub tasks: Vec<TaskOutput>,
}

/// A task's description and expected output with the inputs filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPrompt {
    pub task: String,
    pub description: String,
    pub expected_output: String,
}

/// Render the prompt for one task.
pub fn render_task_prompt(
    task: &ResolvedTask,
    variables: &HashMap<String, String>,
) -> Result<TaskPrompt> {
    let render = |field: &str, text: &str| {
        render_template(text, variables).map_err(|e| {
            EngineError::Validation(format!("task '{}' {}: {}", task.name, field, e))
        })
    };

    Ok(TaskPrompt {
        task: task.name.clone(),
        description: render("description", &task.description)?,
        expected_output: render("expected_output", &task.expected_output)?,
    })
}

/// Render every task prompt of `crew` in workflow order.
pub fn render_prompts(crew: &ResolvedCrew, inputs: &KickoffInputs) -> Result<Vec<TaskPrompt>> {
    let variables = inputs.variables();
    crew.tasks
        .iter()
        .map(|task| render_task_prompt(task, &variables))
        .collect()
}

/// Runs a resolved crew.
#[async_trait]
pub trait CrewEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    async fn kickoff(&self, crew: &ResolvedCrew, inputs: &KickoffInputs) -> Result<CrewOutput>;
}

/// Build the engine selected by `settings.engine.kind`.
pub fn build_engine(settings: &Settings) -> Result<Arc<dyn CrewEngine>> {
    let engine: Arc<dyn CrewEngine> = match settings.engine.kind {
        EngineKind::DryRun => Arc::new(DryRunEngine),
        EngineKind::Command => Arc::new(CommandEngine::new(
            &settings.engine.command,
            settings.engine.environment.clone(),
            Duration::from_secs(settings.effective_timeout()),
        )?),
    };
    info!(engine = engine.name(), "execution engine ready");
    Ok(engine)
}
