//! Engine that renders the plan without calling any model.

use super::{CrewEngine, CrewOutput, KickoffInputs, TaskOutput, render_prompts};
use crate::error::Result;
use crate::resolver::ResolvedCrew;
use async_trait::async_trait;
use tracing::debug;

/// Walks the tasks in order and reports what each agent would be asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunEngine;

#[async_trait]
impl CrewEngine for DryRunEngine {
    fn name(&self) -> &'static str {
        "dry_run"
    }

    async fn kickoff(&self, crew: &ResolvedCrew, inputs: &KickoffInputs) -> Result<CrewOutput> {
        let prompts = render_prompts(crew, inputs)?;

        let mut tasks = Vec::with_capacity(prompts.len());
        for (task, prompt) in crew.tasks.iter().zip(prompts) {
            let mut raw = format!(
                "[{}] {} ({}/{})\n{}\nExpected output: {}",
                task.name,
                task.agent.role,
                task.agent.model.provider,
                task.agent.model.model,
                prompt.description.trim_end(),
                prompt.expected_output.trim_end(),
            );
            if !task.context.is_empty() {
                raw.push_str(&format!("\nContext: {}", task.context.join(", ")));
            }
            debug!(crew = %crew.name, task = %task.name, "dry run task");
            tasks.push(TaskOutput {
                name: task.name.clone(),
                raw,
            });
        }

        let raw = tasks.last().map(|t| t.raw.clone()).unwrap_or_default();
        Ok(CrewOutput { raw, tasks })
    }
}
