//! Crew resolution.

use super::Resolver;
use super::agent::ResolvedAgent;
use super::schema::{OutputSchema, synthesize};
use crate::catalog::{ProcessKind, TaskConfig};
use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One task of a resolved crew.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTask {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: ResolvedAgent,
    pub output_schema: OutputSchema,

    /// Names of earlier tasks whose output this task consumes.
    pub context: Vec<String>,
}

/// A crew ready to hand to an execution engine. Built fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCrew {
    pub name: String,
    pub description: String,
    pub process: ProcessKind,
    pub verbose: bool,
    pub tasks: Vec<ResolvedTask>,
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedCrew {
    pub fn task(&self, name: &str) -> Option<&ResolvedTask> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// The task whose output is the crew's final answer.
    pub fn final_task(&self) -> Option<&ResolvedTask> {
        self.tasks.last()
    }
}

impl Resolver<'_> {
    /// Resolve a crew by name.
    ///
    /// Tasks are resolved in workflow order and the first failure aborts.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the crew does not exist
    /// - `Validation` for an unsupported process, an empty workflow or a
    ///   duplicate task name
    /// - `Schema` for a bad output descriptor
    /// - `Dependency` for a missing agent, model or tool, or a context entry
    ///   that does not name an earlier task
    pub fn resolve_crew(&self, name: &str) -> Result<ResolvedCrew> {
        let config = self.catalog.crews.get(name)?;

        if config.process != ProcessKind::Sequential {
            return Err(EngineError::Validation(format!(
                "crew '{}' uses process '{}'; only 'sequential' is supported",
                config.name, config.process
            )));
        }
        if config.workflow.is_empty() {
            return Err(EngineError::Validation(format!(
                "crew '{}' has an empty workflow",
                config.name
            )));
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut tasks = Vec::with_capacity(config.workflow.len());
        for task in config.workflow {
            let resolved = self.resolve_task(&config.name, task, &seen)?;
            seen.insert(resolved.name.clone());
            tasks.push(resolved);
        }

        debug!(crew = %config.name, tasks = tasks.len(), "resolved crew");

        Ok(ResolvedCrew {
            name: config.name,
            description: config.description,
            process: config.process,
            verbose: config.verbose,
            tasks,
            resolved_at: Utc::now(),
        })
    }

    /// Resolve one task; `earlier` holds the names of the tasks before it.
    fn resolve_task(
        &self,
        crew: &str,
        task: TaskConfig,
        earlier: &HashSet<String>,
    ) -> Result<ResolvedTask> {
        if earlier.contains(&task.name) {
            return Err(EngineError::Validation(format!(
                "crew '{}' defines task '{}' more than once",
                crew, task.name
            )));
        }

        let output_schema = synthesize(&format!("{}_Output", task.name), &task.output_json)?;

        let agent_config = match self.catalog.agents.get(&task.agent) {
            Ok(config) => config,
            Err(EngineError::NotFound { .. }) => {
                return Err(EngineError::Dependency(format!(
                    "task '{}' in crew '{}' references agent '{}', which does not exist",
                    task.name, crew, task.agent
                )));
            }
            Err(e) => return Err(e),
        };
        let agent = self.bind_agent(agent_config)?;

        if let Some(missing) = task.context.iter().find(|c| !earlier.contains(*c)) {
            return Err(EngineError::Dependency(format!(
                "task '{}' in crew '{}' uses context '{}', which is not an earlier task in the workflow",
                task.name, crew, missing
            )));
        }

        Ok(ResolvedTask {
            name: task.name,
            description: task.description,
            expected_output: task.expected_output,
            agent,
            output_schema,
            context: task.context,
        })
    }
}
