//! Agent resolution.

use super::Resolver;
use crate::catalog::{AgentConfig, ModelConfig};
use crate::error::{EngineError, Result};
use crate::tools::ToolDescriptor;
use serde::Serialize;
use tracing::debug;

/// An agent with its model and tools dereferenced.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAgent {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub model: ModelConfig,
    pub tools: Vec<ToolDescriptor>,
    pub verbose: bool,
}

impl Resolver<'_> {
    /// Resolve an agent by name.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the agent does not exist
    /// - `Dependency` if its model or any of its tools does not exist
    pub fn resolve_agent(&self, name: &str) -> Result<ResolvedAgent> {
        let config = self.catalog.agents.get(name)?;
        self.bind_agent(config)
    }

    /// Resolve an agent config that has already been fetched.
    pub(super) fn bind_agent(&self, config: AgentConfig) -> Result<ResolvedAgent> {
        let model = match self.catalog.models.get(&config.model) {
            Ok(model) => model,
            Err(EngineError::NotFound { .. }) => {
                return Err(EngineError::Dependency(format!(
                    "model '{}' referenced by agent '{}' does not exist",
                    config.model, config.name
                )));
            }
            Err(e) => return Err(e),
        };

        let tools = self.tools.resolve_all(&config.tools).map_err(|e| match e {
            EngineError::Dependency(msg) => {
                EngineError::Dependency(format!("agent '{}' references {}", config.name, msg))
            }
            other => other,
        })?;

        debug!(
            agent = %config.name,
            model = %model.key,
            tools = tools.len(),
            "resolved agent"
        );

        Ok(ResolvedAgent {
            name: config.name,
            role: config.role,
            goal: config.goal,
            backstory: config.backstory,
            model,
            tools,
            verbose: config.verbose,
        })
    }
}
