use crate::catalog::{
    AgentConfig, Catalog, CrewConfig, FileFormat, ModelConfig, Provider, Store, TaskConfig,
    parse_records,
};
use crate::config::CatalogSettings;
use crate::error::Result;
use crate::tools::{DocumentSearchTool, ToolCapability, ToolRegistry};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) const MODELS_YAML: &str = include_str!("../config/models.yaml");
pub(crate) const AGENTS_YAML: &str = include_str!("../config/agents.yaml");
pub(crate) const CREWS_YAML: &str = include_str!("../config/crews.yaml");
pub(crate) const DOCUMENTS_YAML: &str = include_str!("../config/documents.yaml");

/// The shipped catalog: one model, three agents and `document_search_crew`.
pub(crate) fn sample_catalog() -> Catalog {
    Catalog {
        models: Store::from_records(parse_records(MODELS_YAML, FileFormat::Yaml).unwrap()).unwrap(),
        agents: Store::from_records(parse_records(AGENTS_YAML, FileFormat::Yaml).unwrap()).unwrap(),
        crews: Store::from_records(parse_records(CREWS_YAML, FileFormat::Yaml).unwrap()).unwrap(),
    }
}

/// A registry holding `document_search` over the shipped corpus.
pub(crate) fn sample_registry() -> ToolRegistry {
    let documents = serde_yaml::from_str(DOCUMENTS_YAML).unwrap();
    let registry = ToolRegistry::new();
    registry
        .register(Arc::new(DocumentSearchTool::new(documents, 5, 5)))
        .unwrap();
    registry
}

/// Write the shipped catalog files into a temp dir and point settings at it.
pub(crate) fn write_sample_catalog() -> (TempDir, CatalogSettings) {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "models.yaml", MODELS_YAML);
    write_file(temp_dir.path(), "agents.yaml", AGENTS_YAML);
    write_file(temp_dir.path(), "crews.yaml", CREWS_YAML);
    write_file(temp_dir.path(), "documents.yaml", DOCUMENTS_YAML);

    let settings = CatalogSettings {
        dir: temp_dir.path().to_path_buf(),
        documents_file: Some("documents.yaml".to_string()),
        ..CatalogSettings::default()
    };
    (temp_dir, settings)
}

pub(crate) fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

pub(crate) fn model(key: &str) -> ModelConfig {
    ModelConfig {
        key: key.to_string(),
        model: key.to_string(),
        provider: Provider::Openai,
        temperature: 0.2,
        max_tokens: 1024,
        top_p: None,
    }
}

pub(crate) fn agent(name: &str, model: &str, tools: &[&str]) -> AgentConfig {
    AgentConfig {
        name: name.to_string(),
        role: format!("{} role", name),
        goal: format!("{} goal", name),
        backstory: String::new(),
        model: model.to_string(),
        tools: tools.iter().map(|t| t.to_string()).collect(),
        verbose: false,
    }
}

pub(crate) fn task(name: &str, agent: &str, context: &[&str]) -> TaskConfig {
    TaskConfig {
        name: name.to_string(),
        description: format!("Handle {{user_query}} for {}", name),
        expected_output: format!("{} result", name),
        agent: agent.to_string(),
        output_json: r#"{"answer": "str"}"#.to_string(),
        context: context.iter().map(|c| c.to_string()).collect(),
    }
}

pub(crate) fn crew(name: &str, workflow: Vec<TaskConfig>) -> CrewConfig {
    CrewConfig {
        name: name.to_string(),
        description: format!("{} crew", name),
        process: Default::default(),
        verbose: false,
        workflow,
    }
}

/// A tool that echoes its arguments.
pub(crate) struct EchoTool(pub(crate) &'static str);

impl ToolCapability for EchoTool {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "Echo the arguments back"
    }

    fn args_schema(&self) -> Value {
        json!({"type": "object"})
    }

    fn invoke(&self, args: Value) -> Result<Value> {
        Ok(json!({"tool": self.0, "args": args}))
    }
}
