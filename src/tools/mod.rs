//! Tool registry.
//!
//! Tools are code, not configuration: each one implements [`ToolCapability`]
//! and is registered once at startup. Agents refer to tools by name, and the
//! registry turns those names into [`ToolDescriptor`]s at resolution time.

pub mod document_search;


pub use document_search::{Document, DocumentSearchTool};

use crate::config::Settings;
use crate::error::{EngineError, EntityKind, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Something an agent can call.
pub trait ToolCapability: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema describing the accepted arguments.
    fn args_schema(&self) -> Value;

    /// Run the tool with already-decoded JSON arguments.
    fn invoke(&self, args: Value) -> Result<Value>;
}

/// A registered tool: its public description plus the capability itself.
#[derive(Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub args_schema: Value,

    #[serde(skip)]
    pub capability: Arc<dyn ToolCapability>,
}

impl ToolDescriptor {
    pub fn new(capability: Arc<dyn ToolCapability>) -> Self {
        Self {
            name: capability.name().to_string(),
            description: capability.description().to_string(),
            args_schema: capability.args_schema(),
            capability,
        }
    }

    pub fn invoke(&self, args: Value) -> Result<Value> {
        self.capability.invoke(args)
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Tools keyed by name.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, ToolDescriptor>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in tools, configured from `settings`.
    pub fn with_builtins(settings: &Settings) -> Result<Self> {
        let documents = match settings.catalog.documents_path() {
            Some(path) => document_search::load_documents(&path)?,
            None => Vec::new(),
        };

        let search = DocumentSearchTool::new(
            documents,
            settings.retrieval.top_k,
            settings.retrieval.rerank_top_n,
        );
        info!(documents = search.document_count(), "document corpus loaded");

        let registry = Self::new();
        registry.register(Arc::new(search))?;
        Ok(registry)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, ToolDescriptor>> {
        self.tools.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, ToolDescriptor>> {
        self.tools.write().unwrap_or_else(|p| p.into_inner())
    }

    /// Register a tool. Fails with `Conflict` if the name is taken.
    pub fn register(&self, capability: Arc<dyn ToolCapability>) -> Result<ToolDescriptor> {
        let descriptor = ToolDescriptor::new(capability);
        crate::catalog::validate_name("tool", &descriptor.name)?;

        let mut tools = self.write();
        if tools.contains_key(&descriptor.name) {
            return Err(EngineError::conflict(EntityKind::Tool, &descriptor.name));
        }
        tools.insert(descriptor.name.clone(), descriptor.clone());
        info!(tool = %descriptor.name, "registered tool");
        Ok(descriptor)
    }

    pub fn get(&self, name: &str) -> Result<ToolDescriptor> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::not_found(EntityKind::Tool, name))
    }

    /// All tools, sorted by name.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.read().values().cloned().collect()
    }

    /// Swap the capability behind an existing name.
    pub fn replace(&self, capability: Arc<dyn ToolCapability>) -> Result<ToolDescriptor> {
        let descriptor = ToolDescriptor::new(capability);

        let mut tools = self.write();
        match tools.get_mut(&descriptor.name) {
            Some(slot) => {
                *slot = descriptor.clone();
                info!(tool = %descriptor.name, "replaced tool");
                Ok(descriptor)
            }
            None => Err(EngineError::not_found(EntityKind::Tool, &descriptor.name)),
        }
    }

    pub fn remove(&self, name: &str) -> Result<ToolDescriptor> {
        let removed = self
            .write()
            .remove(name)
            .ok_or_else(|| EngineError::not_found(EntityKind::Tool, name))?;
        info!(tool = name, "removed tool");
        Ok(removed)
    }

    /// Resolve tool names in order.
    ///
    /// Fails with `Dependency` naming every unknown tool.
    pub fn resolve_all(&self, names: &[String]) -> Result<Vec<ToolDescriptor>> {
        let tools = self.read();
        let mut resolved = Vec::with_capacity(names.len());
        let mut missing = Vec::new();

        for name in names {
            match tools.get(name) {
                Some(tool) => resolved.push(tool.clone()),
                None => missing.push(format!("'{}'", name)),
            }
        }

        if !missing.is_empty() {
            return Err(EngineError::Dependency(format!(
                "unknown tool(s) {} (registered: {})",
                missing.join(", "),
                available(&tools)
            )));
        }
        Ok(resolved)
    }
}

fn available(tools: &BTreeMap<String, ToolDescriptor>) -> String {
    if tools.is_empty() {
        "(none)".to_string()
    } else {
        tools.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}
