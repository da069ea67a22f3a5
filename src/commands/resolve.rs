//! Implementation of the `ai-engine resolve` command.

use crate::catalog::Catalog;
use crate::cli::ResolveArgs;
use crate::config::Settings;
use crate::error::{EngineError, Result};
use crate::resolver::Resolver;
use crate::tools::ToolRegistry;
use serde_json::{Map, Value};

/// Execute the `ai-engine resolve` command.
///
/// Loads the catalog named by the settings, resolves one crew and prints
/// it as pretty JSON on stdout.
pub fn cmd_resolve(settings: &Settings, args: ResolveArgs) -> anyhow::Result<()> {
    let catalog = Catalog::load(&settings.catalog)?;
    let tools = ToolRegistry::with_builtins(settings)?;

    let rendered = render_resolution(&catalog, &tools, &args.crew, args.schemas)?;
    println!("{}", rendered);
    Ok(())
}

/// Resolve `crew` and render it, or only its task output schemas.
fn render_resolution(
    catalog: &Catalog,
    tools: &ToolRegistry,
    crew: &str,
    schemas_only: bool,
) -> Result<String> {
    let resolved = Resolver::new(catalog, tools).resolve_crew(crew)?;

    let value = if schemas_only {
        let schemas: Map<String, Value> = resolved
            .tasks
            .iter()
            .map(|task| (task.name.clone(), task.output_schema.to_json_schema()))
            .collect();
        Value::Object(schemas)
    } else {
        serde_json::to_value(&resolved)
            .map_err(|e| EngineError::Internal(format!("failed to serialize crew: {}", e)))?
    };

    serde_json::to_string_pretty(&value)
        .map_err(|e| EngineError::Internal(format!("failed to serialize crew: {}", e)))
}
