//! Implementation of the `ai-engine check` command.
//!
//! Loads all config files and resolves every agent and every crew, so that
//! dangling references are found before the service is deployed.

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::error::{EngineError, Result};
use crate::resolver::Resolver;
use crate::tools::ToolRegistry;

/// Outcome of resolving everything in a catalog.
#[derive(Debug, Default)]
struct CheckReport {
    lines: Vec<String>,
    failures: usize,
    checked: usize,
}

impl CheckReport {
    fn record<T>(&mut self, label: &str, result: Result<T>) {
        self.checked += 1;
        match result {
            Ok(_) => self.lines.push(format!("ok    {}", label)),
            Err(e) => {
                self.failures += 1;
                self.lines.push(format!("FAIL  {}: {}", label, e));
            }
        }
    }
}

/// Execute the `ai-engine check` command.
pub fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let catalog = Catalog::load(&settings.catalog)?;
    let tools = ToolRegistry::with_builtins(settings)?;

    let report = check_catalog(&catalog, &tools);
    for line in &report.lines {
        println!("{}", line);
    }

    if report.failures > 0 {
        return Err(EngineError::Dependency(format!(
            "{} of {} entities failed to resolve",
            report.failures, report.checked
        ))
        .into());
    }

    println!("{} entities resolved", report.checked);
    Ok(())
}

fn check_catalog(catalog: &Catalog, tools: &ToolRegistry) -> CheckReport {
    let resolver = Resolver::new(catalog, tools);
    let mut report = CheckReport::default();

    for agent in catalog.agents.list() {
        let label = format!("agent {}", agent.name);
        report.record(&label, resolver.resolve_agent(&agent.name));
    }
    for crew in catalog.crews.list() {
        let label = format!("crew {}", crew.name);
        report.record(&label, resolver.resolve_crew(&crew.name));
    }

    report
}
