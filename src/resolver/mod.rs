//! Resolution of stored configuration into runnable descriptors.
//!
//! # Resolution Order
//!
//! 1. Crew by name
//! 2. For each task in workflow order: output schema, then agent
//!    (agent → model → tools), then context references
//! 3. The first failure aborts; no partial crew is returned
//!
//! Every call reads fresh snapshots of the stores. Nothing is cached.

mod agent;
mod crew;
pub mod schema;


pub use agent::ResolvedAgent;
pub use crew::{ResolvedCrew, ResolvedTask};
pub use schema::{FieldKind, OutputSchema, SchemaField, synthesize};

use crate::catalog::Catalog;
use crate::tools::ToolRegistry;

/// Read-only view over the stores used to resolve agents and crews.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    tools: &'a ToolRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog, tools: &'a ToolRegistry) -> Self {
        Self { catalog, tools }
    }
}
