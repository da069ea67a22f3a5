//! Config store for models, agents and crews.
//!
//! The catalog is loaded once at startup from three static files and then
//! mutated only through the store operations. Edits are not written back,
//! so a restart reverts to the file baseline.

mod loader;
pub mod model;
mod store;


pub use loader::{FileFormat, load_records, parse_records};
pub use model::{
    AgentConfig, CrewConfig, ModelConfig, ProcessKind, Provider, Record, TaskConfig,
    validate_name,
};
pub use store::Store;

use crate::config::CatalogSettings;
use crate::error::Result;
use tracing::info;

/// The three record stores.
#[derive(Debug, Default)]
pub struct Catalog {
    pub models: Store<ModelConfig>,
    pub agents: Store<AgentConfig>,
    pub crews: Store<CrewConfig>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all three files named by `settings`.
    pub fn load(settings: &CatalogSettings) -> Result<Self> {
        let catalog = Self {
            models: Store::from_records(load_records(&settings.models_path())?)?,
            agents: Store::from_records(load_records(&settings.agents_path())?)?,
            crews: Store::from_records(load_records(&settings.crews_path())?)?,
        };

        info!(
            models = catalog.models.len(),
            agents = catalog.agents.len(),
            crews = catalog.crews.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
