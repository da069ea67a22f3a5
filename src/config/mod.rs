//! Settings model for ai-engine.
//!
//! This module defines the Settings struct that represents `ai-engine.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, environment profiles, variable
//! overrides, and validation of settings values.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

/// Settings file read when no path is given on the command line.
pub const DEFAULT_SETTINGS_FILE: &str = "ai-engine.yaml";

// Re-export public API
pub use model::Settings;
pub use types::{
    CatalogSettings, EngineKind, EngineSettings, Environment, EnvironmentProfile, RetrievalSettings,
    ServerSettings,
};
