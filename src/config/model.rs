//! Settings struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Service settings.
///
/// This struct represents the contents of `ai-engine.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // =========================================================================
    // General settings
    // =========================================================================
    /// Deployment environment; its profile supplies the three values below
    /// when they are not set explicitly.
    pub environment: Environment,

    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Debug mode: log lines carry their module path and source location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Upper bound for one execution engine call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    // =========================================================================
    // Sections
    // =========================================================================
    pub server: ServerSettings,

    pub catalog: CatalogSettings,

    pub retrieval: RetrievalSettings,

    pub engine: EngineSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: None,
            debug: None,
            timeout_seconds: None,
            server: ServerSettings::default(),
            catalog: CatalogSettings::default(),
            retrieval: RetrievalSettings::default(),
            engine: EngineSettings::default(),
        }
    }
}

impl Settings {
    /// Get the effective log level for this process.
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(self.environment.profile().log_level)
    }

    /// Get the effective debug flag for this process.
    pub fn effective_debug(&self) -> bool {
        self.debug.unwrap_or(self.environment.profile().debug)
    }

    /// Get the effective engine timeout in seconds.
    pub fn effective_timeout(&self) -> u64 {
        self.timeout_seconds
            .unwrap_or(self.environment.profile().timeout_seconds)
    }
}
