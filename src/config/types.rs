//! Settings types and defaults for ai-engine.
//!
//! This module defines the enums, nested sections and default value
//! functions used by the Settings struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Deployment environment. Each one carries a profile of overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Local development (default): debug on, verbose logging, long timeout.
    #[default]
    Development,
    /// Pre-production.
    Staging,
    /// Production: quiet logging, short timeout.
    Production,
}

impl Environment {
    /// Parse an environment from a string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Values this environment supplies when settings leave them unset.
    pub fn profile(&self) -> EnvironmentProfile {
        match self {
            Environment::Development => EnvironmentProfile {
                debug: true,
                log_level: "debug",
                timeout_seconds: 60,
            },
            Environment::Staging => EnvironmentProfile {
                debug: false,
                log_level: "info",
                timeout_seconds: 45,
            },
            Environment::Production => EnvironmentProfile {
                debug: false,
                log_level: "warn",
                timeout_seconds: 30,
            },
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Per-environment defaults for debug mode, log level and engine timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentProfile {
    pub debug: bool,
    pub log_level: &'static str,
    pub timeout_seconds: u64,
}

/// Which execution engine receives resolved crews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Render the task prompts in order without calling any model.
    #[default]
    DryRun,
    /// Hand the kickoff request to an external command over stdin.
    Command,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Locations of the static config files loaded at startup.
///
/// Relative file names are resolved against `dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub dir: PathBuf,
    pub models_file: String,
    pub agents_file: String,
    pub crews_file: String,

    /// Optional corpus for the built-in `document_search` tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_file: Option<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("config"),
            models_file: "models.yaml".to_string(),
            agents_file: "agents.yaml".to_string(),
            crews_file: "crews.yaml".to_string(),
            documents_file: None,
        }
    }
}

impl CatalogSettings {
    pub fn models_path(&self) -> PathBuf {
        self.dir.join(&self.models_file)
    }

    pub fn agents_path(&self) -> PathBuf {
        self.dir.join(&self.agents_file)
    }

    pub fn crews_path(&self) -> PathBuf {
        self.dir.join(&self.crews_file)
    }

    pub fn documents_path(&self) -> Option<PathBuf> {
        self.documents_file.as_ref().map(|f| self.dir.join(f))
    }
}

/// Retrieval defaults for the document search tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of candidates returned by the first-stage search.
    pub top_k: usize,
    /// Number of results kept after reranking.
    pub rerank_top_n: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            rerank_top_n: 5,
        }
    }
}

/// Execution engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub kind: EngineKind,

    /// Command line for the `command` engine (shell-words parsed; no shell).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub command: String,

    /// Extra environment variables for the engine process.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
}

// Default value functions for serde
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}
pub(crate) fn default_port() -> u16 {
    8000
}

/// Parse a boolean flag the way the service's environment variables are written.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}
