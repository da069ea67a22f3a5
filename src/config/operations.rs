//! Settings loading, overrides, and validation.

use super::model::Settings;
use super::types::{EngineKind, Environment, parse_bool_flag};
use crate::error::{EngineError, Result};
use std::path::Path;
use std::str::FromStr;

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Successfully loaded and validated settings
    /// * `Err(EngineError::Validation)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Validation(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load settings from a YAML file if it exists.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Resolve the effective settings for this process.
    ///
    /// Layers, last wins: the environment profile, the settings file (if any),
    /// then process environment variables.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let default_file = Path::new(super::DEFAULT_SETTINGS_FILE);
        let mut settings = match path {
            Some(path) => Self::load(path)?,
            None => Self::load_optional(default_file)?.unwrap_or_default(),
        };
        settings.apply_overrides(|name| std::env::var(name).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)
            .map_err(|e| EngineError::Validation(format!("failed to parse settings YAML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EngineError::Internal(format!("failed to serialize settings: {}", e)))
    }

    /// Apply process environment variable overrides.
    ///
    /// `lookup` returns the value of a variable, if set.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ENVIRONMENT") {
            self.environment = Environment::from_str(&value).ok_or_else(|| {
                EngineError::Validation(format!(
                    "unknown ENVIRONMENT '{}' (expected development, staging or production)",
                    value
                ))
            })?;
        }

        if let Some(value) = lookup("LOG_LEVEL") {
            self.log_level = Some(value.to_lowercase());
        }
        if let Some(value) = lookup("DEBUG") {
            self.debug = Some(parse_bool_flag(&value));
        }
        if let Some(value) = lookup("TIMEOUT") {
            self.timeout_seconds = Some(cast_var("TIMEOUT", &value)?);
        }
        if let Some(value) = lookup("TOP_K") {
            self.retrieval.top_k = cast_var("TOP_K", &value)?;
        }
        if let Some(value) = lookup("RERANK_TOP_N") {
            self.retrieval.rerank_top_n = cast_var("RERANK_TOP_N", &value)?;
        }
        if let Some(value) = lookup("HOST") {
            self.server.host = value;
        }
        if let Some(value) = lookup("PORT") {
            self.server.port = cast_var("PORT", &value)?;
        }

        Ok(())
    }

    /// Validate settings values and return an error on invalid values.
    ///
    /// Validation rules:
    /// - `timeout_seconds` must be positive
    /// - `server.port` must be positive
    /// - `retrieval.top_k` and `retrieval.rerank_top_n` must be positive
    /// - `engine.command` must be set when `engine.kind` is `command`
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == Some(0) {
            return Err(EngineError::Validation(
                "settings validation failed: timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(EngineError::Validation(
                "settings validation failed: server.port must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.top_k == 0 || self.retrieval.rerank_top_n == 0 {
            return Err(EngineError::Validation(
                "settings validation failed: retrieval.top_k and retrieval.rerank_top_n must be greater than 0"
                    .to_string(),
            ));
        }

        if self.engine.kind == EngineKind::Command && self.engine.command.trim().is_empty() {
            return Err(EngineError::Validation(
                "settings validation failed: engine.command is required when engine.kind is 'command'"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// The listener address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn cast_var<T: FromStr>(name: &str, value: &str) -> Result<T> {
    let invalid = || EngineError::Validation(format!("cannot cast env var {}={}", name, value));
    value.trim().parse().map_err(|_| invalid())
}
