//! Tests for settings functionality.

use crate::config::{EngineKind, Environment, Settings};
use serial_test::serial;
use std::collections::HashMap;
use tempfile::TempDir;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.environment, Environment::Development);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.retrieval.top_k, 5);
    assert_eq!(settings.retrieval.rerank_top_n, 5);
    assert_eq!(settings.engine.kind, EngineKind::DryRun);
    assert_eq!(settings.catalog.models_file, "models.yaml");
    assert!(settings.catalog.documents_file.is_none());
}

#[test]
fn test_development_profile_fills_unset_values() {
    let settings = Settings::default();

    assert!(settings.effective_debug());
    assert_eq!(settings.effective_log_level(), "debug");
    assert_eq!(settings.effective_timeout(), 60);
}

#[test]
fn test_staging_and_production_profiles() {
    let staging = Settings::from_yaml("environment: staging").unwrap();
    assert!(!staging.effective_debug());
    assert_eq!(staging.effective_log_level(), "info");
    assert_eq!(staging.effective_timeout(), 45);

    let production = Settings::from_yaml("environment: production").unwrap();
    assert!(!production.effective_debug());
    assert_eq!(production.effective_log_level(), "warn");
    assert_eq!(production.effective_timeout(), 30);
}

#[test]
fn test_explicit_file_values_beat_profile() {
    let yaml = r#"
environment: production
log_level: trace
timeout_seconds: 90
"#;
    let settings = Settings::from_yaml(yaml).unwrap();

    assert_eq!(settings.effective_log_level(), "trace");
    assert_eq!(settings.effective_timeout(), 90);
    // Unset values still come from the profile
    assert!(!settings.effective_debug());
}

#[test]
fn test_parse_minimal_yaml() {
    let settings = Settings::from_yaml("").unwrap();
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.engine.kind, EngineKind::DryRun);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
environment: staging
debug: true
server:
  host: 127.0.0.1
  port: 9100
catalog:
  dir: /etc/ai-engine
  models_file: models.json
  agents_file: agents.json
  crews_file: crews.json
  documents_file: documents.yaml
retrieval:
  top_k: 10
  rerank_top_n: 3
engine:
  kind: command
  command: "python run_crew.py --json"
  environment:
    AZURE_API_VERSION: "2024-06-01"
"#;
    let settings = Settings::from_yaml(yaml).unwrap();

    assert_eq!(settings.environment, Environment::Staging);
    assert!(settings.effective_debug());
    assert_eq!(settings.bind_address(), "127.0.0.1:9100");
    assert_eq!(
        settings.catalog.models_path(),
        std::path::PathBuf::from("/etc/ai-engine/models.json")
    );
    assert_eq!(
        settings.catalog.documents_path(),
        Some(std::path::PathBuf::from("/etc/ai-engine/documents.yaml"))
    );
    assert_eq!(settings.retrieval.top_k, 10);
    assert_eq!(settings.retrieval.rerank_top_n, 3);
    assert_eq!(settings.engine.kind, EngineKind::Command);
    assert_eq!(
        settings.engine.environment.get("AZURE_API_VERSION"),
        Some(&"2024-06-01".to_string())
    );
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
environment: development
future_setting: true
server:
  port: 8080
  keepalive: 30
"#;
    let settings = Settings::from_yaml(yaml).unwrap();
    assert_eq!(settings.server.port, 8080);
}

#[test]
fn test_invalid_environment_fails_parse() {
    let result = Settings::from_yaml("environment: moon");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("failed to parse settings YAML")
    );
}

#[test]
fn test_zero_timeout_fails() {
    let result = Settings::from_yaml("timeout_seconds: 0");
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("timeout_seconds must be greater than 0")
    );
}

#[test]
fn test_zero_top_k_fails() {
    let yaml = r#"
retrieval:
  top_k: 0
"#;
    let result = Settings::from_yaml(yaml);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("retrieval.top_k"));
}

#[test]
fn test_command_engine_requires_command() {
    let yaml = r#"
engine:
  kind: command
"#;
    let result = Settings::from_yaml(yaml);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("engine.command is required")
    );
}

#[test]
fn test_env_overrides_apply() {
    let mut settings = Settings::default();
    settings
        .apply_overrides(lookup_from(&[
            ("ENVIRONMENT", "Production"),
            ("LOG_LEVEL", "ERROR"),
            ("TIMEOUT", "12"),
            ("TOP_K", "8"),
            ("RERANK_TOP_N", "2"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
        ]))
        .unwrap();

    assert_eq!(settings.environment, Environment::Production);
    assert_eq!(settings.effective_log_level(), "error");
    assert_eq!(settings.effective_timeout(), 12);
    assert!(!settings.effective_debug());
    assert_eq!(settings.retrieval.top_k, 8);
    assert_eq!(settings.retrieval.rerank_top_n, 2);
    assert_eq!(settings.bind_address(), "127.0.0.1:9000");
}

#[test]
fn test_debug_flag_spellings() {
    for value in ["1", "true", "YES", "y", "on"] {
        let mut settings = Settings::from_yaml("environment: production").unwrap();
        settings
            .apply_overrides(lookup_from(&[("DEBUG", value)]))
            .unwrap();
        assert!(settings.effective_debug(), "DEBUG={} should enable debug", value);
    }

    let mut settings = Settings::default();
    settings
        .apply_overrides(lookup_from(&[("DEBUG", "off")]))
        .unwrap();
    assert!(!settings.effective_debug());
}

#[test]
fn test_env_override_cast_failure() {
    let mut settings = Settings::default();
    let result = settings.apply_overrides(lookup_from(&[("TIMEOUT", "soon")]));
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().to_string(),
        "Validation error: cannot cast env var TIMEOUT=soon"
    );
}

#[test]
fn test_unknown_environment_override_fails() {
    let mut settings = Settings::default();
    let result = settings.apply_overrides(lookup_from(&[("ENVIRONMENT", "qa")]));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("unknown ENVIRONMENT"));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ai-engine.yaml");
    std::fs::write(&path, "server:\n  port: 7000\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.server.port, 7000);
}

#[test]
fn test_load_optional_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.yaml");

    assert!(Settings::load_optional(&path).unwrap().is_none());
    assert!(Settings::load(&path).is_err());
}

#[test]
fn test_yaml_round_trip() {
    let yaml = r#"
environment: staging
log_level: info
engine:
  kind: command
  command: "run-crew"
"#;
    let settings = Settings::from_yaml(yaml).unwrap();
    let out = settings.to_yaml().unwrap();
    let reparsed = Settings::from_yaml(&out).unwrap();

    assert_eq!(reparsed.environment, Environment::Staging);
    assert_eq!(reparsed.log_level.as_deref(), Some("info"));
    assert_eq!(reparsed.engine.command, "run-crew");
    assert!(reparsed.debug.is_none());
}

#[test]
#[serial]
fn test_resolve_reads_process_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.yaml");
    std::fs::write(&path, "environment: development\n").unwrap();

    // SAFETY: serialized with the other tests that touch the process environment.
    unsafe {
        std::env::set_var("ENVIRONMENT", "staging");
        std::env::set_var("PORT", "8123");
    }
    let result = Settings::resolve(Some(&path));
    unsafe {
        std::env::remove_var("ENVIRONMENT");
        std::env::remove_var("PORT");
    }

    let settings = result.unwrap();
    assert_eq!(settings.environment, Environment::Staging);
    assert_eq!(settings.server.port, 8123);
    assert_eq!(settings.effective_timeout(), 45);
}

#[test]
#[serial]
fn test_resolve_rejects_bad_port_variable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.yaml");
    std::fs::write(&path, "").unwrap();

    // SAFETY: serialized with the other tests that touch the process environment.
    unsafe {
        std::env::set_var("PORT", "0");
    }
    let result = Settings::resolve(Some(&path));
    unsafe {
        std::env::remove_var("PORT");
    }

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("server.port must be greater than 0")
    );
}
