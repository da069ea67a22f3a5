//! Loading records from the static config files.
//!
//! Each file holds a mapping of name to record, written as JSON or YAML
//! (chosen by the file extension). A record that omits its name takes the
//! mapping key.

use super::model::Record;
use crate::error::{EngineError, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// File formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick a format from the file extension. Anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// Read and parse a record file.
///
/// A missing or unreadable file is an error.
pub fn load_records<T: Record>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        EngineError::Validation(format!(
            "failed to read {} config '{}': {}",
            T::KIND,
            path.display(),
            e
        ))
    })?;

    let records = parse_records::<T>(&content, FileFormat::from_path(path)).map_err(|e| match e {
        EngineError::Validation(msg) => {
            EngineError::Validation(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    debug!(kind = %T::KIND, path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Parse a name-to-record mapping and validate every record.
pub fn parse_records<T: Record>(content: &str, format: FileFormat) -> Result<Vec<T>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Option<BTreeMap<String, T>> = match format {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| {
            EngineError::Validation(format!("failed to parse {} JSON: {}", T::KIND, e))
        })?,
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
            EngineError::Validation(format!("failed to parse {} YAML: {}", T::KIND, e))
        })?,
    };

    let mut records = Vec::new();
    for (key, mut record) in entries.unwrap_or_default() {
        if record.name().is_empty() {
            record.set_name(key);
        } else if record.name() != key {
            return Err(EngineError::Validation(format!(
                "{} entry '{}' declares a different name '{}'",
                T::KIND,
                key,
                record.name()
            )));
        }
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}
