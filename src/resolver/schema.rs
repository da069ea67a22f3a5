//! Output-schema synthesis.
//!
//! A task declares the shape of its result as a small JSON object mapping
//! field names to type names, for example
//! `{"decision": "str", "sources": "List[str]"}`. [`synthesize`] turns that
//! descriptor into an [`OutputSchema`] over a closed set of [`FieldKind`]s.
//! Unknown type names are rejected.

use crate::error::{EngineError, Result, SchemaError};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Supported field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Bool,
    Integer,
    Float,
    StringList,
    Object,
}

impl FieldKind {
    /// Parse a descriptor type name. Whitespace inside the name is ignored.
    pub fn parse(type_name: &str) -> Option<Self> {
        let normalized: String = type_name.split_whitespace().collect();
        match normalized.as_str() {
            "str" | "string" => Some(Self::String),
            "bool" | "boolean" => Some(Self::Bool),
            "int" | "integer" => Some(Self::Integer),
            "float" | "number" => Some(Self::Float),
            "List[str]" | "list[str]" | "list" | "List" => Some(Self::StringList),
            "dict" | "Dict" | "object" | "Dict[str,Any]" => Some(Self::Object),
            _ => None,
        }
    }

    /// JSON Schema fragment for this kind.
    pub fn json_schema(&self) -> Value {
        match self {
            FieldKind::String => json!({"type": "string"}),
            FieldKind::Bool => json!({"type": "boolean"}),
            FieldKind::Integer => json!({"type": "integer"}),
            FieldKind::Float => json!({"type": "number"}),
            FieldKind::StringList => json!({"type": "array", "items": {"type": "string"}}),
            FieldKind::Object => json!({"type": "object"}),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Float => value.is_number(),
            FieldKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            FieldKind::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::StringList => "list of strings",
            FieldKind::Object => "object",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
}

/// A synthesized record type. Every field is required.
#[derive(Debug, Clone, Serialize)]
pub struct OutputSchema {
    pub type_name: String,
    pub fields: Vec<SchemaField>,

    /// Distinct for every call to [`synthesize`], even for identical input.
    pub instance_id: u64,
}

impl OutputSchema {
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Render as a JSON Schema object.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.kind.json_schema());
        }
        json!({
            "title": self.type_name,
            "type": "object",
            "properties": properties,
            "required": self.field_names(),
            "additionalProperties": false,
        })
    }

    /// Check that `value` is an object with exactly this schema's fields.
    pub fn validate(&self, value: &Value) -> Result<()> {
        let object = value.as_object().ok_or_else(|| {
            EngineError::Validation(format!("{}: expected a JSON object", self.type_name))
        })?;

        for field in &self.fields {
            match object.get(&field.name) {
                None => {
                    return Err(EngineError::Validation(format!(
                        "{}: missing field '{}'",
                        self.type_name, field.name
                    )));
                }
                Some(v) if !field.kind.matches(v) => {
                    return Err(EngineError::Validation(format!(
                        "{}: field '{}' must be {}",
                        self.type_name, field.name, field.kind
                    )));
                }
                Some(_) => {}
            }
        }

        if let Some(extra) = object.keys().find(|k| self.field(k).is_none()) {
            return Err(EngineError::Validation(format!(
                "{}: unexpected field '{}'",
                self.type_name, extra
            )));
        }
        Ok(())
    }
}

/// Build an output schema named `type_name` from a JSON descriptor.
pub fn synthesize(
    type_name: &str,
    descriptor_json: &str,
) -> std::result::Result<OutputSchema, SchemaError> {
    let value: Value = serde_json::from_str(descriptor_json)
        .map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(SchemaError::NotAnObject);
    }

    // Re-read as an ordered entry list; `Value` maps do not keep descriptor order.
    let entries: OrderedEntries = serde_json::from_str(descriptor_json)
        .map_err(|e| SchemaError::InvalidJson(e.to_string()))?;

    let mut fields = Vec::with_capacity(entries.0.len());
    for (name, raw_kind) in entries.0 {
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        let Some(kind) = raw_kind.as_str().and_then(FieldKind::parse) else {
            let kind = match raw_kind {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return Err(SchemaError::UnknownKind { field: name, kind });
        };
        fields.push(SchemaField { name, kind });
    }

    Ok(OutputSchema {
        type_name: type_name.to_string(),
        fields,
        instance_id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
    })
}

/// Object entries in document order.
struct OrderedEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Value)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(de::Error::custom(format!("duplicate field '{}'", key)));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
