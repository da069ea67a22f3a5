//! Error types for the ai-engine service.
//!
//! Uses thiserror for derive macros. Every variant maps to exactly one HTTP
//! status (for the API surface) and one exit code (for the CLI).

use crate::exit_codes;
use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for ai-engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The named entity does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    /// An entity with the same name already exists.
    #[error("{kind} '{name}' already exists")]
    Conflict { kind: EntityKind, name: String },

    /// A config record or request has an invalid shape.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced model, agent, tool or task could not be resolved.
    #[error("Dependency error: {0}")]
    Dependency(String),

    /// An output-schema descriptor could not be synthesized.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Anything else, including execution engine failures.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while synthesizing an output schema from a JSON descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("schema JSON must represent an object")]
    NotAnObject,

    #[error("field '{field}' has unsupported type '{kind}'")]
    UnknownKind { field: String, kind: String },

    #[error("schema field names must be non-empty")]
    EmptyFieldName,
}

/// The kinds of named records the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Model,
    Tool,
    Agent,
    Crew,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Model => write!(f, "Model"),
            EntityKind::Tool => write!(f, "Tool"),
            EntityKind::Agent => write!(f, "Agent"),
            EntityKind::Crew => write!(f, "Crew"),
        }
    }
}

impl EngineError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a `Conflict` error.
    pub fn conflict(kind: EntityKind, name: impl Into<String>) -> Self {
        EngineError::Conflict {
            kind,
            name: name.into(),
        }
    }

    /// Returns the HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
            EngineError::Conflict { .. } => StatusCode::CONFLICT,
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::Dependency(_) => StatusCode::BAD_REQUEST,
            EngineError::Schema(_) => StatusCode::BAD_REQUEST,
            EngineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the process exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::NotFound { .. } => exit_codes::USER_ERROR,
            EngineError::Conflict { .. } => exit_codes::USER_ERROR,
            EngineError::Validation(_) => exit_codes::INVALID_CONFIG,
            EngineError::Schema(_) => exit_codes::INVALID_CONFIG,
            EngineError::Dependency(_) => exit_codes::RESOLUTION_FAILURE,
            EngineError::Internal(_) => exit_codes::INTERNAL_FAILURE,
        }
    }
}

/// Result type alias for ai-engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
