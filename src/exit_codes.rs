//! Exit code constants for the ai-engine CLI.
//!
//! - 0: Success
//! - 1: User error (unknown entity, duplicate name, bad arguments)
//! - 2: Invalid configuration (settings, records, schema descriptors)
//! - 3: Resolution failure (missing model/agent/tool/context task)
//! - 4: Internal failure (server or engine error)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: unknown entity or duplicate name.
pub const USER_ERROR: i32 = 1;

/// Invalid configuration: settings file, config records or schema descriptors.
pub const INVALID_CONFIG: i32 = 2;

/// Resolution failure: a referenced model, agent, tool or task is missing.
pub const RESOLUTION_FAILURE: i32 = 3;

/// Internal failure: server startup or execution engine error.
pub const INTERNAL_FAILURE: i32 = 4;
