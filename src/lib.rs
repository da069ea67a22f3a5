//! ai-engine: stores model, agent and crew configurations and resolves a
//! crew into a runnable pipeline of tasks, each bound to a fully resolved
//! agent (model and tools attached) and a typed output schema.
//!
//! The library exposes the catalog, the resolver, the tool registry and the
//! HTTP router; the `ai-engine` binary wires them together.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod resolver;
pub mod tools;

#[cfg(test)]
mod test_support;
