//! CLI argument parsing for ai-engine.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ai-engine: stores model, agent and crew configurations and resolves
/// crews into runnable agent pipelines.
#[derive(Parser, Debug)]
#[command(name = "ai-engine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to ./ai-engine.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for ai-engine.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service.
    ///
    /// Loads the catalog files, registers the built-in tools and serves
    /// the config and completion endpoints until Ctrl-C.
    Serve(ServeArgs),

    /// Resolve a crew and print the pipeline as JSON.
    Resolve(ResolveArgs),

    /// Load every config file and resolve every agent and crew.
    ///
    /// Prints one line per entity and fails if any of them does not resolve.
    Check,
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Override the listen host.
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Crew name.
    pub crew: String,

    /// Print JSON Schemas for the task outputs instead of the full pipeline.
    #[arg(long)]
    pub schemas: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
