//! Command implementations for ai-engine.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Library errors are `EngineError`s; the binary edge wraps
//! them in `anyhow` so socket and runtime failures can carry context too.

mod check;
mod resolve;
mod serve;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, prelude::*};

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli.settings.as_deref())?;

    match cli.command {
        Command::Serve(args) => serve::cmd_serve(settings, args),
        Command::Resolve(args) => resolve::cmd_resolve(&settings, args),
        Command::Check => check::cmd_check(&settings),
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins; otherwise the settings' effective log level is used.
fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.effective_log_level()));

    let debug = settings.effective_debug();
    let layer = fmt::layer()
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init();
}
