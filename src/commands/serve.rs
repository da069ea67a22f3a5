//! Implementation of the `ai-engine serve` command.

use super::init_logging;
use crate::api::{AppState, router};
use crate::catalog::Catalog;
use crate::cli::ServeArgs;
use crate::config::Settings;
use crate::engine::build_engine;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

/// Execute the `ai-engine serve` command.
///
/// Everything that can fail on bad config (settings, catalog files, tool
/// corpus, engine command) is checked before the listener is bound.
pub fn cmd_serve(mut settings: Settings, args: ServeArgs) -> Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    settings.validate()?;

    init_logging(&settings);

    let catalog = Catalog::load(&settings.catalog)?;
    let tools = ToolRegistry::with_builtins(&settings)?;
    let engine = build_engine(&settings)?;
    let state = AppState::new(catalog, tools, engine, settings);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(run(state))
}

async fn run(state: AppState) -> Result<()> {
    let addr = state.settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        %addr,
        environment = %state.settings.environment,
        engine = state.engine.name(),
        "ai-engine listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("ai-engine stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
