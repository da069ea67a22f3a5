//! HTTP surface.
//!
//! ```text
//! GET  /                                 liveness
//! GET  /health                           liveness
//! *    /v1/models, /v1/agents, /v1/crews CRUD (see `crud`)
//! GET  /v1/tools[/{name}]                tool descriptors
//! GET  /v1/crews/{name}/resolve          resolved pipeline
//! POST /v1/completions/crews/{crew}      run a crew on a transcript
//! ```

mod crud;
mod handlers;
pub mod response;


pub use crud::CatalogEntity;
pub use response::ApiResponse;

use crate::catalog::{AgentConfig, Catalog, CrewConfig, ModelConfig};
use crate::config::Settings;
use crate::engine::CrewEngine;
use crate::tools::ToolRegistry;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub tools: Arc<ToolRegistry>,
    pub engine: Arc<dyn CrewEngine>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        tools: ToolRegistry,
        engine: Arc<dyn CrewEngine>,
        settings: Settings,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            tools: Arc::new(tools),
            engine,
            settings: Arc::new(settings),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let v1 = Router::new()
        .nest("/models", crud::routes::<ModelConfig>())
        .nest("/agents", crud::routes::<AgentConfig>())
        .nest(
            "/crews",
            crud::routes::<CrewConfig>().route("/:name/resolve", get(handlers::resolve_crew)),
        )
        .route("/tools", get(handlers::list_tools))
        .route("/tools/:name", get(handlers::get_tool))
        .route("/completions/crews/:crew", post(handlers::crew_completion));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
