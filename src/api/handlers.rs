//! Endpoints beyond plain CRUD: tools, crew resolution, completions and
//! liveness.

use super::AppState;
use super::response::{ApiResponse, ApiResult, bad_body};
use crate::completion::{CompletionRequest, create_crew_completion};
use crate::resolver::Resolver;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde_json::{Map, json};

const SERVICE_NAME: &str = "ai-engine";

pub async fn root(State(state): State<AppState>) -> ApiResult {
    Ok(ApiResponse::ok(
        "AI Engine Service is running",
        json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.settings.environment,
        }),
    ))
}

pub async fn health() -> ApiResult {
    Ok(ApiResponse::ok(
        "healthy",
        json!({ "status": "healthy", "service": SERVICE_NAME }),
    ))
}

pub async fn list_tools(State(state): State<AppState>) -> ApiResult {
    let tools = state.tools.list();
    let count = tools.len();

    let mut configs = Map::new();
    for tool in tools {
        configs.insert(tool.name.clone(), json!(tool));
    }
    Ok(ApiResponse::ok(
        "Tool configs fetched successfully",
        json!({ "configs": configs, "count": count }),
    ))
}

pub async fn get_tool(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let tool = state.tools.get(&name)?;
    Ok(ApiResponse::ok(
        "Tool config fetched successfully",
        json!({ "config": tool }),
    ))
}

/// Resolve a crew without running it.
pub async fn resolve_crew(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let crew = Resolver::new(&state.catalog, &state.tools).resolve_crew(&name)?;
    let schemas: Map<String, serde_json::Value> = crew
        .tasks
        .iter()
        .map(|t| (t.name.clone(), t.output_schema.to_json_schema()))
        .collect();

    Ok(ApiResponse::ok(
        "Crew resolved successfully",
        json!({ "crew": crew, "output_schemas": schemas }),
    ))
}

pub async fn crew_completion(
    State(state): State<AppState>,
    Path(crew): Path<String>,
    body: Result<Json<CompletionRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = body.map_err(bad_body)?;
    let response = create_crew_completion(
        &state.catalog,
        &state.tools,
        state.engine.as_ref(),
        &crew,
        &request.messages,
    )
    .await?;

    Ok(ApiResponse::ok(
        "Crew completion created successfully",
        json!(response),
    ))
}
