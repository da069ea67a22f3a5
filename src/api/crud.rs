//! CRUD endpoints shared by models, agents and crews.
//!
//! Each kind mounts the same five routes:
//!
//! | Method | Path      | Action                          |
//! |--------|-----------|---------------------------------|
//! | POST   | `/`       | create (409 if the name exists) |
//! | GET    | `/`       | list                            |
//! | GET    | `/{name}` | fetch                           |
//! | PUT    | `/`       | replace, name taken from body   |
//! | DELETE | `/{name}` | delete                          |

use super::AppState;
use super::response::{ApiResponse, ApiResult, bad_body};
use crate::catalog::{AgentConfig, Catalog, CrewConfig, ModelConfig, Record, Store};
use axum::Json;
use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use serde_json::{Map, Value, json};

/// A record kind with a store in the catalog.
pub trait CatalogEntity: Record {
    fn store(catalog: &Catalog) -> &Store<Self>;
}

impl CatalogEntity for ModelConfig {
    fn store(catalog: &Catalog) -> &Store<Self> {
        &catalog.models
    }
}

impl CatalogEntity for AgentConfig {
    fn store(catalog: &Catalog) -> &Store<Self> {
        &catalog.agents
    }
}

impl CatalogEntity for CrewConfig {
    fn store(catalog: &Catalog) -> &Store<Self> {
        &catalog.crews
    }
}

/// The five CRUD routes for `T`, to be nested under its prefix.
pub fn routes<T: CatalogEntity>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>).put(update::<T>))
        .route("/:name", get(fetch::<T>).delete(delete::<T>))
}

async fn create<T: CatalogEntity>(
    State(state): State<AppState>,
    body: Result<Json<T>, JsonRejection>,
) -> ApiResult {
    let Json(record) = body.map_err(bad_body)?;
    let record = T::store(&state.catalog).create(record)?;
    Ok(ApiResponse::ok(
        format!("{} config created successfully", T::KIND),
        json!({ "config": record }),
    ))
}

async fn list<T: CatalogEntity>(State(state): State<AppState>) -> ApiResult {
    let records = T::store(&state.catalog).list();
    let count = records.len();

    let mut configs = Map::new();
    for record in records {
        configs.insert(record.name().to_string(), json!(record));
    }
    Ok(ApiResponse::ok(
        format!("{} configs fetched successfully", T::KIND),
        json!({ "configs": Value::Object(configs), "count": count }),
    ))
}

async fn fetch<T: CatalogEntity>(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult {
    let record = T::store(&state.catalog).get(&name)?;
    Ok(ApiResponse::ok(
        format!("{} config fetched successfully", T::KIND),
        json!({ "config": record }),
    ))
}

async fn update<T: CatalogEntity>(
    State(state): State<AppState>,
    body: Result<Json<T>, JsonRejection>,
) -> ApiResult {
    let Json(record) = body.map_err(bad_body)?;
    let name = record.name().to_string();
    let record = T::store(&state.catalog).update(&name, record)?;
    Ok(ApiResponse::ok(
        format!("{} config updated successfully", T::KIND),
        json!({ "config": record }),
    ))
}

async fn delete<T: CatalogEntity>(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult {
    let removed = T::store(&state.catalog).delete(&name)?;
    Ok(ApiResponse::ok(
        format!("{} config deleted successfully", T::KIND),
        json!({ "name": removed.name() }),
    ))
}
