//! Response envelope shared by every endpoint.
//!
//! ```json
//! {"success": true, "message": "Crew config fetched successfully", "data": {"config": {...}}}
//! ```
//!
//! Errors use the same envelope with `success: false`, the error text as
//! `message` and an empty `data` object.

use crate::error::EngineError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, data: Value) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: json!({}),
        }
    }
}

pub type ApiResult = Result<Json<ApiResponse>, EngineError>;

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}

/// Map a body that failed to decode to a validation error.
pub fn bad_body(rejection: JsonRejection) -> EngineError {
    EngineError::Validation(format!("invalid request body: {}", rejection.body_text()))
}
