use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::errors::ErrorResponse;

/// Liveness check
pub async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "OK"}))
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Page not found")))
}
