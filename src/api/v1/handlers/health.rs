/*
 * Responsibility
 * - GET /health (liveness probe)
 * - Also useful for checking which routes the auth middleware covers
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
