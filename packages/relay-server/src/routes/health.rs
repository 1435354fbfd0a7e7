use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// Liveness check; the relay has no dependencies worth probing.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Claude proxy server is running",
    })
}

pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}
