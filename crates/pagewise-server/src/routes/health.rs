//! Liveness route.

use axum::Json;

use pagewise_chat::HealthResponse;

/// GET /health — always 200 while the process is serving.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        message: "AI Assistant relay is running".into(),
    })
}
