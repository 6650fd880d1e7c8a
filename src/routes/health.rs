use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use super::AppState;

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness check
///
/// Ready once the configured recipe dataset is in the catalog
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.catalog.is_loaded(state.dataset_path()) {
        (StatusCode::OK, Json(json!({"status": "ready"})))
    } else {
        tracing::warn!("Readiness check failed: recipe dataset not loaded");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "reason": "dataset_not_loaded"
            })),
        )
    }
}
