use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::state::AppState;

// Liveness of this service only; Ollama reachability lives at /api/ollama/check
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.client.model(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
