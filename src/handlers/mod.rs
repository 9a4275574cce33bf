mod check;
mod classify;
mod generate;
mod health;
mod index;
mod metrics;

pub use check::check_handler;
pub use classify::classify_handler;
pub use generate::{generate_handler, generate_stream_handler};
pub use health::health_handler;
pub use index::index_handler;
pub use metrics::metrics_handler;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/ollama/check", get(check_handler))
        .route("/api/ollama/generate", post(generate_handler))
        .route("/api/ollama/generate/stream", post(generate_stream_handler))
        .route("/api/agent/classify", post(classify_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Pull a required string field out of a JSON body
pub(crate) fn required_string(
    body: Result<Json<Value>, JsonRejection>,
    field: &str,
    missing: &str,
) -> Result<String, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    match body.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ApiError::BadRequest(missing.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_string() {
        let ok = required_string(Ok(Json(json!({"prompt": "hi"}))), "prompt", "Prompt is required");
        assert_eq!(ok.unwrap(), "hi");

        for body in [json!({}), json!({"prompt": ""}), json!({"prompt": 7}), json!(null)] {
            let err = required_string(Ok(Json(body)), "prompt", "Prompt is required").unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Prompt is required"));
        }
    }
}
