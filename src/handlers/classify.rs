use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::required_string;
use crate::agent::AgentResponse;
use crate::error::ApiError;
use crate::state::AppState;

// Run the marker classifier over a piece of model output
pub async fn classify_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let text = required_string(body, "text", "Text is required")?;
    let parsed = state.client.parse_agent_response(&text);
    debug!(kind = parsed.kind(), chars = parsed.content().len(), "Classified agent response");
    Ok(Json(parsed))
}
