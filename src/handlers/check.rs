use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::{error, info};

use crate::client::OllamaClient;
use crate::metrics::STATUS_CHECKS;
use crate::models::ConnectionStatus;
use crate::state::AppState;

async fn probe(client: &OllamaClient) -> ConnectionStatus {
    let connected = client.check_connection().await;
    let models = if connected {
        client.get_available_models().await
    } else {
        Vec::new()
    };

    ConnectionStatus {
        connected,
        models,
        base_url: Some(client.base_url().to_string()),
        error: None,
    }
}

// Always 200; a failure inside the probe is reported in the body
pub async fn check_handler(State(state): State<Arc<AppState>>) -> Json<ConnectionStatus> {
    STATUS_CHECKS.inc();

    let client = state.client.clone();
    let status = match tokio::spawn(async move { probe(&client).await }).await {
        Ok(status) => status,
        Err(e) => {
            error!(error = %e, "Ollama status check failed");
            ConnectionStatus::failed(e.to_string())
        }
    };

    info!(connected = status.connected, models = status.models.len(), "Ollama status");
    Json(status)
}
