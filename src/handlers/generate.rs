use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::required_string;
use crate::error::ApiError;
use crate::metrics::{GENERATE_FAILURES, GENERATE_LATENCY, GENERATE_REQUESTS};
use crate::models::{DEFAULT_TEMPERATURE, GenerateOptions, PromptReply};
use crate::state::AppState;

fn options() -> GenerateOptions {
    GenerateOptions::default().with_temperature(DEFAULT_TEMPERATURE)
}

// Shared front half of both generate routes: validate, then make sure Ollama is up
async fn accept_prompt(
    state: &AppState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<String, ApiError> {
    GENERATE_REQUESTS.inc();

    let prompt = required_string(body, "prompt", "Prompt is required")?;

    if !state.client.check_connection().await {
        GENERATE_FAILURES.inc();
        return Err(ApiError::Unavailable("Ollama is not running".to_string()));
    }

    Ok(prompt)
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PromptReply>, ApiError> {
    let prompt = accept_prompt(&state, body).await?;
    let start_time = Instant::now();

    let response = state
        .client
        .generate(&prompt, options())
        .await
        .map_err(|e| {
            GENERATE_FAILURES.inc();
            error!(error = %e, "Ollama generate API error");
            ApiError::from(e)
        })?;

    GENERATE_LATENCY.observe(start_time.elapsed().as_secs_f64());
    info!(chars = response.len(), "Generated response");

    Ok(Json(PromptReply { response }))
}

// Same contract as generate_handler, but the reply is a plain-text body
// written fragment by fragment; only a failure mid-body aborts it
pub async fn generate_stream_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let prompt = accept_prompt(&state, body).await?;

    let start_time = Instant::now();

    // Upstream status is known before the 200 header goes out
    let upstream = state
        .client
        .open_stream(&prompt, options())
        .await
        .map_err(|e| {
            GENERATE_FAILURES.inc();
            error!(error = %e, "Ollama stream error");
            ApiError::from(e)
        })?;

    let (tx, rx) = mpsc::unbounded_channel::<Result<String, io::Error>>();

    tokio::spawn(async move {
        let result = upstream
            .collect(|fragment| {
                let _ = tx.send(Ok(fragment.to_string()));
            })
            .await;

        match result {
            Ok(full) => {
                GENERATE_LATENCY.observe(start_time.elapsed().as_secs_f64());
                info!(chars = full.len(), "Streamed response");
            }
            Err(e) => {
                GENERATE_FAILURES.inc();
                error!(error = %e, "Ollama stream broke off");
                let _ = tx.send(Err(io::Error::other(e.to_string())));
            }
        }
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    });

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(stream),
    )
        .into_response())
}
