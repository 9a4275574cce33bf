#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use futures::StreamExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

// Serve `app` on an ephemeral port, returning its base url
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// A base url where nothing is listening
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// Body that arrives as separate network writes, with a pause between them
pub fn chunked_body(parts: Vec<&'static str>) -> Body {
    let stream = futures::stream::iter(parts).then(|part| async move {
        tokio::time::sleep(Duration::from_millis(25)).await;
        Ok::<_, std::io::Error>(part)
    });
    Body::from_stream(stream)
}

pub fn tags_route(models: &[&str]) -> Router {
    let body = json!({
        "models": models.iter().map(|m| json!({ "name": m, "size": 123 })).collect::<Vec<_>>()
    });
    Router::new().route("/api/tags", get(move || async move { Json(body) }))
}

// Records the last /api/generate body so tests can inspect it
#[derive(Clone, Default)]
pub struct Recorder {
    pub last_body: Arc<Mutex<Option<Value>>>,
}

async fn record_generate(State(rec): State<Recorder>, Json(body): Json<Value>) -> impl IntoResponse {
    *rec.last_body.lock().await = Some(body);
    Json(json!({
        "model": "llama3.2",
        "created_at": "2024-05-01T12:00:00.000000Z",
        "response": "Paris is the capital of France.",
        "done": true
    }))
}

// Healthy fake Ollama answering non-streamed generations
pub fn fake_ollama(rec: Recorder) -> Router {
    Router::new()
        .route("/api/generate", post(record_generate))
        .with_state(rec)
        .merge(tags_route(&["llama3.2:latest", "mistral:7b"]))
}

// Fake Ollama whose generate endpoint streams `parts`
pub fn streaming_ollama(parts: Vec<&'static str>) -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(move || {
                let parts = parts.clone();
                async move { chunked_body(parts) }
            }),
        )
        .merge(tags_route(&["llama3.2:latest"]))
}

// Fake Ollama that is up but fails every generation
pub fn failing_ollama() -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        )
        .merge(tags_route(&["llama3.2:latest"]))
}
