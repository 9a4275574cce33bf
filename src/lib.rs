//! Minimal web front end for a local Ollama server.
//!
//! Prompts arrive over HTTP, are forwarded to Ollama's generate API, and the
//! raw text comes back unchanged. A marker classifier is available for
//! callers that want to read intent (search / answer / thinking) out of a
//! reply.

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod state;
pub mod stream;

pub use agent::{AgentResponse, parse_agent_response};
pub use client::{GenerationStream, OllamaClient};
pub use error::{ApiError, ClientError};
pub use handlers::create_router;
pub use models::GenerateOptions;
pub use state::AppState;
