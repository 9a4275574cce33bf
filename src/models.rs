use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Default sampling temperature when the caller leaves it unset
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// Caller-side knobs for a generate call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
}

impl GenerateOptions {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

// Ollama API request format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(default)]
    pub stream: bool,
    pub options: SamplingOptions,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model: &str, prompt: &str, stream: bool, options: GenerateOptions) -> Self {
        Self {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream,
            options: SamplingOptions {
                temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                top_p: options.top_p,
                top_k: options.top_k,
            },
        }
    }
}

// Ollama API response format (stream = false)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

// One NDJSON line of a streamed generation
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StreamChunk {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
}

// GET /api/tags
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

// Body of GET /api/ollama/check
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    pub models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            models: Vec::new(),
            base_url: None,
            error: Some(error.into()),
        }
    }
}

// Body of POST /api/ollama/generate
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptReply {
    pub response: String,
}
