//! Thin client for the Ollama REST API.
//!
//! `/api/tags` serves both the connectivity probe and the model listing;
//! `/api/generate` serves both blocking and streamed generation.

use futures::StreamExt;
use tracing::{debug, warn};

use crate::agent::{self, AgentResponse};
use crate::error::ClientError;
use crate::metrics::STREAM_CHUNKS;
use crate::models::{GenerateOptions, GenerateRequest, GenerateResponse, StreamChunk, TagsResponse};
use crate::stream::LineDecoder;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Clone, Debug)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, model)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            model: model.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Best-effort probe: true only when `/api/tags` answers with a 2xx.
    pub async fn check_connection(&self) -> bool {
        match self.http.get(self.tags_url()).send().await {
            Ok(res) => res.status().is_success(),
            Err(e) => {
                debug!(base_url = %self.base_url, error = %e, "Ollama probe failed");
                false
            }
        }
    }

    /// Names of the locally installed models; empty on any failure.
    pub async fn get_available_models(&self) -> Vec<String> {
        match self.fetch_tags().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(e) => {
                warn!(base_url = %self.base_url, error = %e, "Error fetching models");
                Vec::new()
            }
        }
    }

    async fn fetch_tags(&self) -> Result<TagsResponse, ClientError> {
        let res = self
            .http
            .get(self.tags_url())
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        if !res.status().is_success() {
            return Err(ClientError::from_status(res.status()));
        }

        res.json::<TagsResponse>().await.map_err(ClientError::Decode)
    }

    async fn post_generate(&self, body: &GenerateRequest) -> Result<reqwest::Response, ClientError> {
        let res = self
            .http
            .post(self.generate_url())
            .json(body)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        if !res.status().is_success() {
            let err = ClientError::from_status(res.status());
            warn!(model = %self.model, error = %err, "Ollama generate error");
            return Err(err);
        }

        Ok(res)
    }

    /// Blocking generation: waits for the whole reply.
    pub async fn generate(&self, prompt: &str, options: GenerateOptions) -> Result<String, ClientError> {
        let body = GenerateRequest::new(&self.model, prompt, false, options);
        let res = self.post_generate(&body).await?;

        let reply = res
            .json::<GenerateResponse>()
            .await
            .map_err(ClientError::Decode)?;

        debug!(model = %reply.model, done = reply.done, chars = reply.response.len(), "Generation finished");
        Ok(reply.response)
    }

    /// Starts a streamed generation.
    ///
    /// Upstream failures (unreachable server, non-2xx status, empty body) are
    /// reported here, before any fragment is read.
    pub async fn open_stream(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<GenerationStream, ClientError> {
        let body = GenerateRequest::new(&self.model, prompt, true, options);
        let res = self.post_generate(&body).await?;

        if res.content_length() == Some(0) {
            return Err(ClientError::StreamUnavailable);
        }

        Ok(GenerationStream { res })
    }

    /// Streamed generation.
    ///
    /// Every fragment is handed to `on_chunk` as soon as its line is complete,
    /// and the concatenation of all fragments is returned once the server
    /// reports `done` or closes the body. Lines that are not valid JSON are
    /// skipped.
    pub async fn generate_stream<F>(
        &self,
        prompt: &str,
        on_chunk: F,
        options: GenerateOptions,
    ) -> Result<String, ClientError>
    where
        F: FnMut(&str),
    {
        self.open_stream(prompt, options).await?.collect(on_chunk).await
    }

    pub fn parse_agent_response(&self, text: &str) -> AgentResponse {
        agent::parse_agent_response(text)
    }
}

// An accepted streamed generation whose body has not been read yet
#[derive(Debug)]
pub struct GenerationStream {
    res: reqwest::Response,
}

impl GenerationStream {
    pub async fn collect<F>(self, mut on_chunk: F) -> Result<String, ClientError>
    where
        F: FnMut(&str),
    {
        let mut stream = self.res.bytes_stream();
        let mut decoder = LineDecoder::new();
        let mut full_response = String::new();
        let mut done = false;

        'read: while let Some(bytes) = stream.next().await {
            let bytes = bytes.map_err(ClientError::Unreachable)?;

            for line in decoder.push(&bytes) {
                if accept_line(&line, &mut full_response, &mut on_chunk) {
                    done = true;
                    break 'read;
                }
            }
        }

        // anything after the done line is not part of the reply
        if !done {
            if let Some(line) = decoder.finish() {
                accept_line(&line, &mut full_response, &mut on_chunk);
            }
        }

        Ok(full_response)
    }
}

// Returns true once the server has signalled completion
fn accept_line<F>(line: &str, full_response: &mut String, on_chunk: &mut F) -> bool
where
    F: FnMut(&str),
{
    let line = line.trim();
    if line.is_empty() {
        return false;
    }

    let chunk = match serde_json::from_str::<StreamChunk>(line) {
        Ok(chunk) => chunk,
        Err(e) => {
            debug!(error = %e, "Skipping invalid JSON line");
            return false;
        }
    };

    if let Some(fragment) = chunk.response.as_deref().filter(|s| !s.is_empty()) {
        full_response.push_str(fragment);
        STREAM_CHUNKS.inc();
        on_chunk(fragment);
    }

    chunk.done
}
