use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures talking to the model server
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Ollama is unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Ollama API error: {status_text}")]
    Server { status: u16, status_text: String },

    #[error("No response body")]
    StreamUnavailable,

    #[error("Unexpected response from Ollama: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        ClientError::Server {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string()),
        }
    }
}

/// Failures surfaced by the route handlers, rendered as `{"error": ...}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
