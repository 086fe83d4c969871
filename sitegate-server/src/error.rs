//! Error types for the gateway routes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use sitegate_shared::SubmissionResult;

/// Failures the chat passthrough can report before streaming begins.
///
/// Responses are plain text; the underlying cause is logged at the call
/// site and never echoed to the caller.
#[derive(Error, Debug)]
pub enum ChatProxyError {
    #[error("Missing OLLAMA_BASE_URL")]
    MissingUpstreamBase,

    #[error("Upstream error: {}", .0.as_u16())]
    Upstream(StatusCode),

    #[error("Proxy error")]
    Proxy,
}

impl ChatProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatProxyError::MissingUpstreamBase => StatusCode::INTERNAL_SERVER_ERROR,
            ChatProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ChatProxyError::Proxy => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChatProxyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Failures of the contact dispatch route, rendered as the JSON envelope
/// the form client understands.
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Email failed to send")]
    DispatchFailed,
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::MissingFields => StatusCode::BAD_REQUEST,
            ContactError::DispatchFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(SubmissionResult::failure(self.to_string())),
        )
            .into_response()
    }
}
