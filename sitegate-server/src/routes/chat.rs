//! Streaming passthrough for chat completions.
//!
//! The gateway forwards the merged request to the inference upstream and
//! relays the NDJSON response body one chunk at a time, in order, without
//! buffering the whole payload. A slow client therefore backpressures the
//! upstream read instead of growing a queue.

use axum::{
    body::Body,
    extract::{Json, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures_util::TryStreamExt;
use tracing::{error, info};

use sitegate_shared::ChatRequest;

use crate::{error::ChatProxyError, AppState};

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ChatProxyError> {
    let base = state
        .config
        .upstream_base
        .as_deref()
        .ok_or(ChatProxyError::MissingUpstreamBase)?;

    let body = request.into_upstream(&state.config.default_model);
    info!(
        "Relaying chat request: model={} stream={} messages={}",
        body.model,
        body.stream,
        body.messages.len()
    );

    let upstream = state
        .http
        .post(format!("{base}/api/chat"))
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            error!("Failed to reach inference upstream: {}", e);
            ChatProxyError::Proxy
        })?;

    let status = upstream.status();
    if !status.is_success() {
        error!("Inference upstream returned {}", status);
        return Err(ChatProxyError::Upstream(status));
    }

    // Once headers are committed a mid-stream upstream failure has nowhere
    // to report itself; the error is logged and the connection is closed
    // abruptly so the client's stream consumer sees a truncation, not a
    // fabricated record.
    let relay = upstream
        .bytes_stream()
        .inspect_err(|e| error!("Upstream stream failed mid-relay: {}", e));

    Ok((
        [
            (header::CONTENT_TYPE, "application/x-ndjson"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Body::from_stream(relay),
    )
        .into_response())
}
