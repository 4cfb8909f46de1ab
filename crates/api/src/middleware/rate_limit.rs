//! Per-IP fixed-window rate limiting middleware.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::state::AppState;

/// Reject requests over the configured per-IP budget with 429 and a
/// `Retry-After` header.
///
/// The client key is the peer address when the listener provides one
/// (production uses `into_make_service_with_connect_info`), falling back to
/// the `x-forwarded-for` header behind a proxy; requests with neither share
/// one bucket. A disabled limiter passes everything through.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.rate_limit.enabled {
        return next.run(request).await;
    }

    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .or_else(|| {
            request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    match state.limiter.allow(&client) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            tracing::warn!(client, "rate limit exceeded");
            let body = json!({
                "error": "Rate limit exceeded, retry later",
                "code": "RATE_LIMITED",
            });
            (
                StatusCode::TOO_MANY_REQUESTS,
                [("retry-after", retry_after.as_secs().max(1).to_string())],
                axum::Json(body),
            )
                .into_response()
        }
    }
}
