//! Request passthrough logging
//!
//! Logs who called what (user header, method, path, query, body, headers,
//! client IP, origin) and forwards the request with its body intact.

use std::net::SocketAddr;

use axum::{
    body::{self, Body},
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use survival_common::api::ErrorResponse;
use tracing::{info, warn};

/// Largest request body buffered for logging
pub const MAX_LOGGED_BODY_BYTES: usize = 1024 * 1024;

/// Header carrying the caller's email, set by the upstream gateway
pub const USER_HEADER: &str = "x-user-email";

/// Log the request and pass it on unchanged
pub async fn log_request(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorResponse {
                    detail: format!("Request body rejected: {}", e),
                }),
            )
                .into_response();
        }
    };

    let header_value = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string()
    };
    let client_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    info!("\tUser: {}", header_value(USER_HEADER));
    info!("\tMethod: {}", parts.method);
    info!("\tPath: {}", parts.uri.path());
    info!("\tQuery Parameters: {}", parts.uri.query().unwrap_or(""));
    info!("\tBody: {}", String::from_utf8_lossy(&bytes));
    info!("\tHeaders: {:?}", parts.headers);
    info!("\tIP: {}", client_ip);
    info!("\tOrigin: {}", header_value("origin"));

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
