//! Reusable Axum middleware for the service.
//!
//! These functions are lightweight composable layers attached to the Axum
//! `Router` to enforce cross-cutting concerns (the admin query-parameter
//! gate, request timing, request ID). They deliberately stay stateless to
//! minimize contention and complexity.
use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

/// Gate a route behind the `admin=true` query parameter.
///
/// Requests without it receive 404, indistinguishable from a route that
/// does not exist. Visit `/?admin=true` vs `/?admin=false`.
pub async fn admin_only(req: Request, next: Next) -> Response {
    // First admin value wins when the parameter is repeated
    let is_admin = req
        .uri()
        .query()
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "admin")
                .map(|(_, v)| v == "true")
        })
        .unwrap_or(false);

    if !is_admin {
        return StatusCode::NOT_FOUND.into_response();
    }

    next.run(req).await
}

/// Log start/end of a request including latency.
pub async fn request_timing_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    tracing::debug!("Started processing {} {}", method, uri);

    let response = next.run(req).await;
    let duration = start.elapsed();

    tracing::info!(
        "Completed {} {} - {} in {:?}",
        method,
        uri,
        response.status(),
        duration
    );

    response
}

/// Generate a per-request UUID and expose it via tracing plus `X-Request-ID`.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("X-Request-ID", header_value);
    }

    response
}
