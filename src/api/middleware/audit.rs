//! Access logging middleware.
//!
//! Logs method, route template, status and latency for every request.
//! The route template (`/api/patients/:patient_id/records`) is logged instead
//! of the request path so identifiers never reach the logs.

use std::time::Instant;

use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Route label for requests that matched no route.
const UNMATCHED_ROUTE: &str = "<unmatched>";

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        tracing::warn!(%method, route, status, latency_ms, "API access");
    } else {
        tracing::info!(%method, route, status, latency_ms, "API access");
    }

    response
}
