//! API router.
//!
//! Returns a composable `Router`. Layers, outermost first:
//! trace span → audit log → `Cache-Control: no-store` → body limit → handler.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use axum::http::{header, HeaderValue, Request};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::care_flow::CareFlow;

/// Build the application router around a shared [`CareFlow`].
///
/// Request bodies are capped at twice the document limit to leave room for
/// multipart framing; the document limit itself is enforced by the care flow.
pub fn api_router(flow: Arc<CareFlow>) -> Router {
    let body_limit = flow.max_document_bytes().saturating_mul(2);
    let ctx = ApiContext::new(flow);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    Router::new()
        .route("/", get(endpoints::page::index))
        .route("/api/health", get(endpoints::health::check))
        .route("/api/risk-rules", get(endpoints::rules::list))
        .route(
            "/api/patients/:patient_id/summary/preview",
            post(endpoints::summary::preview),
        )
        .route(
            "/api/patients/:patient_id/summary",
            post(endpoints::summary::confirm),
        )
        .route(
            "/api/patients/:patient_id/symptoms",
            post(endpoints::symptoms::log),
        )
        .route(
            "/api/patients/:patient_id/records",
            get(endpoints::records::load),
        )
        .route(
            "/api/patients/:patient_id/trend.svg",
            get(endpoints::records::trend_svg),
        )
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            // Route template only; the URI would carry the patient identifier.
            let route = req
                .extensions()
                .get::<MatchedPath>()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            tracing::info_span!("http", method = %req.method(), route)
        }))
}
