//! HTTP API
//!
//! Each resource is a module exposing `router()`; [`build_app`] merges them
//! and wraps the result in the tower-http middleware stack.

pub mod backup;
pub mod calendar;
pub mod devices;
pub mod email_templates;
pub mod fixtures;
pub mod health;
pub mod launches;
pub mod middleware;
pub mod pending;
pub mod price_tags;
pub mod public;
pub mod stores;
pub mod tacticians;
pub mod trainings;

mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Multipart framing on top of the PDF itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, no middleware
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        // Catalog
        .merge(stores::router())
        .merge(devices::router())
        .merge(fixtures::router())
        .merge(price_tags::router())
        // Planning
        .merge(launches::router())
        .merge(pending::router())
        .merge(calendar::router())
        .merge(tacticians::router())
        .merge(trainings::router())
        // Notifications and data transfer
        .merge(email_templates::router())
        .merge(backup::router())
        // Public price-tag page, no authentication
        .merge(public::router())
}

/// Router with the full middleware stack, used by the server and by tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(DefaultBodyLimit::max(
            state.config.max_upload_bytes + MULTIPART_OVERHEAD,
        ))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Request ID - outermost so every inner layer sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
}
