//! Router assembly: record routes, common routes, fallback and middleware.

mod common;
mod record;

pub use common::common_routes;
pub use record::record_routes;

use crate::state::AppState;
use axum::{http::StatusCode, Router};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
const BODY_LIMIT: usize = 64 * 1024;

/// Answer for unmatched paths and methods.
pub(crate) async fn no_route() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "no route defined")
}

/// Full application router with request tracing, permissive CORS and a 404 fallback.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(record_routes(state))
        .fallback(no_route)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
