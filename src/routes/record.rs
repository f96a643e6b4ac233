//! Record CRUD routes. The first segment is the type tag; handlers resolve it to a shape.

use crate::handlers::record::{create, delete as delete_handler, list, read, update};
use crate::routes::no_route;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .route("/:tag", get(list).post(create).put(update).fallback(no_route))
        .route("/:tag/:id", get(read).delete(delete_handler).fallback(no_route))
        .with_state(state)
}
