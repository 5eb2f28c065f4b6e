//! Pending queue API
//!
//! Every route takes an optional `launch_id` selecting the scheduling
//! context; without it the generic context is used.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pending", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::import_one)
                .delete(handler::clear),
        )
        .route("/import", post(handler::import_category))
        .route("/{id}", delete(handler::remove))
        .route("/{id}/schedule", post(handler::schedule))
}
