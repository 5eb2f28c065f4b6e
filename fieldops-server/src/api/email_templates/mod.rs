//! Email template and notification API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/email-templates", routes())
        .route("/api/email-log", get(handler::list_log))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/render", post(handler::render))
        .route("/{id}/mailto", post(handler::mailto))
        .route("/{id}/send", post(handler::send))
}
