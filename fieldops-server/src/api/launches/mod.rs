//! Launch API

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/launches", routes())
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
        .route("/{id}/dates", put(handler::set_dates))
        .route("/{id}/devices", put(handler::set_devices))
        .route("/{id}/status", post(handler::change_status))
        .route("/{id}/impacted-stores", get(handler::impacted_stores))
        .route("/{id}/queue-impacted", post(handler::queue_impacted))
}
