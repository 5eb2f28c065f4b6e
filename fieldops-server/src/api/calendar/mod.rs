//! Calendar board and visit API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/calendar/week", get(handler::week))
        .nest("/api/visits", visit_routes())
}

fn visit_routes() -> Router<ServerState> {
    Router::new()
        .route("/sweep", post(handler::sweep))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/move", post(handler::move_visit))
        .route("/{id}/unschedule", post(handler::unschedule))
        .route("/{id}/cancel", post(handler::cancel))
}
