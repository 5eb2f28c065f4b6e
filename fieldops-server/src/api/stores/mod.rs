//! Store API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores", routes())
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
        .route("/{id}/fixtures", get(handler::list_fixtures))
        .route(
            "/{id}/fixtures/{fixture_id}",
            post(handler::attach_fixture).delete(handler::detach_fixture),
        )
        .route("/{id}/visits", get(handler::list_visits))
}
