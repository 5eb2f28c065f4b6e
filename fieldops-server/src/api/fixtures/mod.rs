//! Fixture API
//!
//! Fixture CRUD, placed devices, manual price tags and tag PDF uploads.

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/fixtures", routes())
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
        .route("/{id}/devices", put(handler::replace_devices))
        .route("/{id}/stores", get(handler::list_stores))
        .route("/{id}/price-tags", post(handler::add_manual_tag))
        .route("/{id}/price-tags/{name}", delete(handler::remove_manual_tag))
        .route("/{id}/price-tags/{name}/pdf", post(handler::upload_tag_pdf))
}
