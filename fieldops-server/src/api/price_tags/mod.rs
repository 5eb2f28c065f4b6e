//! Chain price-tag catalog and PDF download API

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/price-tags", routes())
        .route("/api/files/price-tags/{file}", get(handler::download_pdf))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/sync", post(handler::sync_all))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/pdf", post(handler::upload_pdf))
}
