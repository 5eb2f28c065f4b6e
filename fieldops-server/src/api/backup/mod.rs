//! Backup export / import API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/backup/export", get(handler::export))
        .route("/api/backup/import", post(handler::import))
}
