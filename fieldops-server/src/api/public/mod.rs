//! Public price-tag page
//!
//! `/cartelli_prezzo/{launch_slug}/{store_slug}` is shared with store staff
//! by link and needs no authentication.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::core::ServerState;
use crate::services::launches;
use crate::utils::AppResult;
use shared::models::PublicPriceTagPage;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/cartelli_prezzo/{launch_slug}/{store_slug}",
        get(price_tag_page),
    )
}

/// GET /cartelli_prezzo/{launch_slug}/{store_slug}
async fn price_tag_page(
    State(state): State<ServerState>,
    Path((launch_slug, store_slug)): Path<(String, String)>,
) -> AppResult<Json<PublicPriceTagPage>> {
    let page = launches::public_price_tags(
        &state.pool,
        &launch_slug,
        &store_slug,
        &state.config.public_base_url,
    )
    .await?;
    Ok(Json(page))
}
