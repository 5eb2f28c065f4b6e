//! Chain price-tag API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
};
use http::header;
use serde::Deserialize;

use crate::api::upload::read_file_field;
use crate::core::ServerState;
use crate::db::repository::chain_price_tag;
use crate::services::price_tags;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Chain, ChainPriceTag, ChainPriceTagCreate, ChainSyncReport};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub chain: Option<Chain>,
}

/// GET /api/price-tags - chain catalog, optionally for one chain
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ChainPriceTag>>> {
    let tags = match query.chain {
        Some(chain) => chain_price_tag::find_by_chain(&state.pool, chain).await?,
        None => chain_price_tag::find_all(&state.pool).await?,
    };
    Ok(Json(tags))
}

/// POST /api/price-tags - manual chain tag, never touched by reconciliation
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ChainPriceTagCreate>,
) -> AppResult<Json<ChainPriceTag>> {
    let tag = price_tags::add_chain_tag(&state.pool, payload.chain, &payload.name).await?;
    Ok(Json(tag))
}

/// DELETE /api/price-tags/{id} - manual tags only
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    price_tags::remove_chain_tag(&state.pool, id).await?;
    Ok(Json(true))
}

/// POST /api/price-tags/sync - re-derive every fixture and reconcile every chain
pub async fn sync_all(State(state): State<ServerState>) -> AppResult<Json<Vec<ChainSyncReport>>> {
    Ok(Json(price_tags::sync_all(&state.pool).await?))
}

/// POST /api/price-tags/{id}/pdf - multipart, field `file`
pub async fn upload_pdf(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<ChainPriceTag>> {
    if chain_price_tag::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::new(ErrorCode::PriceTagNotFound).with_detail("id", id));
    }

    let data = read_file_field(multipart).await?;
    let stored = state.storage.save(&data)?;
    tracing::info!(tag_id = id, file = %stored.file_name, size = stored.size, "Chain price tag PDF uploaded");

    let tag = price_tags::set_chain_tag_pdf(&state.pool, id, &stored.file_name).await?;
    Ok(Json(tag))
}

/// GET /api/files/price-tags/{file} - stored PDF by content-hash name
pub async fn download_pdf(
    State(state): State<ServerState>,
    Path(file): Path<String>,
) -> AppResult<impl IntoResponse> {
    let content = state.storage.read(&file)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{file}\""),
            ),
        ],
        content,
    ))
}
