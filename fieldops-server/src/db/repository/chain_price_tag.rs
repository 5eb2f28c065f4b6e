//! Chain price-tag catalog Repository

use super::RepoResult;
use shared::models::{Chain, ChainPriceTag, PriceTagSource};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, chain, name, source, pdf_file, created_at FROM chain_price_tags";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ChainPriceTag>> {
    let tag = sqlx::query_as::<_, ChainPriceTag>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(tag)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ChainPriceTag>> {
    let tags = sqlx::query_as::<_, ChainPriceTag>(&format!("{SELECT} ORDER BY chain, name"))
        .fetch_all(pool)
        .await?;
    Ok(tags)
}

pub async fn find_by_chain<'e, E: SqliteExecutor<'e>>(ex: E, chain: Chain) -> RepoResult<Vec<ChainPriceTag>> {
    let tags = sqlx::query_as::<_, ChainPriceTag>(&format!("{SELECT} WHERE chain = ? ORDER BY name"))
        .bind(chain)
        .fetch_all(ex)
        .await?;
    Ok(tags)
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    ex: E,
    chain: Chain,
    name: &str,
    source: PriceTagSource,
) -> RepoResult<ChainPriceTag> {
    let tag = sqlx::query_as::<_, ChainPriceTag>(
        "INSERT INTO chain_price_tags (id, chain, name, source, pdf_file, created_at) VALUES (?, ?, ?, ?, NULL, ?) RETURNING id, chain, name, source, pdf_file, created_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(chain)
    .bind(name)
    .bind(source)
    .bind(shared::util::now_millis())
    .fetch_one(ex)
    .await?;
    Ok(tag)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, t: &ChainPriceTag) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO chain_price_tags (id, chain, name, source, pdf_file, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(t.id)
    .bind(t.chain)
    .bind(&t.name)
    .bind(t.source)
    .bind(&t.pdf_file)
    .bind(t.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn set_pdf_file(pool: &SqlitePool, id: i64, pdf_file: Option<&str>) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE chain_price_tags SET pdf_file = ? WHERE id = ?")
        .bind(pdf_file)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM chain_price_tags WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}
