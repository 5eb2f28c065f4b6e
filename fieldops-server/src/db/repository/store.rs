//! Store Repository

use super::RepoResult;
use shared::models::{Chain, Store, StoreCategory, StoreCreate, StoreUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, category, chain, address, city, province, phone, email, manager_name, notes, created_at, updated_at FROM stores";

const RETURNING: &str = "RETURNING id, name, category, chain, address, city, province, phone, email, manager_name, notes, created_at, updated_at";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<Option<Store>> {
    let store = sqlx::query_as::<_, Store>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(store)
}

/// List stores, optionally filtered by category and chain
pub async fn find_all(
    pool: &SqlitePool,
    category: Option<StoreCategory>,
    chain: Option<Chain>,
) -> RepoResult<Vec<Store>> {
    let stores = sqlx::query_as::<_, Store>(&format!(
        "{SELECT} WHERE (?1 IS NULL OR category = ?1) AND (?2 IS NULL OR chain = ?2) ORDER BY name, id"
    ))
    .bind(category)
    .bind(chain)
    .fetch_all(pool)
    .await?;
    Ok(stores)
}

pub async fn find_by_category<'e, E: SqliteExecutor<'e>>(
    ex: E,
    category: StoreCategory,
) -> RepoResult<Vec<Store>> {
    let stores = sqlx::query_as::<_, Store>(&format!("{SELECT} WHERE category = ? ORDER BY name, id"))
        .bind(category)
        .fetch_all(ex)
        .await?;
    Ok(stores)
}

/// Stores that have at least one of the given fixtures attached
pub async fn find_by_fixture_ids(pool: &SqlitePool, fixture_ids: &[i64]) -> RepoResult<Vec<Store>> {
    if fixture_ids.is_empty() {
        return Ok(Vec::new());
    }
    let stores = sqlx::query_as::<_, Store>(&format!(
        "{SELECT} WHERE id IN (SELECT store_id FROM store_fixtures WHERE fixture_id IN (SELECT value FROM json_each(?))) ORDER BY name, id"
    ))
    .bind(sqlx::types::Json(fixture_ids))
    .fetch_all(pool)
    .await?;
    Ok(stores)
}

pub async fn create(pool: &SqlitePool, data: StoreCreate) -> RepoResult<Store> {
    let now = shared::util::now_millis();
    let store = sqlx::query_as::<_, Store>(&format!(
        "INSERT INTO stores (id, name, category, chain, address, city, province, phone, email, manager_name, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) {RETURNING}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(data.name.trim())
    .bind(data.category)
    .bind(data.chain)
    .bind(data.address)
    .bind(data.city)
    .bind(data.province)
    .bind(data.phone)
    .bind(data.email)
    .bind(data.manager_name)
    .bind(data.notes)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(store)
}

/// Insert a store row verbatim (backup restore)
pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, s: &Store) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO stores (id, name, category, chain, address, city, province, phone, email, manager_name, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(s.id)
    .bind(&s.name)
    .bind(s.category)
    .bind(s.chain)
    .bind(&s.address)
    .bind(&s.city)
    .bind(&s.province)
    .bind(&s.phone)
    .bind(&s.email)
    .bind(&s.manager_name)
    .bind(&s.notes)
    .bind(s.created_at)
    .bind(s.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Partial update; `None` fields keep their current value
pub async fn update(pool: &SqlitePool, id: i64, data: StoreUpdate) -> RepoResult<Option<Store>> {
    let now = shared::util::now_millis();
    let store = sqlx::query_as::<_, Store>(&format!(
        "UPDATE stores SET name = COALESCE(?1, name), category = COALESCE(?2, category), chain = COALESCE(?3, chain), address = COALESCE(?4, address), city = COALESCE(?5, city), province = COALESCE(?6, province), phone = COALESCE(?7, phone), email = COALESCE(?8, email), manager_name = COALESCE(?9, manager_name), notes = COALESCE(?10, notes), updated_at = ?11 WHERE id = ?12 {RETURNING}"
    ))
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.category)
    .bind(data.chain)
    .bind(data.address)
    .bind(data.city)
    .bind(data.province)
    .bind(data.phone)
    .bind(data.email)
    .bind(data.manager_name)
    .bind(data.notes)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(store)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM stores WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn sample(name: &str, category: StoreCategory, chain: Chain) -> StoreCreate {
        StoreCreate {
            name: name.into(),
            category,
            chain,
            address: None,
            city: Some("Milano".into()),
            province: Some("MI".into()),
            phone: None,
            email: None,
            manager_name: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let store = create(&pool, sample(" Comet Bologna ", StoreCategory::Tier2, Chain::Comet))
            .await
            .unwrap();
        assert_eq!(store.name, "Comet Bologna");

        let found = find_by_id(&pool, store.id).await.unwrap().unwrap();
        assert_eq!(found, store);
    }

    #[tokio::test]
    async fn test_find_all_filters() {
        let pool = test_pool().await;
        create(&pool, sample("A", StoreCategory::White, Chain::Comet)).await.unwrap();
        create(&pool, sample("B", StoreCategory::Tier2, Chain::Comet)).await.unwrap();
        create(&pool, sample("C", StoreCategory::White, Chain::Unieuro)).await.unwrap();

        assert_eq!(find_all(&pool, None, None).await.unwrap().len(), 3);
        assert_eq!(find_all(&pool, Some(StoreCategory::White), None).await.unwrap().len(), 2);
        let comet_white = find_all(&pool, Some(StoreCategory::White), Some(Chain::Comet))
            .await
            .unwrap();
        assert_eq!(comet_white.len(), 1);
        assert_eq!(comet_white[0].name, "A");
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let pool = test_pool().await;
        let store = create(&pool, sample("A", StoreCategory::White, Chain::Comet)).await.unwrap();
        let updated = update(
            &pool,
            store.id,
            StoreUpdate {
                chain: Some(Chain::Euronics),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.chain, Chain::Euronics);
        assert_eq!(updated.city.as_deref(), Some("Milano"));
        assert!(update(&pool, 42, StoreUpdate::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let store = create(&pool, sample("A", StoreCategory::White, Chain::Comet)).await.unwrap();
        assert!(delete(&pool, store.id).await.unwrap());
        assert!(!delete(&pool, store.id).await.unwrap());
    }
}
