//! Fixture (table) Repository
//!
//! Placed devices and price tags are JSON columns on the fixture row.

use super::RepoResult;
use shared::models::{
    Chain, Fixture, FixtureType, FixtureUpdate, PlacedDevice, PriceTagDescriptor, StoreFixture,
};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, fixture_type, devices, price_tags, notes, created_at, updated_at FROM fixtures";

const RETURNING: &str = "RETURNING id, name, fixture_type, devices, price_tags, notes, created_at, updated_at";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<Option<Fixture>> {
    let fixture = sqlx::query_as::<_, Fixture>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(fixture)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Fixture>> {
    let fixtures = sqlx::query_as::<_, Fixture>(&format!("{SELECT} ORDER BY name, id"))
        .fetch_all(pool)
        .await?;
    Ok(fixtures)
}

/// Fixtures attached to a store
pub async fn find_by_store(pool: &SqlitePool, store_id: i64) -> RepoResult<Vec<Fixture>> {
    let fixtures = sqlx::query_as::<_, Fixture>(&format!(
        "{SELECT} WHERE id IN (SELECT fixture_id FROM store_fixtures WHERE store_id = ?) ORDER BY name, id"
    ))
    .bind(store_id)
    .fetch_all(pool)
    .await?;
    Ok(fixtures)
}

/// Fixtures attached to at least one store of the chain
pub async fn find_by_chain<'e, E: SqliteExecutor<'e>>(ex: E, chain: Chain) -> RepoResult<Vec<Fixture>> {
    let fixtures = sqlx::query_as::<_, Fixture>(&format!(
        "{SELECT} WHERE id IN (SELECT sf.fixture_id FROM store_fixtures sf JOIN stores s ON s.id = sf.store_id WHERE s.chain = ?) ORDER BY name, id"
    ))
    .bind(chain)
    .fetch_all(ex)
    .await?;
    Ok(fixtures)
}

/// Distinct chains of the stores a fixture is attached to
pub async fn chains_for_fixture(pool: &SqlitePool, fixture_id: i64) -> RepoResult<Vec<Chain>> {
    let chains = sqlx::query_scalar::<_, Chain>(
        "SELECT DISTINCT s.chain FROM stores s JOIN store_fixtures sf ON sf.store_id = s.id WHERE sf.fixture_id = ? ORDER BY s.chain",
    )
    .bind(fixture_id)
    .fetch_all(pool)
    .await?;
    Ok(chains)
}

/// Ids of the stores a fixture is attached to
pub async fn store_ids_for_fixture(pool: &SqlitePool, fixture_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT store_id FROM store_fixtures WHERE fixture_id = ? ORDER BY store_id",
    )
    .bind(fixture_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    fixture_type: FixtureType,
    devices: &[PlacedDevice],
    price_tags: &[PriceTagDescriptor],
    notes: Option<String>,
) -> RepoResult<Fixture> {
    let now = shared::util::now_millis();
    let fixture = sqlx::query_as::<_, Fixture>(&format!(
        "INSERT INTO fixtures (id, name, fixture_type, devices, price_tags, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) {RETURNING}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(name.trim())
    .bind(fixture_type)
    .bind(Json(devices))
    .bind(Json(price_tags))
    .bind(notes)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(fixture)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, f: &Fixture) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO fixtures (id, name, fixture_type, devices, price_tags, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(f.id)
    .bind(&f.name)
    .bind(f.fixture_type)
    .bind(Json(&f.devices))
    .bind(Json(&f.price_tags))
    .bind(&f.notes)
    .bind(f.created_at)
    .bind(f.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, id: i64, data: FixtureUpdate) -> RepoResult<Option<Fixture>> {
    let now = shared::util::now_millis();
    let fixture = sqlx::query_as::<_, Fixture>(&format!(
        "UPDATE fixtures SET name = COALESCE(?1, name), fixture_type = COALESCE(?2, fixture_type), notes = COALESCE(?3, notes), updated_at = ?4 WHERE id = ?5 {RETURNING}"
    ))
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.fixture_type)
    .bind(data.notes)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(fixture)
}

/// Replace the device list
pub async fn set_devices<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: i64,
    devices: &[PlacedDevice],
) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE fixtures SET devices = ?, updated_at = ? WHERE id = ?")
        .bind(Json(devices))
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Replace the price tag list
pub async fn set_price_tags<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: i64,
    price_tags: &[PriceTagDescriptor],
) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE fixtures SET price_tags = ?, updated_at = ? WHERE id = ?")
        .bind(Json(price_tags))
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM fixtures WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ── Store attachments ───────────────────────────────────────────────

pub async fn is_attached(pool: &SqlitePool, store_id: i64, fixture_id: i64) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM store_fixtures WHERE store_id = ? AND fixture_id = ?)",
    )
    .bind(store_id)
    .bind(fixture_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

pub async fn attach(pool: &SqlitePool, store_id: i64, fixture_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT INTO store_fixtures (store_id, fixture_id, created_at) VALUES (?, ?, ?)")
        .bind(store_id)
        .bind(fixture_id)
        .bind(shared::util::now_millis())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn detach(pool: &SqlitePool, store_id: i64, fixture_id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM store_fixtures WHERE store_id = ? AND fixture_id = ?")
        .bind(store_id)
        .bind(fixture_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_all_links(pool: &SqlitePool) -> RepoResult<Vec<StoreFixture>> {
    let links = sqlx::query_as::<_, StoreFixture>(
        "SELECT store_id, fixture_id, created_at FROM store_fixtures ORDER BY store_id, fixture_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(links)
}

pub async fn insert_link<'e, E: SqliteExecutor<'e>>(ex: E, link: &StoreFixture) -> RepoResult<()> {
    sqlx::query("INSERT INTO store_fixtures (store_id, fixture_id, created_at) VALUES (?, ?, ?)")
        .bind(link.store_id)
        .bind(link.fixture_id)
        .bind(link.created_at)
        .execute(ex)
        .await?;
    Ok(())
}
