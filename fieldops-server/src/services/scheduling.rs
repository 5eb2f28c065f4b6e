//! Visit scheduling board
//!
//! Pending queue, weekly calendar and expiry sweep. A store is in at most
//! one of {pending row, scheduled visit} per scheduling context; every move
//! between the two tables runs in a single transaction.

use chrono::{Duration, NaiveDate};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CalendarDay, ImportSummary, PendingStoreVisit, PendingVisitDetail, StoreCategory, SweepReport,
    Visit, VisitStatus, VisitUpdate, WeekView,
};
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::db::repository::{launch, pending_visit, store, tactician, training, visit};
use crate::utils::time;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};

/// Reject dates before `today` and weekend days
pub fn validate_schedule_date(date: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if date < today {
        return Err(AppError::new(ErrorCode::DateInPast)
            .with_detail("date", date.to_string())
            .with_detail("today", today.to_string()));
    }
    if time::is_weekend(date) {
        return Err(AppError::new(ErrorCode::DateOnWeekend).with_detail("date", date.to_string()));
    }
    Ok(())
}

/// Launch contexts only accept changes while the launch is editable
async fn ensure_context(pool: &SqlitePool, launch_id: Option<i64>) -> AppResult<()> {
    let Some(id) = launch_id else {
        return Ok(());
    };
    let launch = launch::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::LaunchNotFound).with_detail("launch_id", id))?;
    if !launch.status.is_editable() {
        return Err(AppError::with_message(
            ErrorCode::LaunchNotEditable,
            format!("Launch '{}' is {}", launch.name, launch.status.as_str()),
        ));
    }
    Ok(())
}

async fn ensure_tactician(pool: &SqlitePool, tactician_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = tactician_id
        && tactician::find_by_id(pool, id).await?.is_none()
    {
        return Err(AppError::new(ErrorCode::TacticianNotFound).with_detail("tactician_id", id));
    }
    Ok(())
}

// ── Pending queue ───────────────────────────────────────────────────

/// Pending queue of a context, joined with store data
pub async fn list_pending(
    pool: &SqlitePool,
    launch_id: Option<i64>,
) -> AppResult<Vec<PendingVisitDetail>> {
    Ok(pending_visit::find_details(pool, launch_id).await?)
}

/// Queue every store of `category` that is neither pending nor scheduled
/// in the context. Running it twice inserts nothing the second time.
pub async fn import_category(
    pool: &SqlitePool,
    category: StoreCategory,
    launch_id: Option<i64>,
) -> AppResult<ImportSummary> {
    ensure_context(pool, launch_id).await?;

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    let stores = store::find_by_category(&mut *tx, category).await?;
    let occupied: HashSet<i64> = pending_visit::occupied_store_ids(&mut *tx, launch_id)
        .await?
        .into_iter()
        .collect();

    let mut summary = ImportSummary::default();
    for s in &stores {
        if occupied.contains(&s.id) {
            summary.skipped += 1;
            continue;
        }
        pending_visit::insert(&mut *tx, s.id, launch_id, category).await?;
        summary.inserted += 1;
    }
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        category = category.as_str(),
        launch_id = ?launch_id,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Imported stores into pending queue"
    );
    Ok(summary)
}

/// Queue a single store
pub async fn import_one(
    pool: &SqlitePool,
    store_id: i64,
    visit_type: StoreCategory,
    launch_id: Option<i64>,
) -> AppResult<PendingStoreVisit> {
    ensure_context(pool, launch_id).await?;
    store::find_by_id(pool, store_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("store_id", store_id))?;

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    if pending_visit::find_for_store(&mut *tx, store_id, launch_id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::StoreAlreadyPending).with_detail("store_id", store_id));
    }
    if let Some(existing) = visit::find_scheduled_for_store(&mut *tx, store_id, launch_id).await? {
        return Err(AppError::new(ErrorCode::StoreAlreadyScheduled)
            .with_detail("store_id", store_id)
            .with_detail("visit_id", existing.id));
    }
    let pending = pending_visit::insert(&mut *tx, store_id, launch_id, visit_type).await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    Ok(pending)
}

/// Remove one pending row
pub async fn remove_pending(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let pending = pending_visit::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PendingVisitNotFound).with_detail("id", id))?;
    ensure_context(pool, pending.launch_id).await?;
    if !pending_visit::delete(pool, id).await? {
        return Err(AppError::new(ErrorCode::PendingVisitNotFound).with_detail("id", id));
    }
    Ok(())
}

/// Empty the pending queue of a context
pub async fn clear_pending(pool: &SqlitePool, launch_id: Option<i64>) -> AppResult<u64> {
    ensure_context(pool, launch_id).await?;
    let removed = pending_visit::clear(pool, launch_id).await?;
    tracing::info!(launch_id = ?launch_id, removed, "Cleared pending queue");
    Ok(removed)
}

// ── Calendar board ──────────────────────────────────────────────────

/// Drop a pending item on a day: insert the visit and delete the pending
/// row in one transaction. Rejected dates leave both tables untouched.
pub async fn schedule_pending(
    pool: &SqlitePool,
    pending_id: i64,
    date: NaiveDate,
    tactician_id: Option<i64>,
    today: NaiveDate,
) -> AppResult<Visit> {
    validate_schedule_date(date, today)?;
    ensure_tactician(pool, tactician_id).await?;
    let queued = pending_visit::find_by_id(pool, pending_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PendingVisitNotFound).with_detail("id", pending_id))?;
    ensure_context(pool, queued.launch_id).await?;

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    let pending = pending_visit::find_by_id(&mut *tx, pending_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PendingVisitNotFound).with_detail("id", pending_id))?;

    if visit::find_scheduled_for_store(&mut *tx, pending.store_id, pending.launch_id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::StoreAlreadyScheduled)
            .with_detail("store_id", pending.store_id));
    }

    let created = visit::insert(
        &mut *tx,
        pending.store_id,
        pending.launch_id,
        date,
        pending.visit_type,
        tactician_id,
    )
    .await?;
    pending_visit::delete(&mut *tx, pending.id).await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        visit_id = created.id,
        store_id = created.store_id,
        date = %date,
        "Scheduled pending visit"
    );
    Ok(created)
}

/// Drag an existing visit onto another day
pub async fn move_visit(
    pool: &SqlitePool,
    visit_id: i64,
    date: NaiveDate,
    today: NaiveDate,
) -> AppResult<Visit> {
    validate_schedule_date(date, today)?;

    let current = visit::find_by_id(pool, visit_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VisitNotFound).with_detail("id", visit_id))?;
    if current.status != VisitStatus::Scheduled {
        return Err(AppError::new(ErrorCode::VisitNotScheduled).with_detail("id", visit_id));
    }
    ensure_context(pool, current.launch_id).await?;

    visit::update_date(pool, visit_id, date)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VisitNotScheduled).with_detail("id", visit_id))
}

/// Send a scheduled visit back to the pending queue. Exactly one pending
/// row remains for the store in that context.
pub async fn unschedule_visit(pool: &SqlitePool, visit_id: i64) -> AppResult<PendingStoreVisit> {
    let launch_id = visit::find_by_id(pool, visit_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VisitNotFound).with_detail("id", visit_id))?
        .launch_id;
    ensure_context(pool, launch_id).await?;

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    let current = visit::find_by_id(&mut *tx, visit_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VisitNotFound).with_detail("id", visit_id))?;
    if current.status != VisitStatus::Scheduled {
        return Err(AppError::new(ErrorCode::VisitNotScheduled).with_detail("id", visit_id));
    }

    visit::delete(&mut *tx, current.id).await?;
    let pending =
        match pending_visit::find_for_store(&mut *tx, current.store_id, current.launch_id).await? {
            Some(existing) => existing,
            None => {
                pending_visit::insert(
                    &mut *tx,
                    current.store_id,
                    current.launch_id,
                    current.visit_type,
                )
                .await?
            }
        };
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(visit_id, store_id = current.store_id, "Moved visit back to pending queue");
    Ok(pending)
}

/// Cancel a scheduled visit (kept on the calendar as cancelled)
pub async fn cancel_visit(pool: &SqlitePool, visit_id: i64) -> AppResult<Visit> {
    if let Some(v) =
        visit::set_status(pool, visit_id, VisitStatus::Scheduled, VisitStatus::Cancelled).await?
    {
        return Ok(v);
    }
    match visit::find_by_id(pool, visit_id).await? {
        Some(_) => Err(AppError::new(ErrorCode::VisitNotScheduled).with_detail("id", visit_id)),
        None => Err(AppError::new(ErrorCode::VisitNotFound).with_detail("id", visit_id)),
    }
}

/// Assign a tactician or edit notes; date and status have their own moves
pub async fn update_visit(pool: &SqlitePool, visit_id: i64, data: VisitUpdate) -> AppResult<Visit> {
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    ensure_tactician(pool, data.tactician_id).await?;
    visit::update(pool, visit_id, data)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VisitNotFound).with_detail("id", visit_id))
}

/// Hard delete, no undo
pub async fn delete_visit(pool: &SqlitePool, visit_id: i64) -> AppResult<()> {
    if !visit::delete(pool, visit_id).await? {
        return Err(AppError::new(ErrorCode::VisitNotFound).with_detail("id", visit_id));
    }
    Ok(())
}

/// Mark every past scheduled visit as completed
pub async fn sweep_expired(pool: &SqlitePool, today: NaiveDate) -> AppResult<SweepReport> {
    let completed = visit::complete_expired(pool, today).await?;
    if completed > 0 {
        tracing::info!(completed, today = %today, "Auto-completed expired visits");
    }
    Ok(SweepReport { completed })
}

/// Load the 7-day window containing `date` for one context.
///
/// Runs the expiry sweep first, as every calendar load does.
pub async fn week_view(
    pool: &SqlitePool,
    date: NaiveDate,
    launch_id: Option<i64>,
    today: NaiveDate,
) -> AppResult<WeekView> {
    let sweep = sweep_expired(pool, today).await?;

    let start = time::week_start(date);
    let end = start + Duration::days(6);
    let visits = visit::find_details_in_range(pool, start, end, launch_id).await?;
    let trainings = training::find_details_in_range(pool, start, end).await?;
    let pending = pending_visit::find_details(pool, launch_id).await?;

    let days = time::week_days(start)
        .into_iter()
        .map(|day| CalendarDay {
            date: day,
            is_weekend: time::is_weekend(day),
            is_past: day < today,
            visits: visits
                .iter()
                .filter(|v| v.scheduled_date == day)
                .cloned()
                .collect(),
            trainings: trainings
                .iter()
                .filter(|t| t.session_date == day)
                .cloned()
                .collect(),
        })
        .collect();

    Ok(WeekView {
        week_start: start,
        launch_id,
        days,
        pending,
        expired_completed: sweep.completed,
    })
}
