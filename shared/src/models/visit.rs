//! Visit and pending-visit models
//!
//! A scheduling context is either a launch (`launch_id = Some`) or the
//! global board (`launch_id = None`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::store::{Chain, StoreCategory};

/// Visit status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Scheduled visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Visit {
    pub id: i64,
    pub store_id: i64,
    pub launch_id: Option<i64>,
    pub scheduled_date: NaiveDate,
    pub visit_type: StoreCategory,
    pub status: VisitStatus,
    pub tactician_id: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Visit joined with its store for calendar rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VisitDetail {
    pub id: i64,
    pub store_id: i64,
    pub launch_id: Option<i64>,
    pub scheduled_date: NaiveDate,
    pub visit_type: StoreCategory,
    pub status: VisitStatus,
    pub tactician_id: Option<i64>,
    pub notes: Option<String>,
    pub store_name: String,
    pub store_city: Option<String>,
    pub chain: Chain,
}

/// Store queued for scheduling without a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PendingStoreVisit {
    pub id: i64,
    pub store_id: i64,
    pub launch_id: Option<i64>,
    pub visit_type: StoreCategory,
    pub created_at: i64,
}

/// Pending row joined with its store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PendingVisitDetail {
    pub id: i64,
    pub store_id: i64,
    pub launch_id: Option<i64>,
    pub visit_type: StoreCategory,
    pub created_at: i64,
    pub store_name: String,
    pub store_city: Option<String>,
    pub chain: Chain,
}

/// Scheduling context selector (query string)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleContext {
    pub launch_id: Option<i64>,
}

/// Queue every store of a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingImportCategory {
    pub category: StoreCategory,
    pub launch_id: Option<i64>,
}

/// Queue a single store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingImportOne {
    pub store_id: i64,
    pub visit_type: StoreCategory,
    pub launch_id: Option<i64>,
}

/// Drop a pending item on a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePending {
    pub date: NaiveDate,
    pub tactician_id: Option<i64>,
}

/// Drag a visit onto another day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveVisit {
    pub date: NaiveDate,
}

/// Update visit metadata (not date or status)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitUpdate {
    pub tactician_id: Option<i64>,
    pub notes: Option<String>,
}

/// Result of an expiry sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub completed: u64,
}
