//! Weekly calendar board views

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::training::TrainingDetail;
use super::visit::{PendingVisitDetail, VisitDetail};

/// One day column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_past: bool,
    pub visits: Vec<VisitDetail>,
    pub trainings: Vec<TrainingDetail>,
}

/// Seven-day window starting on a Monday, plus the pending queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub launch_id: Option<i64>,
    pub days: Vec<CalendarDay>,
    pub pending: Vec<PendingVisitDetail>,
    /// Visits auto-completed by the sweep that ran for this load
    pub expired_completed: u64,
}
