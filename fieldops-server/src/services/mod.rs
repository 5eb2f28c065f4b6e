//! Business services
//!
//! Multi-step operations over the repositories. Validation runs before the
//! first write; multi-row moves run inside one transaction.

pub mod backup;
pub mod catalog;
pub mod fixtures;
pub mod launches;
pub mod notifications;
pub mod price_tags;
pub mod scheduling;
pub mod storage;
pub mod trainings;
