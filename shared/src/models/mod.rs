//! Data models
//!
//! Shared between fieldops-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes; timestamps are Unix millis.

pub mod backup;
pub mod calendar;
pub mod chain_price_tag;
pub mod device;
pub mod email_template;
pub mod fixture;
pub mod launch;
pub mod price_tag_page;
pub mod store;
pub mod tactician;
pub mod training;
pub mod visit;

// Re-exports
pub use backup::*;
pub use calendar::*;
pub use chain_price_tag::*;
pub use device::*;
pub use email_template::*;
pub use fixture::*;
pub use launch::*;
pub use price_tag_page::*;
pub use store::*;
pub use tactician::*;
pub use training::*;
pub use visit::*;
