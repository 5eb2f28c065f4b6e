//! Shared types for the fieldops workspace
//!
//! Domain models, error types, response structures and small utilities used
//! by the server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
