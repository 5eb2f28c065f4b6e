//! Unified error system for the fieldops workspace
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Store errors
//! - 2xxx: Fixture, device and price tag errors
//! - 3xxx: Launch errors
//! - 4xxx: Scheduling errors
//! - 5xxx: Tactician errors
//! - 6xxx: Notification errors
//! - 7xxx: Backup and file errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::DateOnWeekend).with_detail("date", "2026-10-17");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(4006));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
