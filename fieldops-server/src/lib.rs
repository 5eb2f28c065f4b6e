//! Fieldops Server - field operations planning for retail store visits
//!
//! # Overview
//!
//! - **Scheduling** (`services::scheduling`): pending queue, weekly calendar
//!   board and the expiry sweep
//! - **Fixtures and price tags** (`services::fixtures`, `services::price_tags`):
//!   placed devices and the per-chain price-tag catalog
//! - **Launches** (`services::launches`): product launches, impacted stores and
//!   the public price-tag page
//! - **Notifications** (`services::notifications`): templates, `mailto:` links
//!   and the optional email function
//! - **HTTP API** (`api`): REST/JSON routes
//!
//! # Module layout
//!
//! ```text
//! fieldops-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── services/      # business operations
//! ├── api/           # HTTP routes and handlers
//! ├── sweeper.rs     # periodic visit expiry
//! └── utils/         # logging, time, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod sweeper;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use core::{Config, Server, ServerError, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
