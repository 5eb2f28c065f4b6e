//! Shared application state

use std::path::PathBuf;

use sqlx::SqlitePool;

use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::Config;
use crate::db::DbService;
use crate::services::notifications::EmailFunctionClient;
use crate::services::storage::PriceTagStorage;
use crate::sweeper::VisitExpirySweeper;
use crate::utils::time;
use crate::utils::AppResult;

/// Application state shared by every handler (cheap to clone)
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    /// Price-tag PDF store under `{work_dir}/price_tags`
    pub storage: PriceTagStorage,
    /// Remote email function, if configured
    pub mailer: Option<EmailFunctionClient>,
}

impl ServerState {
    /// Open the database, prepare the work directory and build clients
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            shared::AppError::config(format!(
                "Failed to create work dir {}: {e}",
                config.work_dir
            ))
        })?;

        let db = DbService::new(&config.database_path).await?;
        Self::from_pool(config.clone(), db.pool)
    }

    /// Build state around an existing pool (used by tests)
    pub fn from_pool(config: Config, pool: SqlitePool) -> AppResult<Self> {
        let storage = PriceTagStorage::new(
            PathBuf::from(&config.work_dir).join("price_tags"),
            config.max_upload_bytes,
        );
        let mailer = EmailFunctionClient::from_config(&config)?;
        if mailer.is_none() {
            tracing::info!("EMAIL_FUNCTION_URL not set, email delivery disabled (mailto links still available)");
        }

        Ok(Self {
            config,
            pool,
            storage,
            mailer,
        })
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// Today in the business timezone
    pub fn today(&self) -> chrono::NaiveDate {
        time::today(self.config.timezone)
    }

    /// Start background tasks; the caller owns shutdown
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let sweeper = VisitExpirySweeper::new(self.clone(), tasks.shutdown_token());
        tasks.spawn("visit_expiry_sweeper", TaskKind::Periodic, sweeper.run());

        tasks.log_summary();
        tasks
    }
}
