//! Visit expiry sweeper
//!
//! Calendar loads already sweep expired visits; this task does the same on a
//! fixed period so visits complete even when nobody opens the board.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::ServerState;
use crate::services::scheduling;

/// Registered as `TaskKind::Periodic` in `start_background_tasks()`
pub struct VisitExpirySweeper {
    state: ServerState,
    shutdown: CancellationToken,
}

impl VisitExpirySweeper {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    /// Sweep once at startup, then every `sweep_interval_secs`
    pub async fn run(self) {
        let period = Duration::from_secs(self.state.config.sweep_interval_secs);
        tracing::info!(period_secs = period.as_secs(), "Visit expiry sweeper started");

        loop {
            self.sweep_once().await;

            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Visit expiry sweeper received shutdown signal");
                    break;
                }
            }
        }

        tracing::info!("Visit expiry sweeper stopped");
    }

    async fn sweep_once(&self) {
        let today = self.state.today();
        if let Err(e) = scheduling::sweep_expired(&self.state.pool, today).await {
            tracing::error!(error = %e, "Visit expiry sweep failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::db::repository::visit;
    use crate::test_support::{date, seed_store};
    use shared::models::{Chain, StoreCategory, VisitStatus};

    #[tokio::test]
    async fn test_sweeper_completes_past_visits_and_stops() {
        let pool = crate::db::test_pool().await;
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        let state = ServerState::from_pool(config, pool.clone()).unwrap();

        let s = seed_store(&pool, "A", StoreCategory::White, Chain::Comet).await;
        let v = visit::insert(&pool, s.id, None, date("2020-01-06"), StoreCategory::White, None)
            .await
            .unwrap();

        let token = CancellationToken::new();
        let handle = tokio::spawn(VisitExpirySweeper::new(state, token.clone()).run());

        let mut status = VisitStatus::Scheduled;
        for _ in 0..50 {
            status = visit::find_by_id(&pool, v.id).await.unwrap().unwrap().status;
            if status == VisitStatus::Completed {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(status, VisitStatus::Completed);

        token.cancel();
        handle.await.unwrap();
    }
}
