//! Resolution dispatcher.
//!
//! Polls every `poll_interval` for live gameweeks and tournaments whose
//! window has closed and runs their resolution jobs. A single long-lived
//! Tokio task; per-cycle errors are logged and never fatal.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use pitchside_core::audit::AuditSink;
use pitchside_db::repositories::{LineupRepo, PgStatsProvider, TournamentRepo};
use pitchside_db::DbPool;

use crate::jobs::{BlitzResolver, GameweekResolver};

/// Default polling interval for the dispatcher loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Background dispatcher that resolves due gameweeks and tournaments.
pub struct ResolutionDispatcher {
    pool: DbPool,
    audit: Arc<dyn AuditSink>,
    poll_interval: Duration,
}

impl ResolutionDispatcher {
    /// Create a dispatcher with the default 30-second poll interval.
    pub fn new(pool: DbPool, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            pool,
            audit,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run the dispatcher loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Resolution dispatcher started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Resolution dispatcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep().await {
                        tracing::error!(error = %e, "Resolution sweep failed");
                    }
                }
            }
        }
    }

    /// One sweep: resolve everything whose window has closed.
    async fn sweep(&self) -> Result<(), sqlx::Error> {
        let now = chrono::Utc::now();

        for gameweek in LineupRepo::list_due_gameweeks(&self.pool, now).await? {
            let stats = Arc::new(PgStatsProvider::for_gameweek(
                self.pool.clone(),
                gameweek.id,
            ));
            let resolver =
                GameweekResolver::new(self.pool.clone(), stats, Arc::clone(&self.audit));

            match resolver.resolve(gameweek.id).await {
                Ok(summary) => tracing::info!(
                    gameweek_id = gameweek.id,
                    processed = summary.processed,
                    failed = summary.failed,
                    "Due gameweek resolved",
                ),
                Err(e) => tracing::error!(
                    gameweek_id = gameweek.id,
                    error = %e,
                    "Due gameweek resolution failed",
                ),
            }
        }

        for tournament in TournamentRepo::list_due(&self.pool, now).await? {
            let stats = Arc::new(PgStatsProvider::for_gameweek(
                self.pool.clone(),
                tournament.gameweek_id,
            ));
            let resolver = BlitzResolver::new(self.pool.clone(), stats, Arc::clone(&self.audit));

            match resolver.resolve(tournament.id).await {
                Ok(summary) => tracing::info!(
                    tournament_id = tournament.id,
                    processed = summary.processed,
                    failed = summary.failed,
                    "Due tournament resolved",
                ),
                Err(e) => tracing::error!(
                    tournament_id = tournament.id,
                    error = %e,
                    "Due tournament resolution failed",
                ),
            }
        }

        Ok(())
    }
}
