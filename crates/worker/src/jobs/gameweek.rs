//! Gameweek resolution job.
//!
//! Runs only for a `live` gameweek and only over its still-`locked`
//! lineups. Each lineup settles in its own transaction so one user's
//! failure never blocks the rest; a rerun after a crash picks up exactly
//! the lineups that are still `locked`.

use std::sync::Arc;

use pitchside_core::audit::{operations, AuditSink, FailedOperation};
use pitchside_core::error::{CoreError, Precondition};
use pitchside_core::lineup::{
    resolve_lineup, SlotScore, REWARD_COINS_PER_POINT, REWARD_XP_PER_POINT,
};
use pitchside_core::scoring::{self, Position};
use pitchside_core::stats::StatsProvider;
use pitchside_core::types::DbId;
use pitchside_db::models::cursor::job_types;
use pitchside_db::models::lineup::Lineup;
use pitchside_db::models::status::GameweekStatus;
use pitchside_db::repositories::{AccountRepo, CursorRepo, LineupRepo};
use pitchside_db::DbPool;

use crate::error::{JobError, JobResult};
use crate::jobs::ResolutionSummary;

/// Resolves one gameweek: scores lineups, applies substitutions and
/// captaincy, and disburses rewards.
pub struct GameweekResolver {
    pool: DbPool,
    stats: Arc<dyn StatsProvider>,
    audit: Arc<dyn AuditSink>,
}

impl GameweekResolver {
    pub fn new(pool: DbPool, stats: Arc<dyn StatsProvider>, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, stats, audit }
    }

    /// Resolve every locked lineup of the gameweek, then flip the
    /// gameweek to `finished`.
    pub async fn resolve(&self, gameweek_id: DbId) -> JobResult<ResolutionSummary> {
        let gameweek = LineupRepo::find_gameweek(&self.pool, gameweek_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Gameweek",
                id: gameweek_id,
            })?;

        if gameweek.status != GameweekStatus::Live.as_str() {
            return Err(CoreError::PreconditionFailed(Precondition::GameweekNotLive).into());
        }

        CursorRepo::open(&self.pool, job_types::GAMEWEEK, gameweek_id).await?;

        let lineups = LineupRepo::list_locked(&self.pool, gameweek_id).await?;
        tracing::info!(
            gameweek_id,
            lineups = lineups.len(),
            "Gameweek resolution started",
        );

        let mut summary = ResolutionSummary::default();
        for lineup in &lineups {
            match self.resolve_one(lineup).await {
                Ok(Some(total)) => {
                    summary.processed += 1;
                    CursorRepo::bump(&self.pool, job_types::GAMEWEEK, gameweek_id, 1, 0).await?;
                    tracing::debug!(
                        lineup_id = lineup.id,
                        user_id = lineup.user_id,
                        total,
                        "Lineup resolved",
                    );
                }
                Ok(None) => {
                    // Settled by a concurrent or earlier run.
                    summary.skipped += 1;
                }
                Err(err) => {
                    summary.failed += 1;
                    tracing::error!(
                        lineup_id = lineup.id,
                        user_id = lineup.user_id,
                        error = %err,
                        "Lineup resolution failed, continuing",
                    );
                    self.report_failure(lineup, &err).await;
                    CursorRepo::bump(&self.pool, job_types::GAMEWEEK, gameweek_id, 0, 1).await?;
                }
            }
        }

        LineupRepo::set_gameweek_status(&self.pool, gameweek_id, GameweekStatus::Finished).await?;
        CursorRepo::complete(&self.pool, job_types::GAMEWEEK, gameweek_id).await?;

        tracing::info!(
            gameweek_id,
            processed = summary.processed,
            failed = summary.failed,
            skipped = summary.skipped,
            "Gameweek resolution finished",
        );
        Ok(summary)
    }

    /// Settle one lineup in its own transaction.
    ///
    /// Returns `None` when the lineup is no longer `locked` (another run
    /// got there first), in which case nothing is written.
    async fn resolve_one(&self, lineup: &Lineup) -> JobResult<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let rows = LineupRepo::slots(&mut tx, lineup.id).await?;

        let mut starters: Vec<SlotScore> = Vec::new();
        let mut bench: Vec<SlotScore> = Vec::new();
        let mut slot_points: Vec<(i16, i32)> = Vec::with_capacity(rows.len());

        for row in &rows {
            let position = Position::from_str(&row.position).ok_or_else(|| {
                CoreError::Internal(format!(
                    "card {} has unknown position {:?}",
                    row.card_id, row.position
                ))
            })?;

            let stats = self
                .stats
                .player_stats(row.player_id)
                .await?
                .unwrap_or_default();

            let score = SlotScore {
                card_id: row.card_id,
                position,
                minutes: stats.minutes,
                points: scoring::points(position, &stats),
            };

            slot_points.push((row.slot_index, score.points));
            if row.is_bench {
                bench.push(score);
            } else {
                starters.push(score);
            }
        }

        let resolved = resolve_lineup(&starters, &bench, lineup.captain_card_id);
        let total = resolved.total as i64;

        for (slot_index, points) in slot_points {
            LineupRepo::set_slot_points(&mut tx, lineup.id, slot_index, points).await?;
        }

        if !LineupRepo::finish(&mut tx, lineup.id, total).await? {
            tx.rollback().await?;
            return Ok(None);
        }

        // Rewards never go negative; a bad week pays nothing.
        let reward_base = total.max(0);
        AccountRepo::credit_rewards(
            &mut tx,
            lineup.user_id,
            reward_base * REWARD_COINS_PER_POINT,
            reward_base * REWARD_XP_PER_POINT,
        )
        .await?;

        tx.commit().await?;
        Ok(Some(total))
    }

    async fn report_failure(&self, lineup: &Lineup, err: &JobError) {
        let failure = FailedOperation {
            operation: operations::RESOLVE_GAMEWEEK,
            user_id: Some(lineup.user_id),
            target_id: Some(lineup.id),
            kind: err.kind(),
            message: err.to_string(),
            partial_state: serde_json::json!({
                "gameweek_id": lineup.gameweek_id,
                "lineup_id": lineup.id,
            }),
        };

        if let Err(sink_err) = self.audit.record_failure(failure).await {
            tracing::error!(error = %sink_err, "Audit sink rejected a failure record");
        }
    }
}
