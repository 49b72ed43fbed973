//! Blitz tournament resolution job.
//!
//! Scores every eligible 5-card entry, ranks the field, and pays the
//! tiered prize pool. Scores and settlements are written per entry in
//! separate transactions; the tournament flips to `completed` only after
//! every entry is processed.

use std::sync::Arc;

use pitchside_core::audit::{operations, AuditSink, FailedOperation};
use pitchside_core::error::{CoreError, Precondition};
use pitchside_core::payout::{self, BLITZ_LINEUP_SIZE};
use pitchside_core::scoring::{self, Position};
use pitchside_core::stats::StatsProvider;
use pitchside_core::types::DbId;
use pitchside_db::models::cursor::job_types;
use pitchside_db::models::status::TournamentStatus;
use pitchside_db::models::tournament::{Tournament, TournamentEntry};
use pitchside_db::repositories::{AccountRepo, CursorRepo, TournamentRepo};
use pitchside_db::DbPool;

use crate::error::{JobError, JobResult};
use crate::jobs::ResolutionSummary;

/// An entry with its computed score, ready for ranking.
struct ScoredEntry {
    entry: TournamentEntry,
    total: i64,
}

/// Resolves one blitz tournament end to end.
pub struct BlitzResolver {
    pool: DbPool,
    stats: Arc<dyn StatsProvider>,
    audit: Arc<dyn AuditSink>,
}

impl BlitzResolver {
    pub fn new(pool: DbPool, stats: Arc<dyn StatsProvider>, audit: Arc<dyn AuditSink>) -> Self {
        Self { pool, stats, audit }
    }

    /// Score, rank, and pay out every entry, then complete the
    /// tournament.
    pub async fn resolve(&self, tournament_id: DbId) -> JobResult<ResolutionSummary> {
        let tournament = TournamentRepo::find_by_id(&self.pool, tournament_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Tournament",
                id: tournament_id,
            })?;

        if tournament.status != TournamentStatus::Live.as_str() {
            return Err(CoreError::PreconditionFailed(Precondition::TournamentNotLive).into());
        }

        CursorRepo::open(&self.pool, job_types::BLITZ, tournament_id).await?;

        let entries = TournamentRepo::list_entries(&self.pool, tournament_id).await?;
        tracing::info!(
            tournament_id,
            entries = entries.len(),
            prize_pool = tournament.prize_pool,
            "Blitz resolution started",
        );

        let mut summary = ResolutionSummary::default();

        // Score every eligible entry first; the payout tiers depend on
        // the size of the scored field.
        let mut scored: Vec<ScoredEntry> = Vec::new();
        for entry in entries {
            match self.score_entry(&entry).await {
                Ok(Some(total)) => scored.push(ScoredEntry { entry, total }),
                Ok(None) => {
                    // Not a complete 5-card lineup; never ranked.
                    summary.skipped += 1;
                }
                Err(err) => {
                    summary.failed += 1;
                    tracing::error!(
                        entry_id = entry.id,
                        user_id = entry.user_id,
                        error = %err,
                        "Entry scoring failed, continuing",
                    );
                    self.report_failure(&entry, &err).await;
                    CursorRepo::bump(&self.pool, job_types::BLITZ, tournament_id, 0, 1).await?;
                }
            }
        }

        scored.sort_by(|a, b| {
            payout::compare_entries(
                a.total,
                a.entry.created_at,
                b.total,
                b.entry.created_at,
            )
        });
        let payouts = payout::payout_table(scored.len(), tournament.prize_pool);

        for (i, s) in scored.iter().enumerate() {
            let rank = (i + 1) as i32;
            let win_amount = payouts[i];

            match self.settle_entry(&tournament, s, rank, win_amount).await {
                Ok(true) => {
                    summary.processed += 1;
                    CursorRepo::bump(&self.pool, job_types::BLITZ, tournament_id, 1, 0).await?;
                }
                Ok(false) => {
                    // Settled by an earlier, crashed run.
                    summary.skipped += 1;
                }
                Err(err) => {
                    summary.failed += 1;
                    tracing::error!(
                        entry_id = s.entry.id,
                        user_id = s.entry.user_id,
                        rank,
                        error = %err,
                        "Entry settlement failed, continuing",
                    );
                    self.report_failure(&s.entry, &err).await;
                    CursorRepo::bump(&self.pool, job_types::BLITZ, tournament_id, 0, 1).await?;
                }
            }
        }

        TournamentRepo::set_status(&self.pool, tournament_id, TournamentStatus::Completed).await?;
        CursorRepo::complete(&self.pool, job_types::BLITZ, tournament_id).await?;

        tracing::info!(
            tournament_id,
            processed = summary.processed,
            failed = summary.failed,
            skipped = summary.skipped,
            "Blitz resolution finished",
        );
        Ok(summary)
    }

    /// Score one entry's 5-card lineup and persist the total.
    ///
    /// Returns `None` for entries without a complete lineup; they take no
    /// part in ranking or payouts.
    async fn score_entry(&self, entry: &TournamentEntry) -> JobResult<Option<i64>> {
        let cards = TournamentRepo::entry_cards(&self.pool, entry.id).await?;
        if cards.len() != BLITZ_LINEUP_SIZE {
            return Ok(None);
        }

        let mut total = 0i64;
        for card in &cards {
            let position = Position::from_str(&card.position).ok_or_else(|| {
                CoreError::Internal(format!(
                    "card {} has unknown position {:?}",
                    card.card_id, card.position
                ))
            })?;

            let stats = self
                .stats
                .player_stats(card.player_id)
                .await?
                .unwrap_or_default();

            total += scoring::points(position, &stats) as i64;
        }

        TournamentRepo::set_entry_score(&self.pool, entry.id, total).await?;
        Ok(Some(total))
    }

    /// Write rank, winnings, and the leaderboard row, and credit the
    /// winner, in one transaction.
    ///
    /// Returns `false` without writing when the entry already carries a
    /// rank, so reruns never credit twice.
    async fn settle_entry(
        &self,
        tournament: &Tournament,
        scored: &ScoredEntry,
        rank: i32,
        win_amount: i64,
    ) -> JobResult<bool> {
        let mut tx = self.pool.begin().await?;

        if !TournamentRepo::settle_entry(&mut tx, scored.entry.id, rank, win_amount).await? {
            tx.rollback().await?;
            return Ok(false);
        }

        TournamentRepo::insert_leaderboard_entry(
            &mut tx,
            tournament.id,
            scored.entry.user_id,
            scored.total,
            rank,
            win_amount,
        )
        .await?;

        if win_amount > 0 {
            AccountRepo::credit_coins(&mut tx, scored.entry.user_id, win_amount).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    async fn report_failure(&self, entry: &TournamentEntry, err: &JobError) {
        let failure = FailedOperation {
            operation: operations::RESOLVE_BLITZ,
            user_id: Some(entry.user_id),
            target_id: Some(entry.id),
            kind: err.kind(),
            message: err.to_string(),
            partial_state: serde_json::json!({
                "tournament_id": entry.tournament_id,
                "entry_id": entry.id,
            }),
        };

        if let Err(sink_err) = self.audit.record_failure(failure).await {
            tracing::error!(error = %sink_err, "Audit sink rejected a failure record");
        }
    }
}
