//! Repository for the tournament tables.

use sqlx::{PgConnection, PgPool};

use pitchside_core::types::{DbId, Timestamp};

use crate::models::status::TournamentStatus;
use crate::models::tournament::{EntryCardRow, Tournament, TournamentEntry};

/// Column list for `tournaments` SELECT queries.
const TOURNAMENT_COLUMNS: &str = "id, name, gameweek_id, status, prize_pool, ends_at";

/// Column list for `tournament_entries` SELECT queries.
const ENTRY_COLUMNS: &str =
    "id, tournament_id, user_id, total_score, rank, win_amount, created_at";

/// Provides tournament, entry, and leaderboard access for the blitz
/// resolution job.
pub struct TournamentRepo;

impl TournamentRepo {
    /// Find a tournament by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tournament>, sqlx::Error> {
        let query = format!("SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = $1");
        sqlx::query_as::<_, Tournament>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tournaments that are live and past their end time, due for
    /// resolution.
    pub async fn list_due(pool: &PgPool, now: Timestamp) -> Result<Vec<Tournament>, sqlx::Error> {
        let query = format!(
            "SELECT {TOURNAMENT_COLUMNS} FROM tournaments
             WHERE status = $1 AND ends_at <= $2
             ORDER BY id"
        );
        sqlx::query_as::<_, Tournament>(&query)
            .bind(TournamentStatus::Live.as_str())
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Transition a tournament's status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: TournamentStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tournaments SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// All entries of a tournament in creation order.
    pub async fn list_entries(
        pool: &PgPool,
        tournament_id: DbId,
    ) -> Result<Vec<TournamentEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM tournament_entries
             WHERE tournament_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, TournamentEntry>(&query)
            .bind(tournament_id)
            .fetch_all(pool)
            .await
    }

    /// An entry's selected cards joined with their snapshots, in slot
    /// order.
    pub async fn entry_cards(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Vec<EntryCardRow>, sqlx::Error> {
        sqlx::query_as::<_, EntryCardRow>(
            "SELECT ec.entry_id, ec.slot_index, ec.card_id, c.player_id, c.position
             FROM tournament_entry_cards ec
             JOIN cards c ON c.id = ec.card_id
             WHERE ec.entry_id = $1
             ORDER BY ec.slot_index",
        )
        .bind(entry_id)
        .fetch_all(pool)
        .await
    }

    /// Write an entry's computed total score.
    pub async fn set_entry_score(
        pool: &PgPool,
        entry_id: DbId,
        total_score: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tournament_entries SET total_score = $2 WHERE id = $1")
            .bind(entry_id)
            .bind(total_score)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record an entry's final rank and winnings.
    ///
    /// Guarded on `rank IS NULL` so a rerun after a crash never settles
    /// the same entry twice. Returns `false` when the entry was already
    /// settled.
    pub async fn settle_entry(
        conn: &mut PgConnection,
        entry_id: DbId,
        rank: i32,
        win_amount: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tournament_entries SET rank = $2, win_amount = $3
             WHERE id = $1 AND rank IS NULL",
        )
        .bind(entry_id)
        .bind(rank)
        .bind(win_amount)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Publish one leaderboard row.
    pub async fn insert_leaderboard_entry(
        conn: &mut PgConnection,
        tournament_id: DbId,
        user_id: DbId,
        total_score: i64,
        rank: i32,
        win_amount: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO leaderboard_entries
                (tournament_id, user_id, total_score, rank, win_amount)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (tournament_id, user_id) DO NOTHING",
        )
        .bind(tournament_id)
        .bind(user_id)
        .bind(total_score)
        .bind(rank)
        .bind(win_amount)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
