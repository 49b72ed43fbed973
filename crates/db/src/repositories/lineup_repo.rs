//! Repository for the `gameweeks`, `lineups`, and `lineup_slots` tables.

use sqlx::{PgConnection, PgPool};

use pitchside_core::types::{DbId, Timestamp};

use crate::models::lineup::{Gameweek, Lineup, LineupSlotRow};
use crate::models::status::{GameweekStatus, LineupStatus};

/// Column list for `gameweeks` SELECT queries.
const GAMEWEEK_COLUMNS: &str = "id, status, ends_at";

/// Column list for `lineups` SELECT queries.
const LINEUP_COLUMNS: &str = "id, gameweek_id, user_id, status, captain_card_id, score_total";

/// Provides gameweek and lineup access for the resolution job.
pub struct LineupRepo;

impl LineupRepo {
    /// Find a gameweek by its primary key.
    pub async fn find_gameweek(pool: &PgPool, id: DbId) -> Result<Option<Gameweek>, sqlx::Error> {
        let query = format!("SELECT {GAMEWEEK_COLUMNS} FROM gameweeks WHERE id = $1");
        sqlx::query_as::<_, Gameweek>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Gameweeks that are live and past their end time, due for resolution.
    pub async fn list_due_gameweeks(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<Gameweek>, sqlx::Error> {
        let query = format!(
            "SELECT {GAMEWEEK_COLUMNS} FROM gameweeks
             WHERE status = $1 AND ends_at <= $2
             ORDER BY id"
        );
        sqlx::query_as::<_, Gameweek>(&query)
            .bind(GameweekStatus::Live.as_str())
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Transition a gameweek's status.
    pub async fn set_gameweek_status(
        pool: &PgPool,
        id: DbId,
        status: GameweekStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE gameweeks SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// All still-locked lineups of a gameweek.
    ///
    /// Lineups already `finished` are excluded, which is what makes a
    /// rerun of a crashed resolution safe: they are never scored or
    /// credited twice.
    pub async fn list_locked(pool: &PgPool, gameweek_id: DbId) -> Result<Vec<Lineup>, sqlx::Error> {
        let query = format!(
            "SELECT {LINEUP_COLUMNS} FROM lineups
             WHERE gameweek_id = $1 AND status = $2
             ORDER BY id"
        );
        sqlx::query_as::<_, Lineup>(&query)
            .bind(gameweek_id)
            .bind(LineupStatus::Locked.as_str())
            .fetch_all(pool)
            .await
    }

    /// All slots of a lineup joined with card snapshots, in slot order.
    pub async fn slots(
        conn: &mut PgConnection,
        lineup_id: DbId,
    ) -> Result<Vec<LineupSlotRow>, sqlx::Error> {
        sqlx::query_as::<_, LineupSlotRow>(
            "SELECT s.lineup_id, s.slot_index, s.is_bench, s.card_id,
                    c.player_id, c.position, s.points
             FROM lineup_slots s
             JOIN cards c ON c.id = s.card_id
             WHERE s.lineup_id = $1
             ORDER BY s.slot_index",
        )
        .bind(lineup_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Cache one slot's computed points.
    pub async fn set_slot_points(
        conn: &mut PgConnection,
        lineup_id: DbId,
        slot_index: i16,
        points: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE lineup_slots SET points = $3
             WHERE lineup_id = $1 AND slot_index = $2",
        )
        .bind(lineup_id)
        .bind(slot_index)
        .bind(points)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Write the final score and flip the lineup to `finished`.
    ///
    /// Guarded on `locked` so a concurrent or repeated resolution of the
    /// same lineup settles exactly once.
    pub async fn finish(
        conn: &mut PgConnection,
        lineup_id: DbId,
        score_total: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE lineups SET status = $2, score_total = $3
             WHERE id = $1 AND status = $4",
        )
        .bind(lineup_id)
        .bind(LineupStatus::Finished.as_str())
        .bind(score_total)
        .bind(LineupStatus::Locked.as_str())
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
