//! Repository for the `resolution_cursors` table.

use sqlx::PgPool;

use pitchside_core::types::DbId;

use crate::models::cursor::ResolutionCursor;
use crate::models::status::CursorStatus;

/// Column list for `resolution_cursors` SELECT queries.
const COLUMNS: &str = "job_type, target_id, status, processed, failed, started_at, completed_at";

/// Provides run markers for the batch resolution jobs.
pub struct CursorRepo;

impl CursorRepo {
    /// Open (or resume) the cursor for one run.
    ///
    /// A pre-existing `running` row is returned as-is: it marks a crashed
    /// or concurrent run whose surviving progress the resolver will skip
    /// entity-by-entity.
    pub async fn open(
        pool: &PgPool,
        job_type: &str,
        target_id: DbId,
    ) -> Result<ResolutionCursor, sqlx::Error> {
        let query = format!(
            "INSERT INTO resolution_cursors (job_type, target_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT (job_type, target_id) DO UPDATE SET status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResolutionCursor>(&query)
            .bind(job_type)
            .bind(target_id)
            .bind(CursorStatus::Running.as_str())
            .fetch_one(pool)
            .await
    }

    /// Add processed/failed counts to the cursor.
    pub async fn bump(
        pool: &PgPool,
        job_type: &str,
        target_id: DbId,
        processed: i64,
        failed: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE resolution_cursors
             SET processed = processed + $3, failed = failed + $4
             WHERE job_type = $1 AND target_id = $2",
        )
        .bind(job_type)
        .bind(target_id)
        .bind(processed)
        .bind(failed)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark the run complete.
    pub async fn complete(
        pool: &PgPool,
        job_type: &str,
        target_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE resolution_cursors
             SET status = $3, completed_at = now()
             WHERE job_type = $1 AND target_id = $2",
        )
        .bind(job_type)
        .bind(target_id)
        .bind(CursorStatus::Completed.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }
}
