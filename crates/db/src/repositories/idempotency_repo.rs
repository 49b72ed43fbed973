//! Repository for the `idempotency_records` table.
//!
//! The duplicate check is a read-modify-write in its own small
//! transaction: `SELECT ... FOR UPDATE` serializes concurrent identical
//! requests on the single record, which is all the guard promises — it is
//! a rate limiter, not a strict idempotency key.

use sqlx::PgPool;

use pitchside_core::idempotency::{self, DuplicateCheck};
use pitchside_core::types::{DbId, Timestamp};

use crate::models::idempotency::IdempotencyRecord;

/// Column list for `idempotency_records` SELECT queries.
const COLUMNS: &str = "\
    user_id, operation, target_id, attempt_count, \
    first_attempt_at, last_attempt_at, blocked";

/// Provides duplicate detection and attempt-record cleanup.
pub struct IdempotencyRepo;

impl IdempotencyRepo {
    /// Run one duplicate check for (user, operation, target) at `now`.
    ///
    /// Loads the record under a row lock, applies the core decision
    /// function, and persists the updated attempt state before returning.
    pub async fn detect(
        pool: &PgPool,
        user_id: DbId,
        operation: &str,
        target_id: DbId,
        now: Timestamp,
    ) -> Result<DuplicateCheck, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM idempotency_records
             WHERE user_id = $1 AND operation = $2 AND target_id = $3
             FOR UPDATE"
        );
        let record = sqlx::query_as::<_, IdempotencyRecord>(&query)
            .bind(user_id)
            .bind(operation)
            .bind(target_id)
            .fetch_optional(&mut *tx)
            .await?;

        let snapshot = record.as_ref().map(IdempotencyRecord::snapshot);
        let check = idempotency::evaluate(snapshot.as_ref(), now);

        if check.is_duplicate {
            sqlx::query(
                "UPDATE idempotency_records
                 SET attempt_count = $4, last_attempt_at = $5, blocked = $6
                 WHERE user_id = $1 AND operation = $2 AND target_id = $3",
            )
            .bind(user_id)
            .bind(operation)
            .bind(target_id)
            .bind(check.attempt_count)
            .bind(now)
            .bind(check.should_block)
            .execute(&mut *tx)
            .await?;
        } else {
            // First attempt, or the window elapsed: start a fresh window.
            sqlx::query(
                "INSERT INTO idempotency_records
                    (user_id, operation, target_id, attempt_count,
                     first_attempt_at, last_attempt_at, blocked)
                 VALUES ($1, $2, $3, 1, $4, $4, false)
                 ON CONFLICT (user_id, operation, target_id) DO UPDATE SET
                    attempt_count = 1,
                    first_attempt_at = $4,
                    last_attempt_at = $4,
                    blocked = false",
            )
            .bind(user_id)
            .bind(operation)
            .bind(target_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(check)
    }

    /// Delete the attempt record after the guarded operation succeeds, so
    /// a legitimate retry starts a fresh window.
    pub async fn clear(
        pool: &PgPool,
        user_id: DbId,
        operation: &str,
        target_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM idempotency_records
             WHERE user_id = $1 AND operation = $2 AND target_id = $3",
        )
        .bind(user_id)
        .bind(operation)
        .bind(target_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
