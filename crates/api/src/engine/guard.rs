//! Idempotency guard for money-moving entry points.
//!
//! The check runs in its own micro-transaction before the trade
//! transaction opens, which is why duplicate suppression is a
//! race-tolerant rate limiter rather than a strict serializer.

use chrono::Utc;

use pitchside_core::error::CoreError;
use pitchside_core::types::DbId;
use pitchside_db::repositories::IdempotencyRepo;
use pitchside_db::DbPool;

use crate::error::AppError;

/// Wraps the attempt-record repository with the admit/clear protocol the
/// trade engine uses.
pub struct IdempotencyGuard {
    pool: DbPool,
}

impl IdempotencyGuard {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Admit or reject one attempt before any ledger mutation.
    ///
    /// Duplicates within the window are admitted until the attempt count
    /// reaches the block threshold; from then on the request is rejected
    /// with `ResourceExhausted` without touching the ledger.
    pub async fn admit(
        &self,
        user_id: DbId,
        operation: &'static str,
        target_id: DbId,
    ) -> Result<(), AppError> {
        let check =
            IdempotencyRepo::detect(&self.pool, user_id, operation, target_id, Utc::now()).await?;

        if check.should_block {
            tracing::warn!(
                user_id,
                operation,
                target_id,
                attempt = check.attempt_count,
                "Duplicate submission blocked",
            );
            return Err(CoreError::ResourceExhausted(operation.to_string()).into());
        }

        if check.is_duplicate {
            tracing::debug!(
                user_id,
                operation,
                target_id,
                attempt = check.attempt_count,
                "Duplicate submission within window, admitted",
            );
        }

        Ok(())
    }

    /// Drop the attempt record after a successful operation so a
    /// legitimate retry starts a fresh window.
    pub async fn clear(
        &self,
        user_id: DbId,
        operation: &'static str,
        target_id: DbId,
    ) -> Result<(), AppError> {
        IdempotencyRepo::clear(&self.pool, user_id, operation, target_id).await?;
        Ok(())
    }
}
