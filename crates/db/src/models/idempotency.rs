//! Idempotency attempt record.

use pitchside_core::idempotency::AttemptSnapshot;
use pitchside_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// One attempt-tracking record per (user, operation, target) key.
///
/// Created on first attempt, reset once the sliding window elapses,
/// deleted when the guarded operation succeeds.
#[derive(Debug, Clone, FromRow)]
pub struct IdempotencyRecord {
    pub user_id: DbId,
    pub operation: String,
    pub target_id: DbId,
    pub attempt_count: i64,
    pub first_attempt_at: Timestamp,
    pub last_attempt_at: Timestamp,
    pub blocked: bool,
}

impl IdempotencyRecord {
    /// Project into the core decision function's input.
    pub fn snapshot(&self) -> AttemptSnapshot {
        AttemptSnapshot {
            attempt_count: self.attempt_count,
            first_attempt_at: self.first_attempt_at,
        }
    }
}
