//! Audit trail, rollback counter, and alert entities.
//!
//! Audit records are append-only and never mutated.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One recorded failure of a money-moving operation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditRecord {
    pub id: DbId,
    pub operation: String,
    pub user_id: Option<DbId>,
    pub target_id: Option<DbId>,
    pub error_kind: String,
    pub message: String,
    /// Intended-write flags at the moment the transaction aborted.
    pub partial_state: serde_json::Value,
    pub created_at: Timestamp,
}

/// Rolling rollback count per operation type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RollbackCounter {
    pub operation: String,
    pub count: i64,
}

/// An error-volume alert raised by the threshold check.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alert {
    pub id: DbId,
    pub severity: String,
    pub message: String,
    pub error_count: i64,
    pub created_at: Timestamp,
}
