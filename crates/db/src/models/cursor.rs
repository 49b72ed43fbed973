//! Resumable batch-run cursor.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Progress marker for one resolution run.
///
/// A `running` cursor left behind by a crashed process tells the next run
/// that some entities may already be in their terminal state; resolvers
/// select only non-terminal entities, so rerunning is safe.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResolutionCursor {
    pub job_type: String,
    pub target_id: DbId,
    pub status: String,
    pub processed: i64,
    pub failed: i64,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Job type constants for cursor rows.
pub mod job_types {
    pub const GAMEWEEK: &str = "gameweek";
    pub const BLITZ: &str = "blitz";
}
