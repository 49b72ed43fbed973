//! Gameweek and fantasy lineup entities.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A scored period during which locked lineups accumulate points.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gameweek {
    pub id: DbId,
    pub status: String,
    pub ends_at: Timestamp,
}

/// One user's fantasy lineup for one gameweek.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lineup {
    pub id: DbId,
    pub gameweek_id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub captain_card_id: Option<DbId>,
    pub score_total: Option<i64>,
}

/// One slot of a lineup joined with its card's cached player snapshot.
///
/// Slots 0..10 are starters; bench slots follow in substitution order.
/// `points` is cached at resolution time.
#[derive(Debug, Clone, FromRow)]
pub struct LineupSlotRow {
    pub lineup_id: DbId,
    pub slot_index: i16,
    pub is_bench: bool,
    pub card_id: DbId,
    pub player_id: DbId,
    pub position: String,
    pub points: Option<i32>,
}
