//! Blitz tournament entities.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A short-form tournament scoring a fixed 5-card lineup once.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tournament {
    pub id: DbId,
    pub name: String,
    /// Stats window the entries are scored against.
    pub gameweek_id: DbId,
    pub status: String,
    pub prize_pool: i64,
    pub ends_at: Timestamp,
}

/// One user's entry. `created_at` breaks ranking ties (earlier wins).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TournamentEntry {
    pub id: DbId,
    pub tournament_id: DbId,
    pub user_id: DbId,
    pub total_score: Option<i64>,
    pub rank: Option<i32>,
    pub win_amount: i64,
    pub created_at: Timestamp,
}

/// One card of an entry's 5-card selection, joined with its snapshot.
#[derive(Debug, Clone, FromRow)]
pub struct EntryCardRow {
    pub entry_id: DbId,
    pub slot_index: i16,
    pub card_id: DbId,
    pub player_id: DbId,
    pub position: String,
}

/// Public leaderboard row written once per processed entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub tournament_id: DbId,
    pub user_id: DbId,
    pub total_score: i64,
    pub rank: i32,
    pub win_amount: i64,
}
