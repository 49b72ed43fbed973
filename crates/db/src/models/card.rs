//! Collectible card entity.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A collectible player card, owned by exactly one account.
///
/// `player_name` and `position` are a snapshot taken at mint time so
/// scoring and listings never re-read the player row. `is_locked` forbids
/// re-listing and lineup placement while true.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: DbId,
    pub owner_id: DbId,
    pub player_id: DbId,
    pub player_name: String,
    pub position: String,
    pub scarcity: String,
    pub is_locked: bool,
    pub created_at: Timestamp,
}
