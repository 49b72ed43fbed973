//! Player reference data and per-gameweek statistics.

use pitchside_core::scoring::PlayerStats;
use pitchside_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A real-world player reference; the sample universe for pack draws.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: DbId,
    pub name: String,
    pub position: String,
    pub team: Option<String>,
}

/// Raw statistics row written by the external ingestion pipeline.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerStatsRow {
    pub gameweek_id: DbId,
    pub player_id: DbId,
    pub minutes: i32,
    pub goals: i32,
    pub assists: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub clean_sheet: bool,
    pub goals_conceded: i32,
}

impl PlayerStatsRow {
    /// Convert into the scoring engine's input type.
    ///
    /// Negative values cannot occur (ingestion writes counts), but clamp
    /// anyway so a corrupt row cannot underflow the casts.
    pub fn to_stats(&self) -> PlayerStats {
        PlayerStats {
            minutes: self.minutes.max(0) as u32,
            goals: self.goals.max(0) as u32,
            assists: self.assists.max(0) as u32,
            yellow_cards: self.yellow_cards.max(0) as u32,
            red_cards: self.red_cards.max(0) as u32,
            clean_sheet: self.clean_sheet,
            goals_conceded: self.goals_conceded.max(0) as u32,
        }
    }
}
