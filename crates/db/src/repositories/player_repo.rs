//! Repository for player reference data and statistics, plus the
//! Postgres-backed provider implementations.

use async_trait::async_trait;
use sqlx::PgPool;

use pitchside_core::error::CoreError;
use pitchside_core::packs::{PlayerPool, PlayerSnapshot};
use pitchside_core::scoring::{PlayerStats, Position};
use pitchside_core::stats::StatsProvider;
use pitchside_core::types::DbId;

use crate::models::player::{Player, PlayerStatsRow};

/// Column list for `player_stats` SELECT queries.
const STATS_COLUMNS: &str = "\
    gameweek_id, player_id, minutes, goals, assists, yellow_cards, \
    red_cards, clean_sheet, goals_conceded";

// ---------------------------------------------------------------------------
// PlayerRepo
// ---------------------------------------------------------------------------

/// Provides player sampling and per-gameweek statistics lookups.
pub struct PlayerRepo;

impl PlayerRepo {
    /// A bounded sample of the player universe, in stable id order.
    pub async fn sample_pool(pool: &PgPool, limit: i64) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "SELECT id, name, position, team FROM players ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// One player's statistics row for one gameweek, if present.
    pub async fn stats_for(
        pool: &PgPool,
        gameweek_id: DbId,
        player_id: DbId,
    ) -> Result<Option<PlayerStatsRow>, sqlx::Error> {
        let query = format!(
            "SELECT {STATS_COLUMNS} FROM player_stats
             WHERE gameweek_id = $1 AND player_id = $2"
        );
        sqlx::query_as::<_, PlayerStatsRow>(&query)
            .bind(gameweek_id)
            .bind(player_id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// PgPlayerPool
// ---------------------------------------------------------------------------

/// Player-pool provider backed by the `players` table.
#[derive(Clone)]
pub struct PgPlayerPool {
    pool: PgPool,
}

impl PgPlayerPool {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerPool for PgPlayerPool {
    async fn sample(&self, limit: usize) -> Result<Vec<PlayerSnapshot>, CoreError> {
        let players = PlayerRepo::sample_pool(&self.pool, limit as i64)
            .await
            .map_err(|e| CoreError::Internal(format!("player sample failed: {e}")))?;

        players
            .into_iter()
            .map(|p| {
                let position = Position::from_str(&p.position).ok_or_else(|| {
                    CoreError::Internal(format!(
                        "player {} has unknown position {:?}",
                        p.id, p.position
                    ))
                })?;
                Ok(PlayerSnapshot {
                    player_id: p.id,
                    name: p.name,
                    position,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// PgStatsProvider
// ---------------------------------------------------------------------------

/// Stats provider reading the `player_stats` rows of one gameweek.
#[derive(Clone)]
pub struct PgStatsProvider {
    pool: PgPool,
    gameweek_id: DbId,
}

impl PgStatsProvider {
    pub fn for_gameweek(pool: PgPool, gameweek_id: DbId) -> Self {
        Self { pool, gameweek_id }
    }
}

#[async_trait]
impl StatsProvider for PgStatsProvider {
    async fn player_stats(&self, player_id: DbId) -> Result<Option<PlayerStats>, CoreError> {
        let row = PlayerRepo::stats_for(&self.pool, self.gameweek_id, player_id)
            .await
            .map_err(|e| CoreError::Internal(format!("stats lookup failed: {e}")))?;

        Ok(row.map(|r| r.to_stats()))
    }
}
