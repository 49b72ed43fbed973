//! Handlers for the `/resolution` resource.
//!
//! Manual resolution triggers for operators; the worker's dispatcher
//! resolves due gameweeks and tournaments automatically. Admin only.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use pitchside_core::error::CoreError;
use pitchside_core::types::DbId;
use pitchside_db::repositories::{PgStatsProvider, TournamentRepo};
use pitchside_worker::jobs::{BlitzResolver, GameweekResolver};

use crate::error::AppResult;
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/resolution/gameweeks/{gameweek_id}
///
/// Resolve a live gameweek: score lineups, apply substitutions, and
/// disburse rewards. Returns the run summary.
pub async fn resolve_gameweek(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(gameweek_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    let stats = Arc::new(PgStatsProvider::for_gameweek(state.pool.clone(), gameweek_id));
    let resolver = GameweekResolver::new(state.pool.clone(), stats, Arc::clone(&state.audit));

    let summary = resolver.resolve(gameweek_id).await?;

    tracing::info!(
        gameweek_id,
        triggered_by = auth.user_id,
        processed = summary.processed,
        failed = summary.failed,
        "Manual gameweek resolution completed",
    );

    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/resolution/tournaments/{tournament_id}
///
/// Resolve a live blitz tournament: score entries, rank the field, and
/// pay the prize pool. Returns the run summary.
pub async fn resolve_blitz(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(tournament_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth)?;

    let tournament = TournamentRepo::find_by_id(&state.pool, tournament_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Tournament",
            id: tournament_id,
        })?;

    let stats = Arc::new(PgStatsProvider::for_gameweek(
        state.pool.clone(),
        tournament.gameweek_id,
    ));
    let resolver = BlitzResolver::new(state.pool.clone(), stats, Arc::clone(&state.audit));

    let summary = resolver.resolve(tournament_id).await?;

    tracing::info!(
        tournament_id,
        triggered_by = auth.user_id,
        processed = summary.processed,
        failed = summary.failed,
        "Manual blitz resolution completed",
    );

    Ok(Json(DataResponse { data: summary }))
}
