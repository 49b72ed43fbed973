//! Route definitions for the `/resolution` resource.
//!
//! Admin-only manual triggers for the batch resolution jobs.

use axum::routing::post;
use axum::Router;

use crate::handlers::resolution;
use crate::state::AppState;

/// Routes mounted at `/resolution`.
///
/// ```text
/// POST   /gameweeks/{id}       -> resolve_gameweek (admin)
/// POST   /tournaments/{id}     -> resolve_blitz (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/gameweeks/{id}", post(resolution::resolve_gameweek))
        .route("/tournaments/{id}", post(resolution::resolve_blitz))
}
