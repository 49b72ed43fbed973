//! Health check routes, mounted at the root (not under `/api/v1`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// Routes mounted at `/`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/db", get(health_db))
}

/// GET /health -- process liveness.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /health/db -- database reachability.
async fn health_db(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    pitchside_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok", "database": "ok" })))
}
