pub mod health;
pub mod market;
pub mod resolution;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /market/cards/{card_id}/list          list a card for sale (POST)
/// /market/listings/{id}/buy             buy a listing (POST)
/// /market/listings/{id}/cancel          cancel a listing (POST)
/// /market/packs/{id}/buy                buy a pack (POST)
///
/// /resolution/gameweeks/{id}            resolve a gameweek (POST, admin)
/// /resolution/tournaments/{id}          resolve a blitz (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/market", market::router())
        .nest("/resolution", resolution::router())
}
