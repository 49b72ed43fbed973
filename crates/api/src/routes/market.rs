//! Route definitions for the `/market` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::market;
use crate::state::AppState;

/// Routes mounted at `/market`.
///
/// ```text
/// POST   /cards/{card_id}/list       -> list_card
/// POST   /listings/{id}/buy          -> buy_listing
/// POST   /listings/{id}/cancel       -> cancel_listing
/// POST   /packs/{id}/buy             -> buy_pack
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cards/{card_id}/list", post(market::list_card))
        .route("/listings/{id}/buy", post(market::buy_listing))
        .route("/listings/{id}/cancel", post(market::cancel_listing))
        .route("/packs/{id}/buy", post(market::buy_pack))
}
