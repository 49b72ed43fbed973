//! Handlers for the `/market` resource.
//!
//! All endpoints require authentication via [`AuthUser`]; the caller's
//! identity is the acting account for every operation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use pitchside_core::error::CoreError;
use pitchside_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body for `POST /market/cards/{card_id}/list`.
#[derive(Debug, Deserialize, Validate)]
pub struct ListCardRequest {
    /// Asking price in coins.
    #[validate(range(min = 1, message = "price must be greater than zero"))]
    pub price: i64,
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// POST /api/v1/market/cards/{card_id}/list
///
/// List one of the caller's cards for sale. Returns 201 with the created
/// listing.
pub async fn list_card(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
    Json(input): Json<ListCardRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::InvalidArgument(e.to_string())))?;

    let listing = state.trade.list_card(auth.user_id, card_id, input.price).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

// ---------------------------------------------------------------------------
// Buy
// ---------------------------------------------------------------------------

/// POST /api/v1/market/listings/{listing_id}/buy
///
/// Buy an active listing. The coin transfer, listing closure, and card
/// transfer commit atomically.
pub async fn buy_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = state.trade.buy_listing(auth.user_id, listing_id).await?;

    Ok(Json(DataResponse { data: listing }))
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// POST /api/v1/market/listings/{listing_id}/cancel
///
/// Cancel one of the caller's active listings, unlocking the card.
pub async fn cancel_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = state.trade.cancel_listing(auth.user_id, listing_id).await?;

    Ok(Json(DataResponse { data: listing }))
}

// ---------------------------------------------------------------------------
// Buy pack
// ---------------------------------------------------------------------------

/// POST /api/v1/market/packs/{pack_id}/buy
///
/// Buy a primary-market pack. Returns 201 with the minted cards.
pub async fn buy_pack(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(pack_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let purchase = state.trade.buy_pack(auth.user_id, pack_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: purchase })))
}
