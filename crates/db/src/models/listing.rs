//! Marketplace listing entity.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A seller's offer to sell one card at a fixed price.
///
/// `net_seller` is the tax-adjusted payout computed when the listing is
/// created; the sale trusts it and never recomputes. `card_snapshot`
/// denormalizes the card for display without a join.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub card_id: DbId,
    pub seller_id: DbId,
    pub seller_name: String,
    pub price: i64,
    pub net_seller: i64,
    pub status: String,
    pub card_snapshot: serde_json::Value,
    pub buyer_id: Option<DbId>,
    pub sold_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
