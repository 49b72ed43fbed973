//! Repository for the `listings` table.

use sqlx::{PgConnection, PgPool};

use pitchside_core::types::{DbId, Timestamp};

use crate::models::listing::Listing;
use crate::models::status::ListingStatus;

/// Column list for `listings` SELECT queries.
const COLUMNS: &str = "\
    id, card_id, seller_id, seller_name, price, net_seller, status, \
    card_snapshot, buyer_id, sold_at, created_at";

/// Provides listing creation and lifecycle transitions.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new `active` listing, returning the created row.
    ///
    /// `net_seller` and `card_snapshot` are fixed here; the sale trusts
    /// both without re-reading the card or recomputing the tax.
    pub async fn create(
        conn: &mut PgConnection,
        card_id: DbId,
        seller_id: DbId,
        seller_name: &str,
        price: i64,
        net_seller: i64,
        card_snapshot: &serde_json::Value,
    ) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings
                (card_id, seller_id, seller_name, price, net_seller, status, card_snapshot)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(card_id)
            .bind(seller_id)
            .bind(seller_name)
            .bind(price)
            .bind(net_seller)
            .bind(ListingStatus::Active.as_str())
            .bind(card_snapshot)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a listing by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a listing, row-locked for the open transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Transition an `active` listing to `sold`, recording the buyer.
    pub async fn mark_sold(
        conn: &mut PgConnection,
        id: DbId,
        buyer_id: DbId,
        sold_at: Timestamp,
    ) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "UPDATE listings
             SET status = $2, buyer_id = $3, sold_at = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(ListingStatus::Sold.as_str())
            .bind(buyer_id)
            .bind(sold_at)
            .fetch_one(&mut *conn)
            .await
    }

    /// Transition an `active` listing to `cancelled`.
    pub async fn mark_cancelled(conn: &mut PgConnection, id: DbId) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(ListingStatus::Cancelled.as_str())
            .fetch_one(&mut *conn)
            .await
    }
}
