//! Repository for the `cards` table.

use sqlx::{PgConnection, PgPool};

use pitchside_core::packs::DrawnCard;
use pitchside_core::types::DbId;

use crate::models::card::Card;

/// Column list for `cards` SELECT queries.
const COLUMNS: &str =
    "id, owner_id, player_id, player_name, position, scarcity, is_locked, created_at";

/// Provides card lookups, lock management, transfer, and minting.
pub struct CardRepo;

impl CardRepo {
    /// Find a card by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a card owned by `owner_id`, row-locked for the open
    /// transaction.
    ///
    /// A card owned by someone else is indistinguishable from an absent
    /// one: both return `None`, matching the per-owner namespacing the
    /// marketplace exposes.
    pub async fn find_owned_for_update(
        conn: &mut PgConnection,
        card_id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1 AND owner_id = $2 FOR UPDATE");
        sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .bind(owner_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Lock a card against re-listing and lineup placement.
    pub async fn lock(conn: &mut PgConnection, card_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE cards SET is_locked = true WHERE id = $1")
            .bind(card_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Release a card's lock.
    pub async fn unlock(conn: &mut PgConnection, card_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE cards SET is_locked = false WHERE id = $1")
            .bind(card_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Move a card to a new owner, unlocked.
    ///
    /// After this the card exists only under the buyer; the seller's
    /// inventory no longer contains it.
    pub async fn transfer(
        conn: &mut PgConnection,
        card_id: DbId,
        new_owner_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE cards SET owner_id = $2, is_locked = false WHERE id = $1")
            .bind(card_id)
            .bind(new_owner_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Mint a new card from a pack draw, owned by `owner_id` and unlocked.
    pub async fn mint(
        conn: &mut PgConnection,
        owner_id: DbId,
        drawn: &DrawnCard,
    ) -> Result<Card, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards (owner_id, player_id, player_name, position, scarcity)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(owner_id)
            .bind(drawn.player.player_id)
            .bind(&drawn.player.name)
            .bind(drawn.player.position.as_str())
            .bind(drawn.scarcity.as_str())
            .fetch_one(&mut *conn)
            .await
    }

    /// Count cards owned by an account.
    pub async fn count_by_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cards WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }
}
