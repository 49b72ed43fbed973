//! Repository for the `packs` table.

use sqlx::{PgConnection, PgPool};

use pitchside_core::types::DbId;

use crate::models::pack::Pack;

/// Column list for `packs` SELECT queries.
const COLUMNS: &str = "id, name, price, stock, contents";

/// Provides pack lookups and the stock ledger primitive.
pub struct PackRepo;

impl PackRepo {
    /// Find a pack by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pack>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM packs WHERE id = $1");
        sqlx::query_as::<_, Pack>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a pack, row-locked for the open transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Pack>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM packs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Pack>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Atomically take one unit of stock, guarded on availability.
    ///
    /// Returns `false` (and writes nothing) when the pack is sold out.
    pub async fn decrement_stock(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE packs SET stock = stock - 1 WHERE id = $1 AND stock > 0")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
