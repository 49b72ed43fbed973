//! Repository for the `accounts` table, including the coin ledger
//! primitives.
//!
//! Balance mutations are atomic conditional UPDATEs taking
//! `&mut PgConnection` so they always execute inside the caller's
//! transaction; there is no read-modify-write anywhere.

use sqlx::{PgConnection, PgPool};

use pitchside_core::types::DbId;

use crate::models::account::Account;

/// Column list for `accounts` SELECT queries.
const COLUMNS: &str = "id, display_name, role, coins, xp, created_at, updated_at";

/// Provides account lookups and the coin/xp ledger primitives.
pub struct AccountRepo;

impl AccountRepo {
    /// Find an account by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account inside an open transaction.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Atomically deduct `amount` coins, guarded on sufficient balance.
    ///
    /// Returns `false` (and writes nothing) when the balance does not
    /// cover the amount; the guard and the decrement are one statement, so
    /// the balance can never go negative under concurrency.
    pub async fn debit_coins(
        conn: &mut PgConnection,
        user_id: DbId,
        amount: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE accounts
             SET coins = coins - $2, updated_at = now()
             WHERE id = $1 AND coins >= $2",
        )
        .bind(user_id)
        .bind(amount)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Atomically add `amount` coins.
    pub async fn credit_coins(
        conn: &mut PgConnection,
        user_id: DbId,
        amount: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts
             SET coins = coins + $2, updated_at = now()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(amount)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Atomically add gameweek rewards: coins and experience together.
    pub async fn credit_rewards(
        conn: &mut PgConnection,
        user_id: DbId,
        coins: i64,
        xp: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts
             SET coins = coins + $2, xp = xp + $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(coins)
        .bind(xp)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}
