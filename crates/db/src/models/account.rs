//! Account entity: coin and experience balances.
//!
//! Balances are mutated only through the ledger primitives in
//! `AccountRepo`, never read-then-written outside a transaction.

use pitchside_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A platform account. The owned-card inventory is the set of `cards`
/// rows whose `owner_id` points here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub display_name: String,
    pub role: String,
    pub coins: i64,
    pub xp: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
