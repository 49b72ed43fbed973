//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool`, or `&mut PgConnection` for primitives that must run
//! inside a caller-owned transaction.

pub mod account_repo;
pub mod audit_repo;
pub mod card_repo;
pub mod cursor_repo;
pub mod idempotency_repo;
pub mod lineup_repo;
pub mod listing_repo;
pub mod pack_repo;
pub mod player_repo;
pub mod tournament_repo;

pub use account_repo::AccountRepo;
pub use audit_repo::{AuditRepo, PgAuditSink};
pub use card_repo::CardRepo;
pub use cursor_repo::CursorRepo;
pub use idempotency_repo::IdempotencyRepo;
pub use lineup_repo::LineupRepo;
pub use listing_repo::ListingRepo;
pub use pack_repo::PackRepo;
pub use player_repo::{PgPlayerPool, PgStatsProvider, PlayerRepo};
pub use tournament_repo::TournamentRepo;
