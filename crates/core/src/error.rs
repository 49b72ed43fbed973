use crate::types::DbId;

// ---------------------------------------------------------------------------
// Precondition
// ---------------------------------------------------------------------------

/// Typed reason for a failed-precondition rejection.
///
/// Every failure branch raises its own variant so the audit layer can
/// classify errors from the value instead of matching message substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The card is locked (listed on the market or fielded in a lineup).
    CardLocked,
    /// The listing is no longer `active` (already sold or cancelled).
    ListingNotActive,
    /// The pack has no stock left.
    OutOfStock,
    /// The buyer's coin balance does not cover the price.
    InsufficientBalance,
    /// A seller tried to buy their own listing.
    SelfPurchase,
    /// No players are available to draw pack contents from.
    EmptyPlayerPool,
    /// The gameweek is not in `live` state.
    GameweekNotLive,
    /// The tournament is not in `live` state.
    TournamentNotLive,
}

impl Precondition {
    /// Stable identifier for logs and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Precondition::CardLocked => "card_locked",
            Precondition::ListingNotActive => "listing_not_active",
            Precondition::OutOfStock => "out_of_stock",
            Precondition::InsufficientBalance => "insufficient_balance",
            Precondition::SelfPurchase => "self_purchase",
            Precondition::EmptyPlayerPool => "empty_player_pool",
            Precondition::GameweekNotLive => "gameweek_not_live",
            Precondition::TournamentNotLive => "tournament_not_live",
        }
    }
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Precondition::CardLocked => "card is locked",
            Precondition::ListingNotActive => "listing is not active",
            Precondition::OutOfStock => "pack is out of stock",
            Precondition::InsufficientBalance => "coin balance is insufficient",
            Precondition::SelfPurchase => "cannot buy your own listing",
            Precondition::EmptyPlayerPool => "no players available for the pack draw",
            Precondition::GameweekNotLive => "gameweek is not live",
            Precondition::TournamentNotLive => "tournament is not live",
        };
        f.write_str(msg)
    }
}

// ---------------------------------------------------------------------------
// CoreError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(Precondition),

    #[error("Too many attempts: {0}")]
    ResourceExhausted(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// User-facing message, safe to echo to a client.
    ///
    /// Internal details never appear here; `ResourceExhausted` tells the
    /// user to wait before retrying.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Unauthenticated(_) => "You must be signed in to do this.".to_string(),
            CoreError::InvalidArgument(msg) => msg.clone(),
            CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
            CoreError::PermissionDenied(msg) => msg.clone(),
            CoreError::PreconditionFailed(p) => format!("Operation rejected: {p}."),
            CoreError::ResourceExhausted(_) => {
                "Too many identical requests. Wait a few seconds before retrying.".to_string()
            }
            CoreError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_as_str_is_stable() {
        assert_eq!(Precondition::CardLocked.as_str(), "card_locked");
        assert_eq!(Precondition::SelfPurchase.as_str(), "self_purchase");
        assert_eq!(Precondition::OutOfStock.as_str(), "out_of_stock");
    }

    #[test]
    fn resource_exhausted_message_tells_user_to_wait() {
        let err = CoreError::ResourceExhausted("buy_pack".into());
        assert!(err.user_message().contains("Wait"));
    }

    #[test]
    fn internal_message_is_sanitized() {
        let err = CoreError::Internal("connection refused at 10.0.0.3".into());
        assert!(!err.user_message().contains("10.0.0.3"));
    }
}
