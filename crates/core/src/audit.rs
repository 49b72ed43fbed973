//! Audit classification, alert thresholds, and the audit sink seam.
//!
//! Every failed money-moving operation is classified into an [`ErrorKind`]
//! from the typed error value and handed to an injected [`AuditSink`];
//! there is no module-level counter state.

use async_trait::async_trait;

use crate::error::{CoreError, Precondition};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Operation name constants
// ---------------------------------------------------------------------------

/// Operation names used in audit records and rollback counters.
pub mod operations {
    pub const LIST_CARD: &str = "list_card";
    pub const BUY_LISTING: &str = "buy_listing";
    pub const CANCEL_LISTING: &str = "cancel_listing";
    pub const BUY_PACK: &str = "buy_pack";
    pub const RESOLVE_GAMEWEEK: &str = "resolve_gameweek";
    pub const RESOLVE_BLITZ: &str = "resolve_blitz";
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Classified cause of a failed operation, derived from the error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Duplicate,
    InsufficientBalance,
    InactiveListing,
    LockedCard,
    OutOfStock,
    SelfPurchase,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::InsufficientBalance => "insufficient_balance",
            ErrorKind::InactiveListing => "inactive_listing",
            ErrorKind::LockedCard => "locked_card",
            ErrorKind::OutOfStock => "out_of_stock",
            ErrorKind::SelfPurchase => "self_purchase",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Internal => "internal",
        }
    }

    /// Parse from a string, defaulting to `Internal` for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s {
            "duplicate" => ErrorKind::Duplicate,
            "insufficient_balance" => ErrorKind::InsufficientBalance,
            "inactive_listing" => ErrorKind::InactiveListing,
            "locked_card" => ErrorKind::LockedCard,
            "out_of_stock" => ErrorKind::OutOfStock,
            "self_purchase" => ErrorKind::SelfPurchase,
            "unauthorized" => ErrorKind::Unauthorized,
            _ => ErrorKind::Internal,
        }
    }

    /// Only unexpected failures count toward the critical alert threshold;
    /// domain rejections are expected traffic.
    pub fn is_critical(&self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

impl From<&CoreError> for ErrorKind {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::ResourceExhausted(_) => ErrorKind::Duplicate,
            CoreError::Unauthenticated(_) | CoreError::PermissionDenied(_) => {
                ErrorKind::Unauthorized
            }
            CoreError::PreconditionFailed(p) => match p {
                Precondition::InsufficientBalance => ErrorKind::InsufficientBalance,
                Precondition::ListingNotActive => ErrorKind::InactiveListing,
                Precondition::CardLocked => ErrorKind::LockedCard,
                Precondition::OutOfStock | Precondition::EmptyPlayerPool => ErrorKind::OutOfStock,
                Precondition::SelfPurchase => ErrorKind::SelfPurchase,
                Precondition::GameweekNotLive | Precondition::TournamentNotLive => {
                    ErrorKind::Internal
                }
            },
            CoreError::InvalidArgument(_) | CoreError::NotFound { .. } | CoreError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// Severity of an error-volume alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Warning,
    Critical,
}

impl AlertLevel {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
        }
    }
}

/// Trailing window the alert thresholds are evaluated over.
pub const ALERT_WINDOW_SECS: i64 = 3_600;

/// Critical errors in the window that trigger a critical alert.
pub const CRITICAL_ALERT_THRESHOLD: i64 = 3;

/// Total errors in the window that trigger a warning alert.
pub const TOTAL_ALERT_THRESHOLD: i64 = 10;

/// Error volume over the trailing alert window.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorVolume {
    pub critical_last_hour: i64,
    pub total_last_hour: i64,
}

/// Threshold check run after every recorded failure. Critical volume wins
/// when both thresholds are crossed.
pub fn evaluate_thresholds(volume: &ErrorVolume) -> Option<AlertLevel> {
    if volume.critical_last_hour >= CRITICAL_ALERT_THRESHOLD {
        Some(AlertLevel::Critical)
    } else if volume.total_last_hour >= TOTAL_ALERT_THRESHOLD {
        Some(AlertLevel::Warning)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// One failed operation, as handed to the audit sink.
///
/// `partial_state` carries the intended-write flags the operation had set
/// before its transaction aborted. The store commits all-or-nothing, so
/// the flags describe intent for forensics, not persisted partial state.
#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: &'static str,
    pub user_id: Option<DbId>,
    pub target_id: Option<DbId>,
    pub kind: ErrorKind,
    pub message: String,
    pub partial_state: serde_json::Value,
}

/// Append-only failure recorder injected into the trade engine and the
/// batch resolvers.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append a failure record, bump the operation's rollback counter, and
    /// run the alert threshold check.
    async fn record_failure(&self, failure: FailedOperation) -> Result<(), CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- ErrorKind --

    #[test]
    fn error_kind_round_trips_through_strings() {
        for kind in [
            ErrorKind::Duplicate,
            ErrorKind::InsufficientBalance,
            ErrorKind::InactiveListing,
            ErrorKind::LockedCard,
            ErrorKind::OutOfStock,
            ErrorKind::SelfPurchase,
            ErrorKind::Unauthorized,
            ErrorKind::Internal,
        ] {
            assert_eq!(ErrorKind::from_str(kind.as_str()), kind);
        }
    }

    #[test]
    fn unknown_kinds_default_to_internal() {
        assert_eq!(ErrorKind::from_str("mystery"), ErrorKind::Internal);
    }

    #[test]
    fn classification_reads_the_typed_error_value() {
        let err = CoreError::PreconditionFailed(Precondition::SelfPurchase);
        assert_eq!(ErrorKind::from(&err), ErrorKind::SelfPurchase);

        let err = CoreError::ResourceExhausted("buy_pack".into());
        assert_eq!(ErrorKind::from(&err), ErrorKind::Duplicate);

        let err = CoreError::PreconditionFailed(Precondition::EmptyPlayerPool);
        assert_eq!(ErrorKind::from(&err), ErrorKind::OutOfStock);

        let err = CoreError::PermissionDenied("not the seller".into());
        assert_eq!(ErrorKind::from(&err), ErrorKind::Unauthorized);
    }

    #[test]
    fn only_internal_kind_is_critical() {
        assert!(ErrorKind::Internal.is_critical());
        assert!(!ErrorKind::Duplicate.is_critical());
        assert!(!ErrorKind::InsufficientBalance.is_critical());
    }

    // -- Thresholds --

    #[test]
    fn quiet_window_raises_no_alert() {
        let volume = ErrorVolume {
            critical_last_hour: 2,
            total_last_hour: 9,
        };
        assert_eq!(evaluate_thresholds(&volume), None);
    }

    #[test]
    fn three_critical_errors_raise_a_critical_alert() {
        let volume = ErrorVolume {
            critical_last_hour: 3,
            total_last_hour: 3,
        };
        assert_eq!(evaluate_thresholds(&volume), Some(AlertLevel::Critical));
    }

    #[test]
    fn ten_total_errors_raise_a_warning() {
        let volume = ErrorVolume {
            critical_last_hour: 0,
            total_last_hour: 10,
        };
        assert_eq!(evaluate_thresholds(&volume), Some(AlertLevel::Warning));
    }

    #[test]
    fn critical_wins_when_both_thresholds_are_crossed() {
        let volume = ErrorVolume {
            critical_last_hour: 5,
            total_last_hour: 50,
        };
        assert_eq!(evaluate_thresholds(&volume), Some(AlertLevel::Critical));
    }
}
