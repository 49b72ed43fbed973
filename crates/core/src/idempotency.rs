//! Duplicate-submission decision logic.
//!
//! A rate-limited double-submit guard keyed by (user, operation, target),
//! not a transaction-level idempotency key: concurrent identical requests
//! within the window race on the same record, and the store's per-row
//! locking serializes them.

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sliding window during which identical requests count as duplicates.
pub const WINDOW_MS: i64 = 5_000;

/// Attempt count at which duplicates start being rejected.
pub const MAX_ATTEMPTS: i64 = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Snapshot of the stored attempt record for one key.
#[derive(Debug, Clone, Copy)]
pub struct AttemptSnapshot {
    pub attempt_count: i64,
    pub first_attempt_at: Timestamp,
}

/// Outcome of a duplicate check; the caller persists `attempt_count` (and
/// resets `first_attempt_at` when `is_duplicate` is false).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    pub should_block: bool,
    pub attempt_count: i64,
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Evaluate one attempt against the stored record.
///
/// An absent record, or one whose window has elapsed, resets the count to
/// one. Otherwise the attempt is a duplicate and blocks once the count
/// reaches [`MAX_ATTEMPTS`].
pub fn evaluate(record: Option<&AttemptSnapshot>, now: Timestamp) -> DuplicateCheck {
    match record {
        Some(r) if (now - r.first_attempt_at).num_milliseconds() <= WINDOW_MS => {
            let attempt_count = r.attempt_count + 1;
            DuplicateCheck {
                is_duplicate: true,
                should_block: attempt_count >= MAX_ATTEMPTS,
                attempt_count,
            }
        }
        _ => DuplicateCheck {
            is_duplicate: false,
            should_block: false,
            attempt_count: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> Timestamp {
        chrono::Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn snapshot(attempt_count: i64, first_ms: i64) -> AttemptSnapshot {
        AttemptSnapshot {
            attempt_count,
            first_attempt_at: at(first_ms),
        }
    }

    #[test]
    fn first_attempt_is_not_a_duplicate() {
        let check = evaluate(None, at(0));
        assert!(!check.is_duplicate);
        assert!(!check.should_block);
        assert_eq!(check.attempt_count, 1);
    }

    #[test]
    fn second_attempt_in_window_is_duplicate_but_allowed() {
        let check = evaluate(Some(&snapshot(1, 0)), at(1_000));
        assert!(check.is_duplicate);
        assert!(!check.should_block);
        assert_eq!(check.attempt_count, 2);
    }

    #[test]
    fn third_attempt_in_window_blocks() {
        let check = evaluate(Some(&snapshot(2, 0)), at(2_000));
        assert!(check.is_duplicate);
        assert!(check.should_block);
        assert_eq!(check.attempt_count, 3);
    }

    #[test]
    fn attempt_after_window_elapses_resets() {
        // 4th call, but the 5-second window has passed: fresh window.
        let check = evaluate(Some(&snapshot(3, 0)), at(WINDOW_MS + 1));
        assert!(!check.is_duplicate);
        assert!(!check.should_block);
        assert_eq!(check.attempt_count, 1);
    }

    #[test]
    fn attempt_exactly_at_window_edge_still_counts() {
        let check = evaluate(Some(&snapshot(1, 0)), at(WINDOW_MS));
        assert!(check.is_duplicate);
    }

    #[test]
    fn counts_beyond_the_threshold_stay_blocked() {
        let check = evaluate(Some(&snapshot(7, 0)), at(100));
        assert!(check.should_block);
        assert_eq!(check.attempt_count, 8);
    }
}
