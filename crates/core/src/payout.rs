//! Blitz tournament ranking and prize distribution.

use std::cmp::Ordering;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of cards in a scoreable blitz entry.
pub const BLITZ_LINEUP_SIZE: usize = 5;

/// Fraction of entries that receive a payout (1 in 10, at least one).
pub const PAYOUT_FRACTION: usize = 10;

/// Prize-pool share for rank 1, in percent.
pub const WINNER_SHARE_PCT: i64 = 50;

/// Prize-pool share for rank 2, in percent.
pub const RUNNER_UP_SHARE_PCT: i64 = 25;

/// Prize-pool share split evenly across ranks 3 and below, in percent.
pub const REST_SHARE_PCT: i64 = 25;

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Ranking order for scored entries: higher score first, earlier entry
/// wins ties.
pub fn compare_entries(
    score_a: i64,
    created_a: Timestamp,
    score_b: i64,
    created_b: Timestamp,
) -> Ordering {
    score_b
        .cmp(&score_a)
        .then_with(|| created_a.cmp(&created_b))
}

// ---------------------------------------------------------------------------
// Payouts
// ---------------------------------------------------------------------------

/// Number of paid ranks for a field of `entry_count` entries.
pub fn payout_count(entry_count: usize) -> usize {
    (entry_count / PAYOUT_FRACTION).max(1)
}

/// Prize for each rank, in rank order (index 0 = rank 1), one element per
/// entry.
///
/// Rank 1 takes 50% of the pool, rank 2 takes 25%, and ranks 3 through
/// `payout_count` split the remaining 25% by floor division; the division
/// remainder stays undistributed. Ranks beyond `payout_count` receive 0.
pub fn payout_table(entry_count: usize, prize_pool: i64) -> Vec<i64> {
    let mut table = vec![0i64; entry_count];
    if entry_count == 0 || prize_pool <= 0 {
        return table;
    }

    let paid = payout_count(entry_count).min(entry_count);

    table[0] = prize_pool * WINNER_SHARE_PCT / 100;
    if paid >= 2 {
        table[1] = prize_pool * RUNNER_UP_SHARE_PCT / 100;
    }

    let rest_count = paid.saturating_sub(2);
    if rest_count > 0 {
        let each = (prize_pool * REST_SHARE_PCT / 100) / rest_count as i64;
        for prize in table.iter_mut().take(paid).skip(2) {
            *prize = each;
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Timestamp {
        chrono::Utc.timestamp_opt(secs, 0).unwrap()
    }

    // -- compare_entries --

    #[test]
    fn higher_score_ranks_first() {
        assert_eq!(compare_entries(30, at(0), 20, at(0)), Ordering::Less);
        assert_eq!(compare_entries(10, at(0), 20, at(0)), Ordering::Greater);
    }

    #[test]
    fn earlier_entry_wins_ties() {
        assert_eq!(compare_entries(30, at(100), 30, at(200)), Ordering::Less);
        assert_eq!(compare_entries(30, at(200), 30, at(100)), Ordering::Greater);
    }

    // -- payout_count --

    #[test]
    fn at_least_one_rank_is_always_paid() {
        assert_eq!(payout_count(1), 1);
        assert_eq!(payout_count(9), 1);
    }

    #[test]
    fn one_in_ten_entries_is_paid() {
        assert_eq!(payout_count(10), 1);
        assert_eq!(payout_count(20), 2);
        assert_eq!(payout_count(35), 3);
        assert_eq!(payout_count(100), 10);
    }

    // -- payout_table --

    #[test]
    fn twenty_entries_pool_1000_pays_two_ranks() {
        let table = payout_table(20, 1_000);
        assert_eq!(table.len(), 20);
        assert_eq!(table[0], 500);
        assert_eq!(table[1], 250);
        // payout_count = 2, so restCount = 0: ranks 3..20 win nothing.
        assert!(table[2..].iter().all(|&p| p == 0));
    }

    #[test]
    fn small_field_pays_winner_only() {
        let table = payout_table(5, 1_000);
        assert_eq!(table[0], 500);
        assert!(table[1..].iter().all(|&p| p == 0));
    }

    #[test]
    fn ranks_three_and_below_split_the_rest_evenly() {
        // 50 entries -> payout_count 5 -> ranks 3..5 split 25%.
        let table = payout_table(50, 1_000);
        assert_eq!(table[0], 500);
        assert_eq!(table[1], 250);
        assert_eq!(table[2], 83);
        assert_eq!(table[3], 83);
        assert_eq!(table[4], 83);
        assert_eq!(table[5], 0);
    }

    #[test]
    fn floor_division_leaves_remainder_undistributed() {
        let table = payout_table(50, 1_000);
        let distributed: i64 = table.iter().sum();
        // 500 + 250 + 3*83 = 999; one coin stays in the pool.
        assert_eq!(distributed, 999);
    }

    #[test]
    fn empty_field_and_empty_pool_pay_nothing() {
        assert!(payout_table(0, 1_000).is_empty());
        assert!(payout_table(10, 0).iter().all(|&p| p == 0));
    }
}
