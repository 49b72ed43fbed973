//! Lineup resolution: automatic substitutions, captaincy, and totals.
//!
//! Operates on already-scored slots so it stays free of I/O; the worker
//! feeds it one lineup at a time inside that lineup's transaction.

use crate::scoring::Position;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of starting slots in a fantasy lineup.
pub const STARTER_COUNT: usize = 11;

/// Coins credited per point of the final lineup score.
pub const REWARD_COINS_PER_POINT: i64 = 10;

/// Experience credited per point of the final lineup score.
pub const REWARD_XP_PER_POINT: i64 = 5;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// One scored slot before substitution resolution.
#[derive(Debug, Clone, Copy)]
pub struct SlotScore {
    pub card_id: DbId,
    pub position: Position,
    pub minutes: u32,
    pub points: i32,
}

/// One starting slot after substitution resolution.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveSlot {
    /// Card originally fielded in this slot.
    pub starter_card_id: DbId,
    /// Card whose points count for this slot (the starter, or the bench
    /// replacement).
    pub card_id: DbId,
    /// Points contributed by this slot, after captain doubling.
    pub points: i32,
    pub substituted: bool,
}

/// A fully resolved lineup: 11 effective slots and their total.
#[derive(Debug, Clone)]
pub struct ResolvedLineup {
    pub slots: Vec<EffectiveSlot>,
    pub total: i32,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve substitutions, apply captaincy, and total a lineup.
///
/// For each starter with zero minutes, the bench is searched in ascending
/// slot order for the first unused player with minutes, matching position
/// first and falling back to any position. A bench player substitutes at
/// most once, and no reshuffle happens after a substitution is made.
///
/// The captain's points are doubled only when the captain's card survives
/// as an effective slot (a substituted-out captain earns no doubling, and
/// the replacement is not promoted to captain).
pub fn resolve_lineup(
    starters: &[SlotScore],
    bench: &[SlotScore],
    captain_card_id: Option<DbId>,
) -> ResolvedLineup {
    let mut used = vec![false; bench.len()];
    let mut slots = Vec::with_capacity(starters.len());

    for starter in starters {
        if starter.minutes > 0 {
            slots.push(EffectiveSlot {
                starter_card_id: starter.card_id,
                card_id: starter.card_id,
                points: starter.points,
                substituted: false,
            });
            continue;
        }

        let replacement = find_replacement(bench, &used, starter.position);
        match replacement {
            Some(idx) => {
                used[idx] = true;
                slots.push(EffectiveSlot {
                    starter_card_id: starter.card_id,
                    card_id: bench[idx].card_id,
                    points: bench[idx].points,
                    substituted: true,
                });
            }
            None => {
                // No eligible replacement: the slot stands with zero points.
                slots.push(EffectiveSlot {
                    starter_card_id: starter.card_id,
                    card_id: starter.card_id,
                    points: 0,
                    substituted: false,
                });
            }
        }
    }

    if let Some(captain) = captain_card_id {
        for slot in &mut slots {
            if slot.card_id == captain {
                slot.points *= 2;
            }
        }
    }

    let total = slots.iter().map(|s| s.points).sum();
    ResolvedLineup { slots, total }
}

/// Find the bench index of the first eligible replacement.
///
/// Position match wins over bench order: the whole bench is scanned for a
/// same-position player before the any-position fallback runs.
fn find_replacement(bench: &[SlotScore], used: &[bool], position: Position) -> Option<usize> {
    let eligible = |i: &usize| !used[*i] && bench[*i].minutes > 0;

    (0..bench.len())
        .filter(eligible)
        .find(|&i| bench[i].position == position)
        .or_else(|| (0..bench.len()).find(eligible))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(card_id: DbId, position: Position, minutes: u32, points: i32) -> SlotScore {
        SlotScore {
            card_id,
            position,
            minutes,
            points,
        }
    }

    // -- Substitution order --

    #[test]
    fn position_match_beats_earlier_any_position_bench_player() {
        let starters = [slot(1, Position::Midfielder, 0, 0)];
        let bench = [
            slot(10, Position::Forward, 80, 6),
            slot(11, Position::Midfielder, 75, 7),
        ];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert!(resolved.slots[0].substituted);
        assert_eq!(resolved.slots[0].card_id, 11);
        assert_eq!(resolved.slots[0].points, 7);
    }

    #[test]
    fn falls_back_to_any_position_in_bench_order() {
        let starters = [slot(1, Position::Goalkeeper, 0, 0)];
        let bench = [
            slot(10, Position::Forward, 90, 4),
            slot(11, Position::Midfielder, 90, 8),
        ];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert_eq!(resolved.slots[0].card_id, 10);
        assert_eq!(resolved.slots[0].points, 4);
    }

    #[test]
    fn bench_player_substitutes_at_most_once() {
        let starters = [
            slot(1, Position::Midfielder, 0, 0),
            slot(2, Position::Midfielder, 0, 0),
        ];
        let bench = [slot(10, Position::Midfielder, 90, 5)];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert_eq!(resolved.slots[0].card_id, 10);
        // Second zero-minute starter finds the bench exhausted.
        assert_eq!(resolved.slots[1].card_id, 2);
        assert_eq!(resolved.slots[1].points, 0);
        assert_eq!(resolved.total, 5);
    }

    #[test]
    fn unplayed_bench_players_are_never_brought_on() {
        let starters = [slot(1, Position::Defender, 0, 0)];
        let bench = [slot(10, Position::Defender, 0, 0)];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert!(!resolved.slots[0].substituted);
        assert_eq!(resolved.total, 0);
    }

    #[test]
    fn played_starters_are_left_alone() {
        let starters = [slot(1, Position::Forward, 55, 4)];
        let bench = [slot(10, Position::Forward, 90, 9)];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert!(!resolved.slots[0].substituted);
        assert_eq!(resolved.slots[0].points, 4);
    }

    #[test]
    fn spec_scenario_zero_minute_starter_replaced_by_scoring_mid() {
        // starterA (MID, 0 min) out, benchB (MID, 75 min, 1 goal = 7 pts) in.
        let starters = [slot(1, Position::Midfielder, 0, 0)];
        let bench = [slot(2, Position::Midfielder, 75, 7)];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert_eq!(resolved.slots[0].points, 7);
        assert_eq!(resolved.total, 7);
    }

    // -- Captaincy --

    #[test]
    fn captain_points_are_doubled() {
        let starters = [
            slot(1, Position::Forward, 90, 6),
            slot(2, Position::Midfielder, 90, 2),
        ];
        let resolved = resolve_lineup(&starters, &[], Some(1));

        assert_eq!(resolved.slots[0].points, 12);
        assert_eq!(resolved.total, 14);
    }

    #[test]
    fn substituted_out_captain_earns_no_doubling() {
        let starters = [slot(1, Position::Midfielder, 0, 0)];
        let bench = [slot(10, Position::Midfielder, 90, 5)];
        let resolved = resolve_lineup(&starters, &bench, Some(1));

        // The replacement keeps its own points, undoubled.
        assert_eq!(resolved.slots[0].points, 5);
        assert_eq!(resolved.total, 5);
    }

    // -- Totals --

    #[test]
    fn total_sums_all_effective_starters() {
        let starters = [
            slot(1, Position::Goalkeeper, 90, 6),
            slot(2, Position::Defender, 90, 2),
            slot(3, Position::Forward, 0, 0),
        ];
        let bench = [slot(10, Position::Forward, 70, 4)];
        let resolved = resolve_lineup(&starters, &bench, None);

        assert_eq!(resolved.total, 12);
    }
}
