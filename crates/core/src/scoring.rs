//! Fantasy scoring engine.
//!
//! Pure function mapping (position, raw match statistics) to points. No
//! side effects; shared by the gameweek and blitz resolvers.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minutes a player must reach to earn appearance points.
pub const APPEARANCE_MINUTES: u32 = 60;

/// Points for playing at least [`APPEARANCE_MINUTES`].
pub const APPEARANCE_POINTS: i32 = 2;

/// Points per assist, any position.
pub const ASSIST_POINTS: i32 = 3;

/// Clean-sheet bonus for goalkeepers and defenders with a full appearance.
pub const CLEAN_SHEET_POINTS: i32 = 4;

/// Points per yellow card.
pub const YELLOW_CARD_POINTS: i32 = -1;

/// Points per red card.
pub const RED_CARD_POINTS: i32 = -3;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// On-pitch position of a player, cached onto cards at mint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Parse from a stored string. Unknown values are rejected rather than
    /// defaulted: a wrong position silently changes scoring.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GK" => Some(Position::Goalkeeper),
            "DEF" => Some(Position::Defender),
            "MID" => Some(Position::Midfielder),
            "FWD" => Some(Position::Forward),
            _ => None,
        }
    }

    /// Points awarded per goal scored from this position.
    pub fn goal_points(&self) -> i32 {
        match self {
            Position::Goalkeeper | Position::Defender => 6,
            Position::Midfielder => 5,
            Position::Forward => 4,
        }
    }

    /// Goalkeepers and defenders carry clean-sheet and conceded-goal rules.
    pub fn is_defensive(&self) -> bool {
        matches!(self, Position::Goalkeeper | Position::Defender)
    }
}

// ---------------------------------------------------------------------------
// PlayerStats
// ---------------------------------------------------------------------------

/// Raw per-match statistics for one player, as supplied by the stats feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub clean_sheet: bool,
    pub goals_conceded: u32,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Compute fantasy points for one player.
///
/// A player with zero minutes scores zero regardless of other fields; the
/// auto-substitution pass relies on this.
pub fn points(position: Position, stats: &PlayerStats) -> i32 {
    if stats.minutes == 0 {
        return 0;
    }

    let mut total = 0i32;

    if stats.minutes >= APPEARANCE_MINUTES {
        total += APPEARANCE_POINTS;
    }

    total += stats.goals as i32 * position.goal_points();
    total += stats.assists as i32 * ASSIST_POINTS;

    if position.is_defensive() {
        if stats.clean_sheet && stats.minutes >= APPEARANCE_MINUTES {
            total += CLEAN_SHEET_POINTS;
        }
        total -= (stats.goals_conceded / 2) as i32;
    }

    total += stats.yellow_cards as i32 * YELLOW_CARD_POINTS;
    total += stats.red_cards as i32 * RED_CARD_POINTS;

    total
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(minutes: u32) -> PlayerStats {
        PlayerStats {
            minutes,
            ..PlayerStats::default()
        }
    }

    // -- Position --

    #[test]
    fn position_round_trips_through_strings() {
        for p in [
            Position::Goalkeeper,
            Position::Defender,
            Position::Midfielder,
            Position::Forward,
        ] {
            assert_eq!(Position::from_str(p.as_str()), Some(p));
        }
    }

    #[test]
    fn position_rejects_unknown_strings() {
        assert_eq!(Position::from_str("STRIKER"), None);
        assert_eq!(Position::from_str(""), None);
    }

    // -- Appearance --

    #[test]
    fn zero_minutes_scores_zero_even_with_goals() {
        let s = PlayerStats {
            minutes: 0,
            goals: 2,
            assists: 1,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Forward, &s), 0);
    }

    #[test]
    fn sixty_minutes_earns_appearance_points() {
        assert_eq!(points(Position::Midfielder, &stats(60)), 2);
        assert_eq!(points(Position::Midfielder, &stats(90)), 2);
    }

    #[test]
    fn short_appearance_earns_no_presence_points() {
        assert_eq!(points(Position::Midfielder, &stats(30)), 0);
    }

    // -- Goals --

    #[test]
    fn goal_points_vary_by_position() {
        let s = PlayerStats {
            minutes: 90,
            goals: 1,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Goalkeeper, &s), 2 + 6);
        assert_eq!(points(Position::Defender, &s), 2 + 6);
        assert_eq!(points(Position::Midfielder, &s), 2 + 5);
        assert_eq!(points(Position::Forward, &s), 2 + 4);
    }

    #[test]
    fn midfielder_with_a_goal_after_full_game_scores_seven() {
        // 75 minutes on the pitch with one goal: 2 presence + 5 goal.
        let s = PlayerStats {
            minutes: 75,
            goals: 1,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Midfielder, &s), 7);
    }

    // -- Assists --

    #[test]
    fn assists_are_three_points_each() {
        let s = PlayerStats {
            minutes: 90,
            assists: 2,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Forward, &s), 2 + 6);
    }

    // -- Clean sheets --

    #[test]
    fn clean_sheet_bonus_requires_defensive_position_and_full_appearance() {
        let s = PlayerStats {
            minutes: 90,
            clean_sheet: true,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Defender, &s), 2 + 4);
        assert_eq!(points(Position::Goalkeeper, &s), 2 + 4);
        // Midfielders get no clean-sheet bonus.
        assert_eq!(points(Position::Midfielder, &s), 2);
    }

    #[test]
    fn clean_sheet_bonus_denied_below_sixty_minutes() {
        let s = PlayerStats {
            minutes: 45,
            clean_sheet: true,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Defender, &s), 0);
    }

    // -- Cards --

    #[test]
    fn cards_deduct_points() {
        let s = PlayerStats {
            minutes: 90,
            yellow_cards: 1,
            red_cards: 1,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Midfielder, &s), 2 - 1 - 3);
    }

    // -- Conceded goals --

    #[test]
    fn defenders_lose_a_point_per_two_conceded() {
        let s = PlayerStats {
            minutes: 90,
            goals_conceded: 4,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Defender, &s), 2 - 2);
        // Odd counts floor.
        let s3 = PlayerStats {
            minutes: 90,
            goals_conceded: 3,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Goalkeeper, &s3), 2 - 1);
        // Attackers are unaffected.
        assert_eq!(points(Position::Forward, &s), 2);
    }

    #[test]
    fn score_can_go_negative() {
        let s = PlayerStats {
            minutes: 20,
            red_cards: 1,
            ..PlayerStats::default()
        };
        assert_eq!(points(Position::Forward, &s), -3);
    }
}
