//! Status enums backing the TEXT status columns.
//!
//! Entities keep `status` as `String` when loaded; these enums provide the
//! canonical spellings for writes and comparisons.

/// Listing lifecycle. `Sold` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Sold => "sold",
            ListingStatus::Cancelled => "cancelled",
        }
    }
}

/// Gameweek lifecycle: scheduled -> live -> finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameweekStatus {
    Scheduled,
    Live,
    Finished,
}

impl GameweekStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameweekStatus::Scheduled => "scheduled",
            GameweekStatus::Live => "live",
            GameweekStatus::Finished => "finished",
        }
    }
}

/// Lineup lifecycle: saved -> locked -> finished. Locking happens outside
/// this repository when the parent gameweek goes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineupStatus {
    Saved,
    Locked,
    Finished,
}

impl LineupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineupStatus::Saved => "saved",
            LineupStatus::Locked => "locked",
            LineupStatus::Finished => "finished",
        }
    }
}

/// Tournament lifecycle: live -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentStatus {
    Live,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Live => "live",
            TournamentStatus::Completed => "completed",
        }
    }
}

/// Resolution-run cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStatus {
    Running,
    Completed,
}

impl CursorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorStatus::Running => "running",
            CursorStatus::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_spellings_match_the_schema_checks() {
        assert_eq!(ListingStatus::Active.as_str(), "active");
        assert_eq!(ListingStatus::Sold.as_str(), "sold");
        assert_eq!(ListingStatus::Cancelled.as_str(), "cancelled");
        assert_eq!(GameweekStatus::Live.as_str(), "live");
        assert_eq!(LineupStatus::Locked.as_str(), "locked");
        assert_eq!(TournamentStatus::Completed.as_str(), "completed");
        assert_eq!(CursorStatus::Running.as_str(), "running");
    }
}
