//! Resolution jobs. Each job processes entities one transaction at a
//! time, logging and continuing past per-entity failures.

pub mod blitz;
pub mod gameweek;

use serde::Serialize;

pub use blitz::BlitzResolver;
pub use gameweek::GameweekResolver;

/// Outcome of one batch resolution run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ResolutionSummary {
    /// Entities settled by this run.
    pub processed: u64,
    /// Entities whose settlement failed; they stay pending for a rerun.
    pub failed: u64,
    /// Entities skipped: already settled by an earlier run, or not
    /// eligible for scoring.
    pub skipped: u64,
}
