//! Batch resolution jobs (gameweek and blitz) and the polling dispatcher
//! that runs them when their window closes.

pub mod dispatcher;
pub mod error;
pub mod jobs;
