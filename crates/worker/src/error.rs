use pitchside_core::audit::ErrorKind;
use pitchside_core::error::CoreError;

/// Error type for batch resolution jobs.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// A domain-level error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl JobError {
    /// Audit classification for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobError::Core(core) => ErrorKind::from(core),
            JobError::Database(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience type alias for job return values.
pub type JobResult<T> = Result<T, JobError>;
