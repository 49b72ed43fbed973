//! Repository for the audit trail, rollback counters, and alerts, plus
//! the Postgres-backed [`AuditSink`] implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use pitchside_core::audit::{
    evaluate_thresholds, AlertLevel, AuditSink, ErrorVolume, FailedOperation,
};
use pitchside_core::error::CoreError;

use crate::models::audit::{Alert, AuditRecord};

/// Column list for `audit_records` SELECT queries.
const COLUMNS: &str = "\
    id, operation, user_id, target_id, error_kind, message, \
    partial_state, created_at";

/// Column list for `alerts` SELECT queries.
const ALERT_COLUMNS: &str = "id, severity, message, error_count, created_at";

// ---------------------------------------------------------------------------
// AuditRepo
// ---------------------------------------------------------------------------

/// Provides append and threshold-count operations for the audit trail.
pub struct AuditRepo;

impl AuditRepo {
    /// Append one failure record.
    pub async fn insert(
        pool: &PgPool,
        failure: &FailedOperation,
    ) -> Result<AuditRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_records
                (operation, user_id, target_id, error_kind, message, partial_state)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditRecord>(&query)
            .bind(failure.operation)
            .bind(failure.user_id)
            .bind(failure.target_id)
            .bind(failure.kind.as_str())
            .bind(&failure.message)
            .bind(&failure.partial_state)
            .fetch_one(pool)
            .await
    }

    /// Increment the rolling rollback counter for one operation type.
    pub async fn bump_rollback_counter(pool: &PgPool, operation: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO rollback_counters (operation, count) VALUES ($1, 1)
             ON CONFLICT (operation) DO UPDATE SET count = rollback_counters.count + 1
             RETURNING count",
        )
        .bind(operation)
        .fetch_one(pool)
        .await
    }

    /// Error volume over the trailing alert window ending now.
    pub async fn error_volume(pool: &PgPool, window_secs: i64) -> Result<ErrorVolume, sqlx::Error> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(*) FILTER (WHERE error_kind = 'internal'),
                COUNT(*)
             FROM audit_records
             WHERE created_at > now() - make_interval(secs => $1)",
        )
        .bind(window_secs as f64)
        .fetch_one(pool)
        .await?;

        Ok(ErrorVolume {
            critical_last_hour: row.0,
            total_last_hour: row.1,
        })
    }

    /// Write an alert row.
    pub async fn insert_alert(
        pool: &PgPool,
        level: AlertLevel,
        message: &str,
        error_count: i64,
    ) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (severity, message, error_count)
             VALUES ($1, $2, $3)
             RETURNING {ALERT_COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(level.as_str())
            .bind(message)
            .bind(error_count)
            .fetch_one(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// PgAuditSink
// ---------------------------------------------------------------------------

/// Postgres-backed audit sink injected into the trade engine and the
/// batch resolvers.
#[derive(Clone)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn record_failure(&self, failure: FailedOperation) -> Result<(), CoreError> {
        tracing::warn!(
            operation = failure.operation,
            user_id = failure.user_id,
            target_id = failure.target_id,
            kind = failure.kind.as_str(),
            error = %failure.message,
            "Operation rolled back",
        );

        AuditRepo::insert(&self.pool, &failure)
            .await
            .map_err(|e| CoreError::Internal(format!("audit insert failed: {e}")))?;

        AuditRepo::bump_rollback_counter(&self.pool, failure.operation)
            .await
            .map_err(|e| CoreError::Internal(format!("rollback counter failed: {e}")))?;

        let volume = AuditRepo::error_volume(&self.pool, pitchside_core::audit::ALERT_WINDOW_SECS)
            .await
            .map_err(|e| CoreError::Internal(format!("error volume query failed: {e}")))?;

        if let Some(level) = evaluate_thresholds(&volume) {
            let (count, message) = match level {
                AlertLevel::Critical => (
                    volume.critical_last_hour,
                    format!(
                        "{} critical errors in the last hour",
                        volume.critical_last_hour
                    ),
                ),
                AlertLevel::Warning => (
                    volume.total_last_hour,
                    format!("{} errors in the last hour", volume.total_last_hour),
                ),
            };

            AuditRepo::insert_alert(&self.pool, level, &message, count)
                .await
                .map_err(|e| CoreError::Internal(format!("alert insert failed: {e}")))?;

            match level {
                AlertLevel::Critical => {
                    tracing::error!(error_count = count, "CRITICAL error-volume alert: {message}");
                }
                AlertLevel::Warning => {
                    tracing::warn!(error_count = count, "Error-volume warning: {message}");
                }
            }
        }

        Ok(())
    }
}
