use std::sync::Arc;

use pitchside_core::audit::AuditSink;

use crate::config::ServerConfig;
use crate::engine::trade::TradeEngine;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pitchside_db::DbPool,
    /// Server configuration (read by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Audit sink shared by the trade engine and resolution handlers.
    pub audit: Arc<dyn AuditSink>,
    /// The marketplace trade engine.
    pub trade: Arc<TradeEngine>,
}
