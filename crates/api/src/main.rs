use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitchside_api::config::ServerConfig;
use pitchside_api::engine::trade::TradeEngine;
use pitchside_api::router::build_app_router;
use pitchside_api::state::AppState;
use pitchside_db::repositories::{PgAuditSink, PgPlayerPool};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchside_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pitchside_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pitchside_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pitchside_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Engine wiring ---
    let audit = Arc::new(PgAuditSink::new(pool.clone()));
    let player_pool = Arc::new(PgPlayerPool::new(pool.clone()));
    let trade = Arc::new(TradeEngine::new(
        pool.clone(),
        player_pool,
        audit.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        audit,
        trade,
    };

    // --- Server ---
    let app = build_app_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!(%addr, "API server listening");

    axum::serve(listener, app).await.expect("Server error");
}
