use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitchside_db::repositories::PgAuditSink;
use pitchside_worker::dispatcher::ResolutionDispatcher;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pitchside_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pitchside_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pitchside_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    pitchside_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let poll_secs: u64 = std::env::var("POLL_INTERVAL_SECS")
        .unwrap_or_else(|_| "30".into())
        .parse()
        .expect("POLL_INTERVAL_SECS must be a valid u64");

    let audit = Arc::new(PgAuditSink::new(pool.clone()));
    let dispatcher = ResolutionDispatcher::new(pool, audit)
        .with_poll_interval(Duration::from_secs(poll_secs));

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for shutdown signal");
        tracing::info!("Shutdown signal received");
        signal_cancel.cancel();
    });

    dispatcher.run(cancel).await;
}
