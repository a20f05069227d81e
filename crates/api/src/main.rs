use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use gift_store_api::{
    app, config,
    jobs::{JobScheduler, PoolMetricsJob, SessionCleanupJob},
    middleware,
    services::{bootstrap_admin, AdminAuthService},
};
use persistence::repositories::AdminRepository;
use shared::jwt::JwtConfig;

const JOB_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load().context("Failed to load configuration")?;

    middleware::logging::init_logging(&config.logging)?;

    info!("Starting Gift Store API v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = middleware::init_metrics() {
        warn!(error = %e, "Prometheus exporter not installed; /metrics will return 503");
    }

    let pool = persistence::db::create_pool(&config.database.pool_settings())
        .await
        .context("Failed to connect to database")?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    let bootstrap_auth = AdminAuthService::new(
        AdminRepository::new(pool.clone()),
        std::sync::Arc::new(JwtConfig::new(
            &config.jwt.secret,
            config.jwt.token_expiry_secs,
            config.jwt.leeway_secs,
        )),
    );
    let outcome = bootstrap_admin(&bootstrap_auth, &config.admin).await?;
    info!(outcome = ?outcome, "Admin bootstrap finished");

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(pool.clone()));
    scheduler.register(SessionCleanupJob::new(pool.clone()));
    scheduler.start();

    let addr = config.socket_addr()?;
    let app = app::create_app(config, pool);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(JOB_SHUTDOWN_TIMEOUT).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
