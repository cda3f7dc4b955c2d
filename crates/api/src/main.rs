use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vibesip_api::config::ServerConfig;
use vibesip_api::health::{CacheCheck, DatabaseCheck, DependencyCheck};
use vibesip_api::router::build_app_router;
use vibesip_api::state::AppState;
use vibesip_core::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibesip_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    let settings = Settings::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = settings.database_url()?;

    // Start-up must not depend on the database being reachable.
    let pool = vibesip_db::create_lazy_pool(database_url)
        .context("Invalid DATABASE_URL")?;
    tracing::info!("Database connection pool created");

    match vibesip_db::run_migrations(&pool).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::warn!(error = %e, "Skipping database migrations"),
    }

    // --- Dependency probes ---
    let checks: Vec<Arc<dyn DependencyCheck>> = vec![
        Arc::new(DatabaseCheck::new(pool.clone())),
        Arc::new(CacheCheck::new(settings.cache_url.clone())),
    ];

    // --- Router ---
    let state = AppState::new(pool, config.clone(), checks);
    let app = build_app_router(state, &config)?;

    // --- Server ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid HOST/PORT combination")?;
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
