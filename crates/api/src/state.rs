use std::sync::Arc;

use crate::config::ServerConfig;
use crate::health::DependencyCheck;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vibesip_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Dependency probes consulted by `GET /health`.
    pub checks: Arc<Vec<Arc<dyn DependencyCheck>>>,
}

impl AppState {
    pub fn new(
        pool: vibesip_db::DbPool,
        config: ServerConfig,
        checks: Vec<Arc<dyn DependencyCheck>>,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            checks: Arc::new(checks),
        }
    }
}
