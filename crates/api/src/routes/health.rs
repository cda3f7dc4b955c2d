use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::health::{dependency_statuses, overall_status};
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
}

/// GET /health -- always 200; reports whether every dependency is reachable.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let statuses = dependency_statuses(&state.checks).await;
    for (name, healthy) in &statuses {
        tracing::debug!(dependency = name, healthy, "Dependency probe");
    }

    Json(HealthResponse {
        status: overall_status(&statuses),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
