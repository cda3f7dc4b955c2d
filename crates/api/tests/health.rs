//! Integration tests for the health endpoint and shared HTTP behaviour.
//!
//! Dependency probes are injected, so no database is needed here. The one
//! test using the real database probe points it at a closed port.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use vibesip_api::health::{CacheCheck, DatabaseCheck, DependencyCheck};

use common::{body_json, build_app_with_checks, get, get_json, StaticCheck};

fn unused_pool() -> sqlx::PgPool {
    vibesip_db::create_lazy_pool("postgres://localhost/unused").unwrap()
}

fn checks(database: bool, cache: bool) -> Vec<Arc<dyn DependencyCheck>> {
    vec![
        Arc::new(StaticCheck { name: "database", healthy: database }),
        Arc::new(StaticCheck { name: "cache", healthy: cache }),
    ]
}

#[tokio::test]
async fn health_is_ok_when_all_dependencies_are_healthy() {
    let app = build_app_with_checks(unused_pool(), checks(true, true));
    let json = get_json(app, "/health", StatusCode::OK).await;
    assert_eq!(json, json!({ "status": "ok" }));
}

#[tokio::test]
async fn health_is_degraded_when_database_is_down() {
    let app = build_app_with_checks(unused_pool(), checks(false, true));
    let json = get_json(app, "/health", StatusCode::OK).await;
    assert_eq!(json, json!({ "status": "degraded" }));
}

#[tokio::test]
async fn health_is_degraded_when_database_is_unreachable() {
    let pool = vibesip_db::create_lazy_pool("postgres://postgres@127.0.0.1:1/x").unwrap();
    let probes: Vec<Arc<dyn DependencyCheck>> = vec![
        Arc::new(DatabaseCheck::new(pool.clone())),
        Arc::new(CacheCheck::new(None)),
    ];
    let app = build_app_with_checks(pool, probes);
    let json = get_json(app, "/health", StatusCode::OK).await;
    assert_eq!(json, json!({ "status": "degraded" }));
}

#[tokio::test]
async fn health_is_degraded_when_cache_is_down() {
    let app = build_app_with_checks(unused_pool(), checks(true, false));
    let json = get_json(app, "/health", StatusCode::OK).await;
    assert_eq!(json["status"], "degraded");
}

#[tokio::test]
async fn unconfigured_cache_does_not_degrade_health() {
    let probes: Vec<Arc<dyn DependencyCheck>> = vec![
        Arc::new(StaticCheck { name: "database", healthy: true }),
        Arc::new(CacheCheck::new(None)),
    ];
    let app = build_app_with_checks(unused_pool(), probes);
    let json = get_json(app, "/health", StatusCode::OK).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_app_with_checks(unused_pool(), checks(true, true));
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);

    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_app_with_checks(unused_pool(), checks(true, true));
    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
