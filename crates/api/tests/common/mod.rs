#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use vibesip_api::config::ServerConfig;
use vibesip_api::health::{DatabaseCheck, DependencyCheck};
use vibesip_api::router::build_app_router;
use vibesip_api::state::AppState;
use vibesip_core::seed::SeedData;
use vibesip_db::repositories::SeedRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// A dependency probe with a fixed answer.
pub struct StaticCheck {
    pub name: &'static str,
    pub healthy: bool,
}

#[async_trait]
impl DependencyCheck for StaticCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }
}

/// Build the full application router with the same middleware stack as
/// `main.rs`, probing only the given database.
pub fn build_test_app(pool: PgPool) -> Router {
    let checks: Vec<Arc<dyn DependencyCheck>> = vec![Arc::new(DatabaseCheck::new(pool.clone()))];
    build_app_with_checks(pool, checks)
}

/// Build the router with explicit dependency probes.
pub fn build_app_with_checks(pool: PgPool, checks: Vec<Arc<dyn DependencyCheck>>) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), checks);
    build_app_router(state, &config).expect("test config is valid")
}

/// Import the repository's seed file into `pool`.
pub async fn seed_repository_data(pool: &PgPool) {
    let data = SeedData::from_source(include_str!("../../../../data/seedData.ts")).unwrap();
    let mut tx = pool.begin().await.unwrap();
    SeedRepo::insert_seed_data(&mut tx, &data).await.unwrap();
    tx.commit().await.unwrap();
}

/// Send a GET request to the app and return the response.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// GET `uri`, assert the status, and return the JSON body.
pub async fn get_json(app: Router, uri: &str, expected: StatusCode) -> Value {
    let response = get(app, uri).await;
    assert_eq!(response.status(), expected, "unexpected status for {uri}");
    body_json(response).await
}
