#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use svcdeck_api::config::ServerConfig;
use svcdeck_api::router::build_app_router;
use svcdeck_api::state::AppState;
use svcdeck_core::config::SupervisorConfig;
use svcdeck_core::exec::FakeExecutor;
use svcdeck_core::services::ServiceControl;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 75,
        supervisor: SupervisorConfig::default(),
    }
}

/// Build the full application router backed by `fake`.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack without spawning any process.
pub fn build_test_app(fake: &FakeExecutor) -> Router {
    build_test_app_with(test_config(), fake)
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(config: ServerConfig, fake: &FakeExecutor) -> Router {
    let control = ServiceControl::new(Arc::new(fake.clone()), config.supervisor.clone());

    build_app_router(AppState {
        config: Arc::new(config),
        control: Arc::new(control),
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A `pm2 jlist` payload with the given `(name, status)` entries.
pub fn jlist(entries: &[(&str, &str)]) -> String {
    let items: Vec<serde_json::Value> = entries
        .iter()
        .enumerate()
        .map(|(i, (name, status))| {
            serde_json::json!({
                "pid": if *status == "online" { 1000 + i as u64 } else { 0 },
                "name": name,
                "pm_id": i,
                "monit": { "memory": 1_048_576 * (i as u64 + 1), "cpu": 0.5 },
                "pm2_env": {
                    "status": status,
                    "pm_uptime": 1_700_000_000_000u64,
                    "restart_time": i
                }
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}
