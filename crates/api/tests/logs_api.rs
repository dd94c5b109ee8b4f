//! HTTP-level integration tests for `/api/v1/services/logs`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use svcdeck_core::exec::{CommandOutput, FakeExecutor, FakeResponse};

// ---------------------------------------------------------------------------
// Snapshot mode (GET)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snapshot_defaults_to_100_lines() {
    let fake = FakeExecutor::new().respond(
        "pm2 logs api --lines 100 --nostream",
        FakeResponse::Output(CommandOutput {
            stdout: "0|api | GET /health 200\n0|api | GET /users 200\n".into(),
            stderr: "0|api | warn: slow query\n".into(),
            ..Default::default()
        }),
    );
    let response = get(build_test_app(&fake), "/api/v1/services/logs?service=api").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["serviceName"], "api");
    assert_eq!(json["logs"], "0|api | GET /health 200\n0|api | GET /users 200\n");
    assert_eq!(json["errors"], "0|api | warn: slow query\n");
}

#[tokio::test]
async fn snapshot_honours_line_count() {
    let fake = FakeExecutor::new();
    let response = get(
        build_test_app(&fake),
        "/api/v1/services/logs?service=api&lines=20",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fake.calls(), ["pm2 logs api --lines 20 --nostream"]);
}

#[tokio::test]
async fn snapshot_accepts_camel_case_parameters() {
    let fake = FakeExecutor::new();
    let response = get(
        build_test_app(&fake),
        "/api/v1/services/logs?serviceName=api&lineCount=5",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fake.calls(), ["pm2 logs api --lines 5 --nostream"]);
}

#[tokio::test]
async fn snapshot_without_service_is_rejected() {
    let fake = FakeExecutor::new();
    let response = get(build_test_app(&fake), "/api/v1/services/logs").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json,
        json!({ "success": false, "error": "Missing service parameter" })
    );
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn snapshot_with_non_numeric_lines_is_rejected() {
    let fake = FakeExecutor::new();
    let response = get(
        build_test_app(&fake),
        "/api/v1/services/logs?service=api&lines=many",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn snapshot_timeout_is_failure_envelope() {
    let fake = FakeExecutor::new().time_out("pm2 logs api --lines 100 --nostream");
    let response = get(build_test_app(&fake), "/api/v1/services/logs?service=api").await;
    assert!(response.status().is_server_error());
    assert_eq!(body_json(response).await["success"], false);
}

// ---------------------------------------------------------------------------
// Array mode (POST)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn array_mode_strips_blank_lines() {
    let fake = FakeExecutor::new().stdout(
        "pm2 logs svc --lines 50 --nostream --raw",
        "booting\n\nlistening on 8080\n   \nready\n",
    );
    let response = post_json(
        build_test_app(&fake),
        "/api/v1/services/logs",
        json!({ "serviceName": "svc" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["serviceName"], "svc");
    assert_eq!(json["logs"], json!(["booting", "listening on 8080", "ready"]));
}

#[tokio::test]
async fn array_mode_never_exceeds_line_count() {
    let raw: String = (0..30).map(|i| format!("line {i}\n\n")).collect();
    let fake = FakeExecutor::new().stdout("pm2 logs svc --lines 10 --nostream --raw", &raw);
    let response = post_json(
        build_test_app(&fake),
        "/api/v1/services/logs",
        json!({ "serviceName": "svc", "lineCount": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 10);
    assert_eq!(logs[9], "line 29");
}

#[tokio::test]
async fn array_mode_without_service_is_rejected() {
    let fake = FakeExecutor::new();
    let response = post_json(
        build_test_app(&fake),
        "/api/v1/services/logs",
        json!({ "lineCount": 10 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing service parameter");
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn array_mode_zero_line_count_is_rejected() {
    let fake = FakeExecutor::new();
    let response = post_json(
        build_test_app(&fake),
        "/api/v1/services/logs",
        json!({ "serviceName": "svc", "lineCount": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fake.call_count(), 0);
}

#[tokio::test]
async fn array_mode_supervisor_failure_is_server_error() {
    let fake = FakeExecutor::new().fail(
        "pm2 logs svc --lines 50 --nostream --raw",
        1,
        "[PM2][ERROR] Process svc not found",
    );
    let response = post_json(
        build_test_app(&fake),
        "/api/v1/services/logs",
        json!({ "serviceName": "svc" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["success"], false);
}

// ---------------------------------------------------------------------------
// Both field spellings in one request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snapshot_accepts_both_spellings_together() {
    let fake = FakeExecutor::new();
    let response = get(
        build_test_app(&fake),
        "/api/v1/services/logs?service=api&serviceName=other&lines=7&lineCount=9",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fake.calls(), ["pm2 logs api --lines 7 --nostream"]);
}

#[tokio::test]
async fn array_mode_accepts_both_spellings_together() {
    let fake = FakeExecutor::new();
    let response = post_json(
        build_test_app(&fake),
        "/api/v1/services/logs",
        json!({ "serviceName": "svc", "service": "other", "lineCount": 5, "lines": 8 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fake.calls(), ["pm2 logs svc --lines 5 --nostream --raw"]);
}
