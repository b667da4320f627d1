//! Call signalling integration tests

use std::time::Duration;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use huddle::shared::message::now_millis;
use crate::common::TestApp;

#[tokio::test]
async fn test_start_call_then_status() {
    let app = TestApp::new().await;
    let before = now_millis();

    let response = app
        .post_json("/start-call", json!({"username": "Alice", "callId": "c1", "callType": "voice"}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"callId": "c1", "status": "started"}));

    let status = app.get("/call-status").await.json();
    assert_eq!(status["c1"]["id"], "c1");
    assert_eq!(status["c1"]["kind"], "voice");
    assert_eq!(status["c1"]["participants"], json!(["Alice"]));
    let started = status["c1"]["startTimeMillis"].as_i64().unwrap();
    assert_in_range!(started, before, now_millis());

    let history = app.get("/history").await.json();
    assert_eq!(history[0]["kind"], "system");
    assert_eq!(history[0]["author"], "system");
    assert_eq!(history[0]["callId"], "c1");
    assert_eq!(history[0]["content"], "📞 Alice started a voice call");
}

#[tokio::test]
async fn test_start_call_generates_id() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/start-call", json!({"username": "Bob", "callType": "video"}))
        .await
        .json();

    let call_id = response["callId"].as_str().unwrap().to_string();
    assert!(call_id.parse::<i64>().is_ok());
    assert_eq!(app.get("/call-status").await.json()[&call_id]["kind"], "video");
}

#[tokio::test]
async fn test_end_call_reports_duration() {
    let app = TestApp::new().await;
    app.post_json("/start-call", json!({"username": "Alice", "callId": "c1"}))
        .await;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    let response = app
        .post_json("/end-call", json!({"username": "Alice", "callId": "c1"}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ended");
    let duration = body["durationSecs"].as_u64().unwrap();
    assert_in_range!(duration, 1, 2);

    assert_eq!(app.get("/call-status").await.json(), json!({}));
    let history = app.state.log.snapshot();
    assert_eq!(history.len(), 2);
    assert_eq!(
        history[1].content,
        format!("📞 Call ended by Alice (duration: {}s)", duration)
    );
    assert_eq!(history[1].call_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_end_missing_call_is_a_quiet_success() {
    let app = TestApp::new().await;
    app.post_json("/start-call", json!({"username": "Alice", "callId": "c1"}))
        .await;
    let status_before = app.get("/call-status").await.json();

    let response = app
        .post_json("/end-call", json!({"username": "Alice", "callId": "missing"}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"status": "ended", "durationSecs": null}));
    assert_eq!(app.get("/call-status").await.json(), status_before);
    assert_eq!(app.state.log.len(), 1);
}

#[tokio::test]
async fn test_end_call_without_id_is_rejected() {
    let app = TestApp::new().await;

    let response = app.post_json("/end-call", json!({"username": "Alice"})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_contains!(response.json()["error"].as_str().unwrap(), "callId");
}

#[tokio::test]
async fn test_invalid_call_type_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/start-call", json!({"username": "Alice", "callType": "carrier-pigeon"}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get("/call-status").await.json(), json!({}));
}
