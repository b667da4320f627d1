//! Upload API integration tests
//!
//! Multipart uploads end to end: decode, store, post, serve back.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use crate::common::{MultipartBuilder, TestApp, TEST_BOUNDARY};

#[tokio::test]
async fn test_image_upload_is_posted_and_served() {
    let app = TestApp::new().await;
    let body = MultipartBuilder::new()
        .field("username", "Alice")
        .file("file", "cat.png", b"\x89PNG\r\n\x1a\nnot really")
        .build();

    let response = app.post_multipart(body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        serde_json::json!({"status": "uploaded", "accepted": 1, "skipped": 0})
    );

    let history = app.get("/history").await.json();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["author"], "Alice");
    assert_eq!(history[0]["kind"], "image");

    let url = history[0]["content"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    let served = app.get(url).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(&served.body[..], b"\x89PNG\r\n\x1a\nnot really");
}

#[tokio::test]
async fn test_unknown_extension_is_file() {
    let app = TestApp::new().await;
    let body = MultipartBuilder::new()
        .field("username", "Alice")
        .file("file", "a.bin", &[0, 1, 2, 3])
        .build();

    app.post_multipart(body).await;

    assert_eq!(app.get("/history").await.json()[0]["kind"], "file");
}

#[tokio::test]
async fn test_several_files_share_one_username() {
    let app = TestApp::new().await;
    let body = MultipartBuilder::new()
        .file("file[]", "holiday.MP4", b"video")
        .file("file[]", "notes.txt", b"text")
        .field("username", "Carol")
        .file("file[]", "voice.m4a", b"audio")
        .build();

    let response = app.post_multipart(body).await;
    assert_eq!(response.json()["accepted"], 3);

    let history = app.state.log.snapshot();
    let kinds: Vec<String> = history.iter().map(|m| m.kind.to_string()).collect();
    assert_eq!(kinds, vec!["video", "file", "audio"]);
    assert!(history.iter().all(|m| m.author == "Carol"));
}

#[tokio::test]
async fn test_malformed_part_is_skipped() {
    let app = TestApp::new().await;
    let broken = format!("--{}\r\nContent-Disposition: form-data; name=\"junk\"\r\nno blank line here\r\n", TEST_BOUNDARY);
    let body = MultipartBuilder::new()
        .field("username", "Dave")
        .raw(broken.as_bytes())
        .file("file", "pic.gif", b"gif")
        .build();

    let response = app.post_multipart(body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["accepted"], 1);
    assert_eq!(response.json()["skipped"], 1);
    assert_eq!(app.state.log.snapshot()[0].author, "Dave");
}

#[tokio::test]
async fn test_empty_file_input_is_rejected() {
    let app = TestApp::new().await;
    let body = MultipartBuilder::new()
        .field("username", "Alice")
        .file("file", "", b"")
        .build();

    let response = app.post_multipart(body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.state.log.is_empty());
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/upload", serde_json::json!({"username": "Alice"}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_contains!(response.json()["error"].as_str().unwrap(), "multipart");
}

#[tokio::test]
async fn test_body_over_limit_is_refused() {
    let app = TestApp::with_config(|builder| builder.max_upload_bytes(64)).await;
    let body = MultipartBuilder::new()
        .field("username", "Alice")
        .file("file", "big.png", &[7u8; 512])
        .build();

    let response = app.post_multipart(body).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.state.log.is_empty());
}

#[tokio::test]
async fn test_stored_file_name_is_sanitized() {
    let app = TestApp::new().await;
    let body = MultipartBuilder::new()
        .file("file", "../../etc/my photo.jpg", b"jpg")
        .build();

    app.post_multipart(body).await;

    let content = app.state.log.snapshot()[0].content.clone();
    let stored_name = content.trim_start_matches("/uploads/");
    assert!(!stored_name.contains('/'));
    assert!(stored_name.ends_with("_my_photo.jpg"));
    assert!(app.upload_dir.path().join(stored_name).is_file());
}

#[tokio::test]
async fn test_very_long_filename_is_stored() {
    let app = TestApp::new().await;
    let filename = format!("{}.png", "a".repeat(250));
    let body = MultipartBuilder::new()
        .field("username", "Alice")
        .file("file", &filename, b"img")
        .build();

    let response = app.post_multipart(body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["accepted"], 1);
    let history = app.get("/history").await.json();
    assert_eq!(history[0]["kind"], "image");
    let url = history[0]["content"].as_str().unwrap();
    assert_eq!(&app.get(url).await.body[..], b"img");
}
