//! Router-backed test app
//!
//! Each `TestApp` owns its own state and a temporary upload directory, so
//! tests never share a message log.

use std::time::Duration;
use axum::body::{to_bytes, Body, BodyDataStream, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use futures_util::StreamExt;
use huddle::backend::routes::create_router;
use huddle::backend::server::{init_state, AppState};
use huddle::shared::{ServerConfig, ServerConfigBuilder};
use tempfile::TempDir;
use tower::ServiceExt;
use crate::common::multipart::MultipartBuilder;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: TempDir,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("response is not JSON ({}): {:?}", e, self.body))
    }
}

impl TestApp {
    /// App with no welcome message and a fresh upload directory
    pub async fn new() -> Self {
        Self::with_config(|builder| builder).await
    }

    pub async fn with_config(customize: impl FnOnce(ServerConfigBuilder) -> ServerConfigBuilder) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let builder = ServerConfig::builder()
            .upload_dir(upload_dir.path())
            .welcome_message(None);
        let config = customize(builder).build().expect("Invalid test configuration");
        let state = init_state(config).await.expect("Failed to initialize state");
        let router = create_router(state.clone());
        Self {
            router,
            state,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router service failed");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::get(path).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, path: &str, value: serde_json::Value) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_form(&self, path: &str, form: &str) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_multipart(&self, body: Vec<u8>) -> TestResponse {
        let request = Request::post("/upload")
            .header(header::CONTENT_TYPE, MultipartBuilder::content_type())
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Open `/stream` and keep the body open for reading
    pub async fn open_stream(&self, request: Request<Body>) -> SseReader {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router service failed");
        SseReader {
            status: response.status(),
            headers: response.headers().clone(),
            stream: response.into_body().into_data_stream(),
            buffer: String::new(),
        }
    }
}

/// One parsed SSE event
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub id: Option<String>,
    pub data: Option<String>,
    pub comments: Vec<String>,
}

pub struct SseReader {
    pub status: StatusCode,
    pub headers: HeaderMap,
    stream: BodyDataStream,
    buffer: String,
}

impl SseReader {
    /// Next complete event, waiting at most five seconds
    pub async fn next_event(&mut self) -> SseEvent {
        loop {
            if let Some(end) = self.buffer.find("\n\n") {
                let block: String = self.buffer.drain(..end + 2).collect();
                return parse_event(&block);
            }
            let chunk = tokio::time::timeout(Duration::from_secs(5), self.stream.next())
                .await
                .expect("Timed out waiting for SSE data")
                .expect("Stream ended")
                .expect("Stream error");
            self.buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    }

    /// Next event carrying a message, skipping keep-alive comments
    pub async fn next_message(&mut self) -> (u64, serde_json::Value) {
        loop {
            let event = self.next_event().await;
            if let Some(data) = event.data {
                let id = event
                    .id
                    .expect("Message event without id")
                    .parse()
                    .expect("Non-numeric event id");
                let value = serde_json::from_str(&data).expect("Event data is not JSON");
                return (id, value);
            }
        }
    }
}

fn parse_event(block: &str) -> SseEvent {
    let mut event = SseEvent::default();
    for line in block.lines() {
        if let Some(comment) = line.strip_prefix(':') {
            event.comments.push(comment.trim().to_string());
        } else if let Some((field, value)) = line.split_once(':') {
            let value = value.strip_prefix(' ').unwrap_or(value).to_string();
            match field {
                "id" => event.id = Some(value),
                "data" => event.data = Some(value),
                _ => {}
            }
        }
    }
    event
}
