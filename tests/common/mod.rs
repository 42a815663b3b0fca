//! Shared helpers for integration tests.
//!
//! The app is built with the production providers pointed at wiremock servers:
//! one standing in for OpenRouter, one for the Google Translate TTS endpoint.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use learnsphere::{ServerConfig, routes, state::AppState};

pub const COMPLETIONS_PATH: &str = "/api/v1/chat/completions";
pub const TTS_PATH: &str = "/translate_tts";
pub const FAKE_MP3: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mpeg-frames";

pub struct TestApp {
    pub app: Router,
    pub state: Arc<AppState>,
    pub openrouter: MockServer,
    pub tts: MockServer,
    /// Keeps the static directory alive for the test's duration
    pub static_dir: TempDir,
}

impl TestApp {
    pub fn audio_dir(&self) -> std::path::PathBuf {
        self.state.config.audio_dir()
    }
}

/// Test configuration pointing at the given mock servers
pub fn test_config(openrouter: &MockServer, tts: &MockServer, static_dir: &TempDir) -> ServerConfig {
    let mut config = ServerConfig::with_defaults("sk-or-test-key");
    config.host = "127.0.0.1".to_string();
    config.openrouter_base_url = format!("{}/api/v1", openrouter.uri());
    config.openrouter_timeout_seconds = 5;
    config.tts_base_url = Some(tts.uri());
    config.tts_timeout_seconds = 5;
    config.static_dir = static_dir.path().to_path_buf();
    config
}

pub async fn spawn_app() -> TestApp {
    let openrouter = MockServer::start().await;
    let tts = MockServer::start().await;
    let static_dir = TempDir::new().unwrap();
    std::fs::write(
        static_dir.path().join("index.html"),
        "<!DOCTYPE html><title>LearnSphere</title>",
    )
    .unwrap();

    let config = test_config(&openrouter, &tts, &static_dir);
    let state = AppState::new(config).await.unwrap();
    let app = routes::create_app_router(state.clone());

    TestApp {
        app,
        state,
        openrouter,
        tts,
        static_dir,
    }
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "gen-test",
        "model": "openai/gpt-4o-mini",
        "choices": [{
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(server)
        .await;
}

pub async fn mount_tts(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(TTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(FAKE_MP3),
        )
        .mount(server)
        .await;
}

pub async fn post_generate(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes.to_vec())
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
