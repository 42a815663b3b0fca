//! Integration tests for the completion client and speech engines against
//! mocked HTTP backends.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use learnsphere::core::tts::{
    OpenAITTS, SpeechEngine, TTSConfig, TTSError, create_speech_engine,
};
use learnsphere::core::{CompletionError, CompletionProvider, OpenRouterClient, OpenRouterConfig};

fn openrouter_config(server: &MockServer) -> OpenRouterConfig {
    let mut config = OpenRouterConfig::new("sk-or-test");
    config.base_url = format!("{}/api/v1", server.uri());
    config.timeout = Duration::from_secs(5);
    config
}

async fn mount_status(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_json(json!({"error": {"code": status, "message": message}})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_completion_sends_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-or-test"))
        .and(header("http-referer", "http://localhost:5000"))
        .and(body_partial_json(json!({
            "model": "openrouter/auto",
            "messages": [{"role": "user", "content": "Explain overfitting"}],
            "temperature": 0.7,
            "max_tokens": 2000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Overfitting is..."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::new(openrouter_config(&server)).unwrap();
    let text = client.complete("Explain overfitting").await.unwrap();

    assert_eq!(text, "Overfitting is...");
}

#[tokio::test]
async fn test_completion_error_taxonomy() {
    let server = MockServer::start().await;
    mount_status(&server, 401, "No auth credentials found").await;
    let client = OpenRouterClient::new(openrouter_config(&server)).unwrap();
    assert_eq!(
        client.complete("x").await,
        Err(CompletionError::Authentication {
            status: 401,
            message: "No auth credentials found".to_string()
        })
    );

    let server = MockServer::start().await;
    mount_status(&server, 429, "Rate limit exceeded").await;
    let client = OpenRouterClient::new(openrouter_config(&server)).unwrap();
    assert_eq!(
        client.complete("x").await,
        Err(CompletionError::RateLimited("Rate limit exceeded".to_string()))
    );

    let server = MockServer::start().await;
    mount_status(&server, 503, "No endpoints available").await;
    let client = OpenRouterClient::new(openrouter_config(&server)).unwrap();
    assert_eq!(
        client.complete("x").await,
        Err(CompletionError::Provider {
            status: 503,
            message: "No endpoints available".to_string()
        })
    );
}

#[tokio::test]
async fn test_completion_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({"choices": []})),
        )
        .mount(&server)
        .await;

    let mut config = openrouter_config(&server);
    config.timeout = Duration::from_secs(1);
    let client = OpenRouterClient::new(config).unwrap();

    assert_eq!(client.complete("x").await, Err(CompletionError::Timeout(1)));
}

#[tokio::test]
async fn test_completion_without_choices_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = OpenRouterClient::new(openrouter_config(&server)).unwrap();

    assert!(matches!(
        client.complete("x").await,
        Err(CompletionError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_completion_network_error() {
    let mut config = OpenRouterConfig::new("sk-or-test");
    config.base_url = "http://127.0.0.1:1/api/v1".to_string();
    config.timeout = Duration::from_secs(2);
    let client = OpenRouterClient::new(config).unwrap();

    assert!(matches!(
        client.complete("x").await,
        Err(CompletionError::Network(_))
    ));
}

#[tokio::test]
async fn test_openai_speech_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .and(header("authorization", "Bearer sk-openai"))
        .and(body_partial_json(json!({
            "model": "tts-1",
            "voice": "nova",
            "input": "Hello learners",
            "response_format": "mp3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3openai".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let config = TTSConfig {
        provider: "openai".to_string(),
        api_key: "sk-openai".to_string(),
        voice_id: Some("nova".to_string()),
        base_url: Some(server.uri()),
        ..Default::default()
    };
    let engine = create_speech_engine("openai", config).unwrap();

    let audio = engine.synthesize("Hello learners").await.unwrap();
    assert_eq!(&audio[..], b"ID3openai");
}

#[tokio::test]
async fn test_openai_speech_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let engine = OpenAITTS::new(TTSConfig {
        provider: "openai".to_string(),
        api_key: "sk-bad".to_string(),
        base_url: Some(server.uri()),
        ..Default::default()
    })
    .unwrap();

    assert!(matches!(
        engine.synthesize("Hello").await,
        Err(TTSError::AuthenticationFailed(_))
    ));
}

#[tokio::test]
async fn test_google_translate_chunk_failure_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let engine = create_speech_engine(
        "google-translate",
        TTSConfig {
            base_url: Some(server.uri()),
            ..Default::default()
        },
    )
    .unwrap();

    let text = "word ".repeat(60);
    assert!(matches!(
        engine.synthesize(&text).await,
        Err(TTSError::ProviderError(_))
    ));
}
