use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors raised by speech engines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TTSError {
    #[error("Invalid TTS configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider returned no audio")]
    EmptyAudio,
}

pub type TTSResult<T> = Result<T, TTSError>;

/// Engine-agnostic speech configuration
#[derive(Debug, Clone)]
pub struct TTSConfig {
    /// Provider name, e.g. "google-translate" or "openai"
    pub provider: String,
    /// Unused by keyless engines
    pub api_key: String,
    pub voice_id: Option<String>,
    pub model: String,
    /// Language code for synthesis (ISO 639-1)
    pub language: String,
    /// Override for the provider endpoint base (used by tests and proxies)
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for TTSConfig {
    fn default() -> Self {
        Self {
            provider: "google-translate".to_string(),
            api_key: String::new(),
            voice_id: None,
            model: String::new(),
            language: "en".to_string(),
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A text-to-speech engine producing MP3 audio.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Synthesize `text` and return the complete MP3 stream
    async fn synthesize(&self, text: &str) -> TTSResult<Bytes>;

    fn provider_name(&self) -> &'static str;

    /// Provider metadata for diagnostics
    fn get_provider_info(&self) -> serde_json::Value;
}

/// Shared HTTP client construction for REST engines
pub(crate) fn build_http_client(timeout: Duration) -> TTSResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .build()
        .map_err(|e| TTSError::InvalidConfiguration(format!("Failed to create HTTP client: {e}")))
}
