//! OpenAI TTS engine.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.openai.com/v1/audio/speech`
//! - Output: always requested as mp3 so files match the audio directory

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use tracing::debug;

use super::config::{OPENAI_TTS_MAX_INPUT_CHARS, OpenAITTSModel, OpenAIVoice};
use crate::core::tts::base::{SpeechEngine, TTSConfig, TTSError, TTSResult, build_http_client};

/// OpenAI API host; `/v1/audio/speech` is appended
pub const OPENAI_TTS_URL: &str = "https://api.openai.com";

pub struct OpenAITTS {
    config: TTSConfig,
    model: OpenAITTSModel,
    voice: OpenAIVoice,
    http_client: reqwest::Client,
}

impl OpenAITTS {
    pub fn new(config: TTSConfig) -> TTSResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "OpenAI TTS requires OPENAI_API_KEY".to_string(),
            ));
        }

        let model = OpenAITTSModel::from_str_or_default(&config.model);
        let voice = config
            .voice_id
            .as_deref()
            .map(OpenAIVoice::from_str_or_default)
            .unwrap_or_default();

        Ok(Self {
            http_client: build_http_client(config.timeout)?,
            config,
            model,
            voice,
        })
    }

    pub fn model(&self) -> OpenAITTSModel {
        self.model
    }

    pub fn voice(&self) -> OpenAIVoice {
        self.voice
    }

    fn speech_url(&self) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(OPENAI_TTS_URL)
            .trim_end_matches('/');
        format!("{base}/v1/audio/speech")
    }

    fn build_http_request(&self, text: &str) -> reqwest::RequestBuilder {
        let input: String = text.chars().take(OPENAI_TTS_MAX_INPUT_CHARS).collect();
        let body = json!({
            "model": self.model.as_str(),
            "input": input,
            "voice": self.voice.as_str(),
            "response_format": "mp3",
        });

        self.http_client
            .post(self.speech_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
    }
}

#[async_trait]
impl SpeechEngine for OpenAITTS {
    async fn synthesize(&self, text: &str) -> TTSResult<Bytes> {
        if text.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "No text to synthesize".to_string(),
            ));
        }
        debug!(model = %self.model, voice = %self.voice, "Synthesizing speech with OpenAI TTS");

        let response = self
            .build_http_request(text)
            .send()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("OpenAI TTS error ({status}): {body}");
            return Err(if status.as_u16() == 401 {
                TTSError::AuthenticationFailed(message)
            } else {
                TTSError::ProviderError(message)
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Failed to read audio: {e}")))?;
        if audio.is_empty() {
            return Err(TTSError::EmptyAudio);
        }
        Ok(audio)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn get_provider_info(&self) -> serde_json::Value {
        json!({
            "provider": "openai",
            "api_type": "HTTP REST",
            "requires_api_key": true,
            "supported_formats": ["mp3"],
            "model": self.model.as_str(),
            "voice": self.voice.as_str(),
            "max_input_chars": OPENAI_TTS_MAX_INPUT_CHARS,
            "endpoint": self.speech_url(),
        })
    }
}
