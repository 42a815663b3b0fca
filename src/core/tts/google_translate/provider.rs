//! Google Translate TTS engine.
//!
//! Uses the public `translate_tts` endpoint that backs the speaker button on
//! translate.google.com. No API key is needed. Each chunk of text is fetched
//! as a separate MP3 segment; MP3 frames concatenate cleanly, so the segments
//! are joined in order into one stream.
//!
//! # API Reference
//!
//! - Endpoint: `GET https://translate.google.com/translate_tts`
//! - Params: `ie=UTF-8`, `q`, `tl`, `client=tw-ob`, `total`, `idx`, `textlen`
//! - Output: `audio/mpeg`

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tracing::debug;
use url::Url;

use super::chunker::{MAX_CHUNK_CHARS, split_text};
use crate::core::tts::base::{SpeechEngine, TTSConfig, TTSError, TTSResult, build_http_client};

/// Google Translate host; `/translate_tts` is appended
pub const GOOGLE_TRANSLATE_TTS_URL: &str = "https://translate.google.com";

/// The endpoint rejects requests without a browser-like user agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

pub struct GoogleTranslateTTS {
    config: TTSConfig,
    http_client: reqwest::Client,
    endpoint: Url,
}

impl GoogleTranslateTTS {
    pub fn new(config: TTSConfig) -> TTSResult<Self> {
        if config.language.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "Language must not be empty".to_string(),
            ));
        }

        let base = config
            .base_url
            .as_deref()
            .unwrap_or(GOOGLE_TRANSLATE_TTS_URL)
            .trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/translate_tts")).map_err(|e| {
            TTSError::InvalidConfiguration(format!("Invalid TTS base URL '{base}': {e}"))
        })?;

        Ok(Self {
            http_client: build_http_client(config.timeout)?,
            config,
            endpoint,
        })
    }

    pub fn language(&self) -> &str {
        &self.config.language
    }

    fn chunk_url(&self, chunk: &str, idx: usize, total: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("q", chunk)
            .append_pair("tl", &self.config.language)
            .append_pair("client", "tw-ob")
            .append_pair("total", &total.to_string())
            .append_pair("idx", &idx.to_string())
            .append_pair("textlen", &chunk.chars().count().to_string());
        url
    }

    async fn fetch_chunk(&self, chunk: &str, idx: usize, total: usize) -> TTSResult<Bytes> {
        let response = self
            .http_client
            .get(self.chunk_url(chunk, idx, total))
            .header("User-Agent", USER_AGENT)
            .header("Referer", "https://translate.google.com/")
            .send()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TTSError::ProviderError(format!(
                "Google Translate TTS error ({status}) on chunk {}/{total}: {}",
                idx + 1,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Failed to read audio: {e}")))
    }
}

#[async_trait]
impl SpeechEngine for GoogleTranslateTTS {
    async fn synthesize(&self, text: &str) -> TTSResult<Bytes> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "No text to synthesize".to_string(),
            ));
        }

        let total = chunks.len();
        debug!(
            chunks = total,
            language = %self.config.language,
            "Synthesizing speech with Google Translate TTS"
        );

        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let segment = self.fetch_chunk(chunk, idx, total).await?;
            audio.extend_from_slice(&segment);
        }

        if audio.is_empty() {
            return Err(TTSError::EmptyAudio);
        }
        Ok(audio.freeze())
    }

    fn provider_name(&self) -> &'static str {
        "google-translate"
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "google-translate",
            "api_type": "HTTP REST",
            "requires_api_key": false,
            "supported_formats": ["mp3"],
            "max_chunk_chars": MAX_CHUNK_CHARS,
            "language": self.config.language,
            "endpoint": self.endpoint.as_str(),
        })
    }
}
