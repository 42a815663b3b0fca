mod base;
pub mod google_translate;
pub mod openai;

pub use base::{SpeechEngine, TTSConfig, TTSError, TTSResult};
pub use google_translate::{GOOGLE_TRANSLATE_TTS_URL, GoogleTranslateTTS};
pub use openai::{OPENAI_TTS_URL, OpenAITTS, OpenAITTSModel, OpenAIVoice};

use std::collections::HashMap;
use std::sync::Arc;

/// Factory function to create a speech engine.
///
/// # Supported Providers
///
/// - `"google-translate"` (aliases `"google"`, `"gtts"`) - keyless Google Translate TTS
/// - `"openai"` - OpenAI TTS API (tts-1, tts-1-hd, gpt-4o-mini-tts)
///
/// # Example
///
/// ```rust,ignore
/// use learnsphere::core::tts::{create_speech_engine, TTSConfig};
///
/// let engine = create_speech_engine("google-translate", TTSConfig::default())?;
/// let mp3 = engine.synthesize("Hello, world!").await?;
/// ```
pub fn create_speech_engine(
    provider_type: &str,
    config: TTSConfig,
) -> TTSResult<Arc<dyn SpeechEngine>> {
    match normalize_tts_provider(provider_type) {
        Some("google-translate") => Ok(Arc::new(GoogleTranslateTTS::new(config)?)),
        Some("openai") => Ok(Arc::new(OpenAITTS::new(config)?)),
        _ => Err(TTSError::InvalidConfiguration(format!(
            "Unsupported TTS provider: {provider_type}. Supported providers: {}",
            get_supported_tts_providers().join(", ")
        ))),
    }
}

/// Canonical provider name for `name`, accepting aliases
pub fn normalize_tts_provider(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "google-translate" | "google_translate" | "google" | "gtts" => Some("google-translate"),
        "openai" => Some("openai"),
        _ => None,
    }
}

pub fn get_supported_tts_providers() -> &'static [&'static str] {
    &["google-translate", "openai"]
}

/// Returns a map of provider names to their default endpoint hosts.
pub fn get_tts_provider_urls() -> HashMap<String, String> {
    let mut urls = HashMap::new();
    urls.insert(
        "google-translate".to_string(),
        GOOGLE_TRANSLATE_TTS_URL.to_string(),
    );
    urls.insert("openai".to_string(), OPENAI_TTS_URL.to_string());
    urls
}
