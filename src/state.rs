use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::ServerConfig;
use crate::core::{
    AudioSynthesizer, CompletionError, CompletionProvider, ContentGenerator, OpenRouterClient,
    OpenRouterConfig, SpeechEngine, TTSError, create_speech_engine,
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to create completion client: {0}")]
    Completion(#[from] CompletionError),

    #[error("Failed to create speech engine: {0}")]
    Speech(#[from] TTSError),

    #[error("Failed to create audio directory {path}: {source}")]
    AudioDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Application state shared by all handlers.
///
/// Everything here is immutable after startup; handlers only read it.
pub struct AppState {
    pub config: ServerConfig,
    pub generator: ContentGenerator,
}

impl AppState {
    /// Build the production providers from `config`.
    pub async fn new(config: ServerConfig) -> Result<Arc<Self>, StateError> {
        let completion = OpenRouterClient::new(OpenRouterConfig::from(&config))?;
        let engine = create_speech_engine(&config.tts_provider, config.tts_config())?;

        let audio_dir = config.audio_dir();
        tokio::fs::create_dir_all(&audio_dir)
            .await
            .map_err(|source| StateError::AudioDir {
                path: audio_dir.display().to_string(),
                source,
            })?;

        info!(
            model = completion.model(),
            tts_provider = engine.provider_name(),
            audio_dir = %audio_dir.display(),
            "Providers initialised"
        );

        Ok(Self::with_providers(config, Arc::new(completion), engine))
    }

    /// Assemble state around already-built providers.
    pub fn with_providers(
        config: ServerConfig,
        completion: Arc<dyn CompletionProvider>,
        engine: Arc<dyn SpeechEngine>,
    ) -> Arc<Self> {
        let audio = AudioSynthesizer::new(engine, config.audio_dir());
        Arc::new(Self {
            generator: ContentGenerator::new(completion, audio),
            config,
        })
    }
}
