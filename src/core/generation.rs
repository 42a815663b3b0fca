//! Content generation pipeline: prompt, completion, and for audio mode, speech.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::audio::{AudioArtifact, AudioError, AudioSynthesizer};
use super::completion::{CompletionError, CompletionProvider};
use super::prompt::build_prompt;
use super::request::{ContentMode, GenerationRequest};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Output of one generation, shaped by mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedContent {
    Text(String),
    Code(String),
    Visual(String),
    Audio {
        text: String,
        artifact: AudioArtifact,
    },
}

impl GeneratedContent {
    /// The generated text, whatever the mode
    pub fn content(&self) -> &str {
        match self {
            Self::Text(content) | Self::Code(content) | Self::Visual(content) => content,
            Self::Audio { text, .. } => text,
        }
    }

    pub fn mode(&self) -> ContentMode {
        match self {
            Self::Text(_) => ContentMode::Text,
            Self::Code(_) => ContentMode::Code,
            Self::Visual(_) => ContentMode::Visual,
            Self::Audio { .. } => ContentMode::Audio,
        }
    }
}

pub struct ContentGenerator {
    completion: Arc<dyn CompletionProvider>,
    audio: AudioSynthesizer,
}

impl ContentGenerator {
    pub fn new(completion: Arc<dyn CompletionProvider>, audio: AudioSynthesizer) -> Self {
        Self { completion, audio }
    }

    pub fn completion(&self) -> &Arc<dyn CompletionProvider> {
        &self.completion
    }

    pub fn audio(&self) -> &AudioSynthesizer {
        &self.audio
    }

    /// Run one request through the pipeline. A single attempt is made against
    /// each external service.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedContent, GenerationError> {
        let prompt = build_prompt(request);
        debug!(
            mode = %request.mode,
            model = self.completion.model(),
            prompt_chars = prompt.len(),
            "Requesting completion"
        );

        let content = self.completion.complete(&prompt).await.inspect_err(|e| {
            warn!(provider = self.completion.provider_name(), error = %e, "Completion failed");
        })?;

        Ok(match request.mode {
            ContentMode::Text => GeneratedContent::Text(content),
            ContentMode::Code => GeneratedContent::Code(content),
            ContentMode::Visual => GeneratedContent::Visual(content),
            ContentMode::Audio => {
                let artifact = self
                    .audio
                    .synthesize_to_file(&content)
                    .await
                    .inspect_err(|e| warn!(error = %e, "Audio generation failed"))?;
                GeneratedContent::Audio {
                    text: content,
                    artifact,
                }
            }
        })
    }
}
