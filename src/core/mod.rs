pub mod audio;
pub mod completion;
pub mod generation;
pub mod prompt;
pub mod request;
pub mod tts;

// Re-export commonly used types for convenience
pub use audio::{AUDIO_URL_PREFIX, AudioArtifact, AudioError, AudioSynthesizer, MAX_SPEECH_CHARS};

pub use completion::{
    CompletionError, CompletionProvider, CompletionResult, OpenRouterClient, OpenRouterConfig,
};

pub use generation::{ContentGenerator, GeneratedContent, GenerationError};

pub use prompt::build_prompt;

pub use request::{ContentMode, Depth, GenerateRequestBody, GenerationRequest, ValidationError};

pub use tts::{SpeechEngine, TTSConfig, TTSError, TTSResult, create_speech_engine};
