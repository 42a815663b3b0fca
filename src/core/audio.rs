//! Speech synthesizer adapter: text in, MP3 file under the public audio
//! directory out.
//!
//! Files are write-once and never removed by the server. The directory grows
//! without bound; pruning is an operator task (`learnsphere prune-audio`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::tts::{SpeechEngine, TTSError};

/// Text beyond this many characters is not spoken
pub const MAX_SPEECH_CHARS: usize = 5000;

/// URL prefix under which the audio directory is served
pub const AUDIO_URL_PREFIX: &str = "/static/audio";

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] TTSError),

    #[error("Failed to write audio file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio file {0} was not created")]
    MissingOutput(PathBuf),

    #[error("Audio file {0} is empty")]
    EmptyOutput(PathBuf),
}

/// Reference to a generated audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub filename: String,
    /// Public URL path, e.g. `/static/audio/explanation_1a2b3c4d_20260219_101500.mp3`
    pub url_path: String,
    /// Location on disk
    pub path: PathBuf,
    pub size_bytes: u64,
}

pub struct AudioSynthesizer {
    engine: Arc<dyn SpeechEngine>,
    output_dir: PathBuf,
}

impl AudioSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn engine(&self) -> &Arc<dyn SpeechEngine> {
        &self.engine
    }

    /// Synthesize `text` into a new, uniquely named MP3 file.
    ///
    /// The file is verified to exist and be non-empty before it is returned.
    pub async fn synthesize_to_file(&self, text: &str) -> Result<AudioArtifact, AudioError> {
        let speech_text = truncate_for_speech(text);
        debug!(
            chars = speech_text.chars().count(),
            provider = self.engine.provider_name(),
            "Converting text to speech"
        );

        let audio = self.engine.synthesize(speech_text).await?;
        if audio.is_empty() {
            return Err(TTSError::EmptyAudio.into());
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| AudioError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        let filename = generate_audio_filename();
        let path = self.output_dir.join(&filename);
        tokio::fs::write(&path, &audio)
            .await
            .map_err(|source| AudioError::Io {
                path: path.clone(),
                source,
            })?;

        let size_bytes = verify_audio_file(&path).await?;
        info!(filename = %filename, size_bytes, "Audio saved");

        Ok(AudioArtifact {
            url_path: format!("{AUDIO_URL_PREFIX}/{filename}"),
            filename,
            path,
            size_bytes,
        })
    }
}

/// `explanation_<8 hex chars>_<YYYYmmdd_HHMMSS>.mp3`
///
/// The random component keeps names unique across concurrent requests within
/// the same second.
pub fn generate_audio_filename() -> String {
    let id = Uuid::new_v4().simple().to_string();
    let now = OffsetDateTime::now_utc();
    format!(
        "explanation_{}_{:04}{:02}{:02}_{:02}{:02}{:02}.mp3",
        &id[..8],
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Cut `text` to [`MAX_SPEECH_CHARS`] characters on a char boundary
pub fn truncate_for_speech(text: &str) -> &str {
    match text.char_indices().nth(MAX_SPEECH_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

async fn verify_audio_file(path: &Path) -> Result<u64, AudioError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AudioError::MissingOutput(path.to_path_buf()));
        }
        Err(source) => {
            return Err(AudioError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_file() {
        return Err(AudioError::MissingOutput(path.to_path_buf()));
    }
    if metadata.len() == 0 {
        return Err(AudioError::EmptyOutput(path.to_path_buf()));
    }
    Ok(metadata.len())
}
