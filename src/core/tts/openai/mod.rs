//! OpenAI TTS engine.
//!
//! # Supported Models
//!
//! - `tts-1` - Standard quality, lower latency
//! - `tts-1-hd` - High definition quality, higher latency
//! - `gpt-4o-mini-tts`
//!
//! Requires `OPENAI_API_KEY`. Output is always mp3.

mod config;
mod provider;

pub use config::{OPENAI_TTS_MAX_INPUT_CHARS, OpenAITTSModel, OpenAIVoice};
pub use provider::{OPENAI_TTS_URL, OpenAITTS};
