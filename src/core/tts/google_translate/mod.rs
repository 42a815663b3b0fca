//! Google Translate TTS engine.
//!
//! Keyless MP3 synthesis through the `translate_tts` endpoint. Long text is
//! split into short chunks (see [`split_text`]) that are fetched in order and
//! concatenated.

mod chunker;
mod provider;

pub use chunker::{MAX_CHUNK_CHARS, split_text};
pub use provider::{GOOGLE_TRANSLATE_TTS_URL, GoogleTranslateTTS};
