//! HTTP request handlers
//!
//! - `api` - Health check and fallback
//! - `audio` - Generated audio download
//! - `generate` - Content generation

pub mod api;
pub mod audio;
pub mod generate;

pub use audio::download_audio;
pub use generate::generate_handler;
