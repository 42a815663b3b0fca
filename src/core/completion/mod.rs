mod base;
pub mod openrouter;

pub use base::{CompletionError, CompletionProvider, CompletionResult};
pub use openrouter::{OPENROUTER_BASE_URL, OpenRouterClient, OpenRouterConfig};
