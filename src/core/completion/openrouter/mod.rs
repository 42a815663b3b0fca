//! OpenRouter completion provider.
//!
//! OpenRouter exposes an OpenAI-compatible chat completions endpoint in front
//! of many hosted models. The default model, `openrouter/auto`, lets the
//! service pick an available model for each request.

mod client;
mod config;
mod messages;

pub use client::OpenRouterClient;
pub use config::{
    APP_TITLE, DEFAULT_MAX_TOKENS, DEFAULT_OPENROUTER_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECONDS, OPENROUTER_BASE_URL, OpenRouterConfig,
};
pub use messages::{ChatCompletionRequest, ChatCompletionResponse, OpenRouterErrorResponse};
