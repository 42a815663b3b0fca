use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while talking to a completion provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("Invalid completion configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Authentication failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl CompletionError {
    /// HTTP status reported by the provider, when there was one
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Provider { status, .. } => Some(*status),
            Self::RateLimited(_) => Some(429),
            _ => None,
        }
    }
}

pub type CompletionResult<T> = Result<T, CompletionError>;

/// A remote text-generation service.
///
/// One call is one attempt: implementations must not retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` and return the first completion's text
    async fn complete(&self, prompt: &str) -> CompletionResult<String>;

    /// Model identifier requests are sent with
    fn model(&self) -> &str;

    fn provider_name(&self) -> &'static str;
}
