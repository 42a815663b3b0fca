//! Configuration for the OpenRouter chat completions client.

use std::time::Duration;

use crate::config::ServerConfig;

/// Default OpenRouter REST base URL
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Auto-routing model: OpenRouter picks an available model per request
pub const DEFAULT_OPENROUTER_MODEL: &str = "openrouter/auto";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Application title reported to OpenRouter (`X-Title`)
pub const APP_TITLE: &str = "LearnSphere";

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL without trailing slash; `/chat/completions` is appended
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution
    pub referer: String,
    pub title: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_OPENROUTER_MODEL.to_string(),
            base_url: OPENROUTER_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            referer: "http://localhost:5000".to_string(),
            title: APP_TITLE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("OpenRouter API key must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("OpenRouter model must not be empty".to_string());
        }
        if self.timeout.is_zero() {
            return Err("OpenRouter timeout must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        url::Url::parse(&self.completions_url())
            .map_err(|e| format!("Invalid OpenRouter base URL '{}': {e}", self.base_url))?;
        Ok(())
    }
}

impl From<&ServerConfig> for OpenRouterConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
            base_url: config.openrouter_base_url.clone(),
            timeout: Duration::from_secs(config.openrouter_timeout_seconds),
            referer: config.openrouter_referer.clone(),
            ..Self::new(String::new())
        }
    }
}
