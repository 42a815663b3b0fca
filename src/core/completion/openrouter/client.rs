//! OpenRouter chat completions client.
//!
//! Issues exactly one `POST /chat/completions` per call. There is no retry and
//! no model fallback: a transient provider failure fails the request.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::config::OpenRouterConfig;
use super::messages::{ChatCompletionRequest, ChatCompletionResponse, OpenRouterErrorResponse};
use crate::core::completion::base::{CompletionError, CompletionProvider, CompletionResult};

/// Upper bound on provider error text carried into logs
const MAX_ERROR_BODY_CHARS: usize = 500;

pub struct OpenRouterClient {
    config: OpenRouterConfig,
    /// Reused across requests for connection pooling
    http_client: Client,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> CompletionResult<Self> {
        config
            .validate()
            .map_err(CompletionError::InvalidConfiguration)?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                CompletionError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    fn build_http_request(&self, prompt: &str) -> reqwest::RequestBuilder {
        let body = ChatCompletionRequest::user_prompt(
            &self.config.model,
            prompt,
            self.config.temperature,
            self.config.max_tokens,
        );

        self.http_client
            .post(self.config.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> CompletionError {
        if error.is_timeout() {
            CompletionError::Timeout(self.config.timeout.as_secs())
        } else {
            CompletionError::Network(error.to_string())
        }
    }
}

/// Map a non-2xx response to the error taxonomy
fn map_status_error(status: StatusCode, body: &str) -> CompletionError {
    let message = serde_json::from_str::<OpenRouterErrorResponse>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| truncate(body, MAX_ERROR_BODY_CHARS));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Authentication {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(message),
        _ => CompletionError::Provider {
            status: status.as_u16(),
            message,
        },
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Extract the completion text from a successful response body
fn parse_completion(body: &str) -> CompletionResult<String> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::InvalidResponse(format!("Malformed JSON: {e}")))?;

    if let Some(error) = response.error {
        return Err(CompletionError::Provider {
            status: 200,
            message: error.message,
        });
    }

    match response.first_content() {
        Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
        Some(_) => Err(CompletionError::InvalidResponse(
            "Completion text is empty".to_string(),
        )),
        None => Err(CompletionError::InvalidResponse(
            "Response contains no choices".to_string(),
        )),
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        let started = Instant::now();
        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "Calling OpenRouter chat completions"
        );

        let response = self
            .build_http_request(prompt)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            let error = map_status_error(status, &body);
            warn!(
                model = %self.config.model,
                status = status.as_u16(),
                "OpenRouter request failed: {error}"
            );
            return Err(error);
        }

        let content = parse_completion(&body)?;
        debug!(
            model = %self.config.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            content_chars = content.len(),
            "OpenRouter completion received"
        );
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn provider_name(&self) -> &'static str {
        "openrouter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_building() {
        let mut config = OpenRouterConfig::new("sk-or-test");
        config.model = "mistralai/mistral-7b-instruct".to_string();
        let client = OpenRouterClient::new(config).unwrap();

        let built = client.build_http_request("Explain PCA").build().unwrap();

        assert_eq!(
            built.url().as_str(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(built.headers().get("Authorization").unwrap(), "Bearer sk-or-test");
        assert_eq!(built.headers().get("X-Title").unwrap(), "LearnSphere");
        assert_eq!(
            built.headers().get("HTTP-Referer").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(
            built.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let result = OpenRouterClient::new(OpenRouterConfig::new(""));
        assert!(matches!(result, Err(CompletionError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_map_status_error_variants() {
        let body = r#"{"error": {"code": 401, "message": "User not found."}}"#;
        assert_eq!(
            map_status_error(StatusCode::UNAUTHORIZED, body),
            CompletionError::Authentication {
                status: 401,
                message: "User not found.".into()
            }
        );
        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            CompletionError::RateLimited(msg) if msg == "slow down"
        ));
        assert_eq!(
            map_status_error(StatusCode::BAD_GATEWAY, "upstream"),
            CompletionError::Provider {
                status: 502,
                message: "upstream".into()
            }
        );
    }

    #[test]
    fn test_error_body_is_truncated() {
        let body = "x".repeat(2000);
        match map_status_error(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            CompletionError::Provider { message, .. } => {
                assert_eq!(message.len(), MAX_ERROR_BODY_CHARS + 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_completion() {
        let ok = r#"{"choices": [{"message": {"role": "assistant", "content": "import numpy as np"}}]}"#;
        assert_eq!(parse_completion(ok).unwrap(), "import numpy as np");

        let blank = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        assert!(matches!(
            parse_completion(blank),
            Err(CompletionError::InvalidResponse(_))
        ));

        let embedded_error = r#"{"error": {"message": "Provider returned error"}}"#;
        assert!(matches!(
            parse_completion(embedded_error),
            Err(CompletionError::Provider { status: 200, .. })
        ));

        assert!(matches!(
            parse_completion("<html>"),
            Err(CompletionError::InvalidResponse(_))
        ));
    }
}
