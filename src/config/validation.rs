//! Configuration validation. Runs once at startup; any failure stops the server.

use std::path::Path;

use thiserror::Error;

use super::{ServerConfig, TlsConfig};
use crate::core::tts::{get_supported_tts_providers, normalize_tts_provider};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "OPENROUTER_API_KEY is required. Set it in the environment, a .env file, \
         or openrouter.api_key in the config file"
    )]
    MissingOpenRouterKey,

    #[error("Unsupported TTS provider '{provider}'. Supported providers: {supported}")]
    UnsupportedTtsProvider { provider: String, supported: String },

    #[error("TTS provider 'openai' requires OPENAI_API_KEY")]
    MissingOpenAIKey,

    #[error("Invalid URL for {field}: '{value}' ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("TTS_LANGUAGE must not be empty")]
    EmptyLanguage,

    #[error("TLS {kind} file not found: {path}")]
    TlsFileNotFound { kind: &'static str, path: String },
}

pub(super) fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
    validate_openrouter(config)?;
    validate_tts(config)?;
    validate_rate_limit(config)?;
    if let Some(tls) = &config.tls {
        validate_tls(tls)?;
    }
    Ok(())
}

fn validate_openrouter(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.openrouter_api_key.trim().is_empty() {
        return Err(ConfigError::MissingOpenRouterKey);
    }
    if config.openrouter_timeout_seconds == 0 {
        return Err(ConfigError::ZeroValue("OPENROUTER_TIMEOUT_SECONDS"));
    }
    validate_url("OPENROUTER_BASE_URL", &config.openrouter_base_url)
}

fn validate_tts(config: &ServerConfig) -> Result<(), ConfigError> {
    let provider = normalize_tts_provider(&config.tts_provider).ok_or_else(|| {
        ConfigError::UnsupportedTtsProvider {
            provider: config.tts_provider.clone(),
            supported: get_supported_tts_providers().join(", "),
        }
    })?;

    if provider == "openai"
        && config
            .openai_api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
    {
        return Err(ConfigError::MissingOpenAIKey);
    }
    if config.tts_language.trim().is_empty() {
        return Err(ConfigError::EmptyLanguage);
    }
    if config.tts_timeout_seconds == 0 {
        return Err(ConfigError::ZeroValue("TTS_TIMEOUT_SECONDS"));
    }
    if let Some(base_url) = &config.tts_base_url {
        validate_url("TTS_BASE_URL", base_url)?;
    }
    Ok(())
}

fn validate_rate_limit(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.rate_limit_requests_per_second == 0 {
        return Err(ConfigError::ZeroValue("RATE_LIMIT_REQUESTS_PER_SECOND"));
    }
    if config.rate_limit_burst_size == 0 {
        return Err(ConfigError::ZeroValue("RATE_LIMIT_BURST_SIZE"));
    }
    Ok(())
}

fn validate_tls(tls: &TlsConfig) -> Result<(), ConfigError> {
    check_file_exists("certificate", &tls.cert_path)?;
    check_file_exists("key", &tls.key_path)
}

fn check_file_exists(kind: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::TlsFileNotFound {
            kind,
            path: path.display().to_string(),
        })
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{scheme}'"),
        }),
    }
}
