//! Configuration module for the LearnSphere server
//!
//! Configuration comes from .env files, environment variables and an optional
//! YAML file. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use learnsphere::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod validation;
mod yaml;

pub use validation::ConfigError;

use crate::core::completion::openrouter::{
    DEFAULT_OPENROUTER_MODEL, DEFAULT_TIMEOUT_SECONDS, OPENROUTER_BASE_URL,
};
use crate::core::tts::TTSConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_REFERER: &str = "http://localhost:5000";
pub const DEFAULT_TTS_PROVIDER: &str = "google-translate";
pub const DEFAULT_TTS_LANGUAGE: &str = "en";
pub const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Server configuration
///
/// Loaded once at startup and shared read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Completion provider (OpenRouter)
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub openrouter_base_url: String,
    pub openrouter_timeout_seconds: u64,
    /// Sent as `HTTP-Referer`; OpenRouter uses it for app attribution
    pub openrouter_referer: String,

    // Speech engine
    /// "google-translate" (default, keyless) or "openai"
    pub tts_provider: String,
    pub tts_language: String,
    /// Override for the speech engine endpoint base
    pub tts_base_url: Option<String>,
    pub tts_timeout_seconds: u64,
    /// Required when `tts_provider` is "openai"
    pub openai_api_key: Option<String>,
    pub openai_tts_voice: Option<String>,
    pub openai_tts_model: Option<String>,

    // Paths
    /// Root of the public static tree; audio goes to `<static_dir>/audio`
    pub static_dir: PathBuf,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,
}

/// Zeroize secret fields when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.openrouter_api_key.zeroize();
        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Configuration with every optional setting at its default.
    pub fn with_defaults(openrouter_api_key: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tls: None,
            openrouter_api_key: openrouter_api_key.into(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            openrouter_base_url: OPENROUTER_BASE_URL.to_string(),
            openrouter_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            openrouter_referer: DEFAULT_REFERER.to_string(),
            tts_provider: DEFAULT_TTS_PROVIDER.to_string(),
            tts_language: DEFAULT_TTS_LANGUAGE.to_string(),
            tts_base_url: None,
            tts_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            openai_api_key: None,
            openai_tts_voice: None,
            openai_tts_model: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cors_allowed_origins: None,
            rate_limit_requests_per_second: DEFAULT_RATE_LIMIT_RPS,
            rate_limit_burst_size: DEFAULT_RATE_LIMIT_BURST,
        }
    }

    /// Load configuration from environment variables only.
    ///
    /// `.env` is loaded by `main` before this is called, so its values are
    /// visible here as ordinary environment variables.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails (e.g. no OpenRouter API key)
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if TLS configuration is present
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// Directory generated MP3 files are written to
    pub fn audio_dir(&self) -> PathBuf {
        self.static_dir.join("audio")
    }

    /// Speech engine settings for the configured provider
    pub fn tts_config(&self) -> TTSConfig {
        TTSConfig {
            provider: self.tts_provider.clone(),
            api_key: self.openai_api_key.clone().unwrap_or_default(),
            voice_id: self.openai_tts_voice.clone(),
            model: self.openai_tts_model.clone().unwrap_or_default(),
            language: self.tts_language.clone(),
            base_url: self.tts_base_url.clone(),
            timeout: Duration::from_secs(self.tts_timeout_seconds),
        }
    }
}
