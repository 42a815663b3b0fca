//! Environment variable loading.
//!
//! Every field is optional here; defaults are applied in `merge`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Raw values read from the process environment
#[derive(Debug, Default)]
pub(super) struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,

    pub tls_enabled: Option<bool>,
    pub tls_cert_path: Option<PathBuf>,
    pub tls_key_path: Option<PathBuf>,

    pub openrouter_api_key: Option<String>,
    pub openrouter_model: Option<String>,
    pub openrouter_base_url: Option<String>,
    pub openrouter_timeout_seconds: Option<u64>,
    pub openrouter_referer: Option<String>,

    pub tts_provider: Option<String>,
    pub tts_language: Option<String>,
    pub tts_base_url: Option<String>,
    pub tts_timeout_seconds: Option<u64>,
    pub openai_api_key: Option<String>,
    pub openai_tts_voice: Option<String>,
    pub openai_tts_model: Option<String>,

    pub static_dir: Option<PathBuf>,

    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: Option<u32>,
    pub rate_limit_burst_size: Option<u32>,
}

impl EnvConfig {
    pub fn load() -> Result<Self, String> {
        Ok(Self {
            host: string_var("HOST"),
            port: parsed_var("PORT")?,

            tls_enabled: bool_var("TLS_ENABLED")?,
            tls_cert_path: string_var("TLS_CERT_PATH").map(PathBuf::from),
            tls_key_path: string_var("TLS_KEY_PATH").map(PathBuf::from),

            openrouter_api_key: string_var("OPENROUTER_API_KEY"),
            openrouter_model: string_var("OPENROUTER_MODEL"),
            openrouter_base_url: string_var("OPENROUTER_BASE_URL"),
            openrouter_timeout_seconds: parsed_var("OPENROUTER_TIMEOUT_SECONDS")?,
            openrouter_referer: string_var("OPENROUTER_REFERER"),

            tts_provider: string_var("TTS_PROVIDER"),
            tts_language: string_var("TTS_LANGUAGE"),
            tts_base_url: string_var("TTS_BASE_URL"),
            tts_timeout_seconds: parsed_var("TTS_TIMEOUT_SECONDS")?,
            openai_api_key: string_var("OPENAI_API_KEY"),
            openai_tts_voice: string_var("OPENAI_TTS_VOICE"),
            openai_tts_model: string_var("OPENAI_TTS_MODEL"),

            static_dir: string_var("STATIC_DIR").map(PathBuf::from),

            cors_allowed_origins: string_var("CORS_ALLOWED_ORIGINS"),
            rate_limit_requests_per_second: parsed_var("RATE_LIMIT_REQUESTS_PER_SECOND")?,
            rate_limit_burst_size: parsed_var("RATE_LIMIT_BURST_SIZE")?,
        })
    }
}

/// Set and non-blank, trimmed
fn string_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed_var<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    string_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| format!("Invalid value for {key}: '{raw}' ({e})"))
        })
        .transpose()
}

fn bool_var(key: &str) -> Result<Option<bool>, String> {
    string_var(key)
        .map(|raw| match raw.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(format!("Invalid value for {key}: '{raw}' (expected true or false)")),
        })
        .transpose()
}
