//! Merging of YAML, environment and default values into one `ServerConfig`.

use std::path::PathBuf;

use super::env::EnvConfig;
use super::yaml::{TlsYaml, YamlConfig};
use super::{ServerConfig, TlsConfig};

/// Build a `ServerConfig` from the environment, overridden by `yaml` when given.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = EnvConfig::load()?;
    let yaml = yaml.unwrap_or_default();

    let server = yaml.server.unwrap_or_default();
    let openrouter = yaml.openrouter.unwrap_or_default();
    let tts = yaml.tts.unwrap_or_default();
    let paths = yaml.paths.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();

    let tls = merge_tls(server.tls, &env)?;

    let api_key = openrouter
        .api_key
        .or(env.openrouter_api_key)
        .unwrap_or_default();
    let mut config = ServerConfig::with_defaults(api_key);

    if let Some(host) = server.host.or(env.host) {
        config.host = host;
    }
    if let Some(port) = server.port.or(env.port) {
        config.port = port;
    }
    config.tls = tls;

    if let Some(model) = openrouter.model.or(env.openrouter_model) {
        config.openrouter_model = model;
    }
    if let Some(base_url) = openrouter.base_url.or(env.openrouter_base_url) {
        config.openrouter_base_url = base_url;
    }
    if let Some(timeout) = openrouter
        .timeout_seconds
        .or(env.openrouter_timeout_seconds)
    {
        config.openrouter_timeout_seconds = timeout;
    }
    if let Some(referer) = openrouter.referer.or(env.openrouter_referer) {
        config.openrouter_referer = referer;
    }

    if let Some(provider) = tts.provider.or(env.tts_provider) {
        config.tts_provider = provider;
    }
    if let Some(language) = tts.language.or(env.tts_language) {
        config.tts_language = language;
    }
    if let Some(timeout) = tts.timeout_seconds.or(env.tts_timeout_seconds) {
        config.tts_timeout_seconds = timeout;
    }
    config.tts_base_url = tts.base_url.or(env.tts_base_url);
    config.openai_api_key = tts.openai_api_key.or(env.openai_api_key);
    config.openai_tts_voice = tts.openai_voice.or(env.openai_tts_voice);
    config.openai_tts_model = tts.openai_model.or(env.openai_tts_model);

    if let Some(static_dir) = paths.static_dir.map(PathBuf::from).or(env.static_dir) {
        config.static_dir = static_dir;
    }

    config.cors_allowed_origins = security.cors_allowed_origins.or(env.cors_allowed_origins);
    if let Some(rps) = security
        .rate_limit_requests_per_second
        .or(env.rate_limit_requests_per_second)
    {
        config.rate_limit_requests_per_second = rps;
    }
    if let Some(burst) = security.rate_limit_burst_size.or(env.rate_limit_burst_size) {
        config.rate_limit_burst_size = burst;
    }

    Ok(config)
}

fn merge_tls(yaml: Option<TlsYaml>, env: &EnvConfig) -> Result<Option<TlsConfig>, String> {
    let yaml = yaml.unwrap_or_default();
    let enabled = yaml.enabled.or(env.tls_enabled).unwrap_or(false);
    if !enabled {
        return Ok(None);
    }

    let cert_path = yaml
        .cert_path
        .map(PathBuf::from)
        .or_else(|| env.tls_cert_path.clone())
        .ok_or("TLS is enabled but TLS_CERT_PATH is not set")?;
    let key_path = yaml
        .key_path
        .map(PathBuf::from)
        .or_else(|| env.tls_key_path.clone())
        .ok_or("TLS is enabled but TLS_KEY_PATH is not set")?;

    Ok(Some(TlsConfig {
        cert_path,
        key_path,
    }))
}
