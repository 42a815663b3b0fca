use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values given here
/// override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 5000
///   tls:
///     enabled: true
///     cert_path: "/etc/learnsphere/cert.pem"
///     key_path: "/etc/learnsphere/key.pem"
///
/// openrouter:
///   api_key: "sk-or-..."
///   model: "openrouter/auto"
///   base_url: "https://openrouter.ai/api/v1"
///   timeout_seconds: 30
///   referer: "https://learn.example.com"
///
/// tts:
///   provider: "google-translate"
///   language: "en"
///   timeout_seconds: 30
///   openai_api_key: "sk-..."
///   openai_voice: "nova"
///   openai_model: "tts-1"
///
/// paths:
///   static_dir: "/srv/learnsphere/static"
///
/// security:
///   cors_allowed_origins: "https://learn.example.com"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub openrouter: Option<OpenRouterYaml>,
    pub tts: Option<TtsYaml>,
    pub paths: Option<PathsYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Completion provider settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OpenRouterYaml {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub referer: Option<String>,
}

/// Speech engine settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TtsYaml {
    pub provider: Option<String>,
    pub language: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub openai_api_key: Option<String>,
    pub openai_voice: Option<String>,
    pub openai_model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PathsYaml {
    pub static_dir: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: Option<u32>,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
  tls:
    enabled: true
    cert_path: "/tmp/cert.pem"
    key_path: "/tmp/key.pem"

openrouter:
  api_key: "sk-or-yaml"
  model: "openrouter/auto"
  timeout_seconds: 45

tts:
  provider: "openai"
  openai_api_key: "sk-openai"
  openai_voice: "shimmer"

paths:
  static_dir: "/srv/static"

security:
  cors_allowed_origins: "*"
  rate_limit_requests_per_second: 100
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(server.port, Some(8080));
        assert_eq!(server.tls.unwrap().enabled, Some(true));

        let openrouter = config.openrouter.unwrap();
        assert_eq!(openrouter.api_key.as_deref(), Some("sk-or-yaml"));
        assert_eq!(openrouter.timeout_seconds, Some(45));
        assert_eq!(openrouter.base_url, None);

        let tts = config.tts.unwrap();
        assert_eq!(tts.provider.as_deref(), Some("openai"));
        assert_eq!(tts.openai_voice.as_deref(), Some("shimmer"));

        assert_eq!(
            config.paths.unwrap().static_dir.as_deref(),
            Some("/srv/static")
        );
        let security = config.security.unwrap();
        assert_eq!(security.cors_allowed_origins.as_deref(), Some("*"));
        assert_eq!(security.rate_limit_requests_per_second, Some(100));
        assert_eq!(security.rate_limit_burst_size, None);
    }

    #[test]
    fn test_yaml_config_empty() {
        let config: YamlConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.openrouter.is_none());
        assert!(config.tts.is_none());
    }

    #[test]
    fn test_yaml_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server:\n  port: 9000\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(config.server.unwrap().port, Some(9000));
    }

    #[test]
    fn test_yaml_wrong_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server:\n  port: \"not a number\"\n").unwrap();

        let err = YamlConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }
}
