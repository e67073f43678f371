//! Configuration file parser for ~/.config/newsfeed/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as potential typos.
use crate::news::{HttpSettings, CONNECT_TIMEOUT, MAX_RESPONSE_SIZE, READ_TIMEOUT};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
///
/// The Debug impl masks an `api-key` query parameter in `endpoint`.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search URL used when none is given on the command line.
    pub endpoint: Option<String>,

    pub connect_timeout_ms: u64,

    pub read_timeout_ms: u64,

    /// Upper bound on a response body, in bytes.
    pub max_response_bytes: usize,

    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        let http = HttpSettings::default();
        Self {
            endpoint: None,
            connect_timeout_ms: CONNECT_TIMEOUT.as_millis() as u64,
            read_timeout_ms: READ_TIMEOUT.as_millis() as u64,
            max_response_bytes: MAX_RESPONSE_SIZE,
            user_agent: http.user_agent,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint.as_deref().map(redact_endpoint))
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .field("max_response_bytes", &self.max_response_bytes)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Replace the value of an `api-key` query parameter with `[REDACTED]`.
fn redact_endpoint(endpoint: &str) -> String {
    let Ok(mut url) = Url::parse(endpoint) else {
        return endpoint.to_string();
    };

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api-key" {
                "[REDACTED]".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    if pairs.is_empty() {
        return endpoint.to_string();
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "endpoint",
        "connect_timeout_ms",
        "read_timeout_ms",
        "max_response_bytes",
        "user_agent",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Zero timeouts or size limit → `Err(ConfigError::Invalid)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            has_endpoint = config.endpoint.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "read_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_response_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// HTTP client settings derived from this config.
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            max_response_bytes: self.max_response_bytes,
            user_agent: self.user_agent.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("newsfeed_config_test_{name}"));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.endpoint.is_none());
        assert_eq!(config.connect_timeout_ms, 15000);
        assert_eq!(config.read_timeout_ms, 10000);
        assert_eq!(config.max_response_bytes, 10 * 1024 * 1024);
        assert!(config.user_agent.starts_with("newsfeed/"));
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/newsfeed_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.connect_timeout_ms, 15000);
    }

    #[test]
    fn test_empty_file_returns_default() {
        let path = write_config("empty", "");
        let config = Config::load(&path).unwrap();
        assert!(config.endpoint.is_none());
        cleanup(&path);
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let path = write_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.read_timeout_ms, 10000);
        cleanup(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config(
            "partial",
            "endpoint = \"https://content.guardianapis.com/search?q=science\"\n",
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("https://content.guardianapis.com/search?q=science")
        );
        assert_eq!(config.connect_timeout_ms, 15000);
        assert_eq!(config.read_timeout_ms, 10000);
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
endpoint = "https://content.guardianapis.com/search?q=technology"
connect_timeout_ms = 5000
read_timeout_ms = 2500
max_response_bytes = 65536
user_agent = "desk-reader/2.1"
"#;
        let path = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 2500);
        assert_eq!(config.max_response_bytes, 65536);
        assert_eq!(config.user_agent, "desk-reader/2.1");

        let http = config.http_settings();
        assert_eq!(http.connect_timeout, Duration::from_millis(5000));
        assert_eq!(http.read_timeout, Duration::from_millis(2500));
        assert_eq!(http.max_response_bytes, 65536);
        assert_eq!(http.user_agent, "desk-reader/2.1");
        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let path = write_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = r#"
read_timeout_ms = 3000
totally_fake_key = "should not fail"
"#;
        let path = write_config("unknown", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.read_timeout_ms, 3000);
        cleanup(&path);
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let path = write_config("wrongtype", "connect_timeout_ms = \"fast\"\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse(_))
        ));
        cleanup(&path);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let path = write_config("zero_timeout", "read_timeout_ms = 0\n");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("read_timeout_ms"));
        cleanup(&path);
    }

    #[test]
    fn test_zero_size_limit_rejected() {
        let path = write_config("zero_size", "max_response_bytes = 0\n");
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Invalid(_))
        ));
        cleanup(&path);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = Config {
            endpoint: Some(
                "https://content.guardianapis.com/search?q=rust&api-key=super-secret-key-12345"
                    .to_string(),
            ),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);
        assert!(
            !debug_output.contains("super-secret-key-12345"),
            "Debug output should not contain the API key"
        );
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("q=rust"));
    }

    #[test]
    fn test_redact_leaves_other_endpoints_alone() {
        assert_eq!(
            redact_endpoint("https://example.com/search"),
            "https://example.com/search"
        );
        assert_eq!(redact_endpoint("not a url"), "not a url");
        assert_eq!(
            redact_endpoint("https://example.com/search?q=rust&page-size=10"),
            "https://example.com/search?q=rust&page-size=10"
        );
    }
}
