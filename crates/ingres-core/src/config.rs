//! Configuration types for the server, upstream classifier, session store and dialogue.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use toml::{from_str, to_string_pretty};

use crate::error::{Error, Result};
use crate::types::DefaultYear;

/// Complete assistant configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngresConfig {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Optional upstream language model
    pub upstream: UpstreamConfig,
    /// Session store limits
    pub sessions: SessionConfig,
    /// Dialogue defaults
    pub dialogue: DialogueConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_owned(),
        }
    }
}

/// Upstream classifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Whether the upstream classifier is consulted at all
    pub enabled: bool,
    /// Gemini API key; falls back to `GEMINI_API_KEY`
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Time budget for one classification call in milliseconds
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: "gemini-pro".to_owned(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_owned(),
            timeout_ms: 8000,
        }
    }
}

impl UpstreamConfig {
    /// API key set in the config file, ignoring a blank value.
    pub fn configured_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Session store limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of live sessions before the least recently active is evicted
    pub max_sessions: usize,
    /// Sessions idle for longer than this are dropped
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            idle_timeout_secs: 24 * 3600,
        }
    }
}

/// Dialogue defaults.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Fixed year label used when the user names none; current financial year if unset
    pub default_year: Option<String>,
}

impl DialogueConfig {
    /// Default-year policy for this configuration.
    pub fn default_year(&self) -> DefaultYear {
        self.default_year
            .as_ref()
            .filter(|label| !label.trim().is_empty())
            .map_or(DefaultYear::CurrentFinancialYear, |label| {
                DefaultYear::Fixed(label.trim().to_owned())
            })
    }
}

impl IngresConfig {
    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read config: {error}")))?;
        let config: Self = from_str(&contents)?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {}: upstream_enabled={}, api_key={}",
            path.display(),
            config.upstream.enabled,
            if config.upstream.api_key.is_some() {
                "present"
            } else {
                "missing"
            }
        );

        Ok(config)
    }

    /// Load config from `path` if given, defaults otherwise.
    ///
    /// # Errors
    /// Returns an error if a given file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load_from_file)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = to_string_pretty(self)
            .map_err(|error| Error::Config(format!("Failed to serialize config: {error}")))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Rejects values the engine cannot work with.
    ///
    /// # Errors
    /// Returns an error naming the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.sessions.max_sessions == 0 {
            return Err(Error::Config(
                "sessions.max_sessions must be at least 1".to_owned(),
            ));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(Error::Config(
                "upstream.timeout_ms must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = IngresConfig::default();
        assert_eq!(config.server.addr, "127.0.0.1:3000");
        assert!(config.upstream.enabled);
        assert_eq!(config.upstream.timeout_ms, 8000);
        assert_eq!(config.sessions.max_sessions, 10_000);
        assert_eq!(
            config.dialogue.default_year(),
            DefaultYear::CurrentFinancialYear
        );
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let mut upstream = UpstreamConfig::default();
        assert!(upstream.configured_api_key().is_none());

        upstream.api_key = Some("   ".to_owned());
        assert!(upstream.configured_api_key().is_none());

        upstream.api_key = Some(" key ".to_owned());
        assert_eq!(upstream.configured_api_key(), Some("key"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml_content = r#"
[upstream]
enabled = false
api_key = "test_gemini_key"

[dialogue]
default_year = "2024-2025"
"#;

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(toml_content.as_bytes())
            .expect("Failed to write to temp file");

        let config = IngresConfig::load_from_file(temp_file.path())
            .expect("Failed to load config from temp file");

        assert!(!config.upstream.enabled);
        assert_eq!(config.upstream.model, "gemini-pro");
        assert_eq!(config.upstream.configured_api_key(), Some("test_gemini_key"));
        assert_eq!(config.server.addr, "127.0.0.1:3000");
        assert_eq!(
            config.dialogue.default_year(),
            DefaultYear::Fixed("2024-2025".to_owned())
        );
    }

    #[test]
    fn test_invalid_limits_are_rejected() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"[sessions]\nmax_sessions = 0\n")
            .expect("Failed to write to temp file");

        let error = IngresConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn test_malformed_file_is_toml_error() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(b"[server\naddr = ")
            .expect("Failed to write to temp file");

        let error = IngresConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(matches!(error, Error::Toml(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut config = IngresConfig::default();
        config.server.addr = "0.0.0.0:8080".to_owned();
        config.save_to_file(temp_file.path()).expect("save");

        let reloaded = IngresConfig::load(Some(temp_file.path())).expect("reload");
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        let config = IngresConfig::load(None).expect("defaults");
        assert_eq!(config, IngresConfig::default());
    }
}
