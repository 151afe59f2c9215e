//! Client configuration.
//!
//! Settings live in `client.toml` inside the platform configuration folder:
//! - macOS: ~/Library/Application Support/dev.facet-filter.facet-filter/
//! - Windows: %APPDATA%/facet-filter/facet-filter/config/
//! - Linux: ~/.config/facet-filter/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("facet-filter/", env!("CARGO_PKG_VERSION"));

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "facet-filter";
const APP_NAME: &str = "facet-filter";
const CONFIG_FILENAME: &str = "client.toml";

/// Connection settings for [`crate::HttpBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the REST API; `/filters/...` is appended to it.
    pub base_url: String,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Path of the configuration file in the platform config folder.
    ///
    /// Returns `None` if the platform-specific directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// is used if present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        let Some(path) = Self::default_path() else {
            tracing::debug!("Could not determine config path, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Reads and parses a specific configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!("Loaded client config from {:?}", path);
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parses [`Self::base_url`], accepting only HTTP(S) URLs with a path.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let invalid = |message: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message: message.to_string(),
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base"));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert!(config.request_timeout().is_none());
        assert!(config.parsed_base_url().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ClientConfig = toml::from_str("request_timeout_secs = 5").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(&path, "base_url = \"https://filters.example.com/v2\"\n").unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();
        assert_eq!(config.base_url, "https://filters.example.com/v2");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        fs::write(&path, "base_url = [").unwrap();
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = ClientConfig::default().with_base_url("ftp://example.com/api");
        assert!(matches!(
            config.parsed_base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(config.parsed_base_url().is_err());
    }

    #[test]
    fn test_round_trip_toml() {
        let config = ClientConfig::default().with_request_timeout_secs(Some(10));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
