//! Client setup errors.
//!
//! Request-time failures are reported as [`facet_model::FilterError`] so the
//! engine can turn them into facet or result status.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or building the HTTP client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The configuration file is not valid TOML for [`crate::ClientConfig`].
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The base URL is malformed or not an HTTP(S) URL.
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl ConfigError {
    /// Returns a short message suitable for a terminal.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Read { .. } => "Could not read the configuration file.",
            Self::Parse { .. } => "The configuration file is not valid.",
            Self::InvalidBaseUrl { .. } => "The backend URL is not valid.",
            Self::Client(_) => "Could not initialize the HTTP client.",
        }
    }
}

/// Result type alias for client setup.
pub type Result<T> = std::result::Result<T, ConfigError>;
