//! Error types shared across the filter crates.

use thiserror::Error;

use crate::validation::ERROR_SEPARATOR;

/// Message shown when a request failed without a structured error body.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again.";

/// Errors produced at the backend boundary or while parsing user input.
///
/// Stale responses are not errors; they are reported as
/// `Resolution::Stale` by the engine and silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FilterError {
    /// Network or connection failure, including timeouts.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status and no structured body.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The validation endpoint rejected the selection with explicit messages.
    #[error("selection rejected: {}", .0.join(ERROR_SEPARATOR))]
    Rejected(Vec<String>),

    /// An identifier was not an integer.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl FilterError {
    /// Returns the text to show in place of a facet list or result region.
    ///
    /// Rejections are surfaced verbatim; everything transport-shaped collapses
    /// to a generic fetch-failure message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(errors) => errors.join(ERROR_SEPARATOR),
            Self::InvalidIdentifier(_) => self.to_string(),
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_) => {
                FETCH_FAILED_MESSAGE.to_string()
            }
        }
    }

    /// Returns whether repeating the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
