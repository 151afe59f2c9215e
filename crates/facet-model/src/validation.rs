//! Outcomes reported by the validation endpoint.

use serde::{Deserialize, Serialize};

/// Separator used when rejection messages are joined for display.
pub const ERROR_SEPARATOR: &str = "; ";

/// Verdict of the backend on a complete selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The combination is accepted.
    Valid,
    /// The combination is rejected; messages are kept verbatim.
    Invalid { errors: Vec<String> },
}

impl ValidationOutcome {
    pub fn invalid<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Invalid {
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Rejection messages joined for display, `None` when valid.
    pub fn joined_errors(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { errors } => Some(errors.join(ERROR_SEPARATOR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_joined_verbatim() {
        let outcome = ValidationOutcome::invalid(["unit required", "Location 7 is closed"]);
        assert!(!outcome.is_valid());
        assert_eq!(
            outcome.joined_errors().as_deref(),
            Some("unit required; Location 7 is closed")
        );
        assert_eq!(ValidationOutcome::Valid.joined_errors(), None);
    }
}
