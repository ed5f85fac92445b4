//! Security value object for tradable instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// An identifier for a tradable security.
///
/// Examples: "TCS", "AAPL", "INFY". Normalized to uppercase with
/// surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Security(String);

impl Security {
    /// Create a new Security.
    ///
    /// The identifier is trimmed and normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_uppercase())
    }

    /// Get the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the security for order placement.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the identifier is empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            return Err(DomainError::InvalidValue {
                field: "security".to_string(),
                message: "identifier must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Security {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
