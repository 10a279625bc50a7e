//! Validated name newtypes
//!
//! Player names are shown to the whole table in announcements, so they are
//! valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a player name
const MAX_NAME_LENGTH: usize = 64;

// ============================================================================
// PlayerName
// ============================================================================

/// A validated player name (non-empty, <=64 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a new validated player name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 64 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Player name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = PlayerName::new("  Thierry  ").unwrap();
        assert_eq!(name.as_str(), "Thierry");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(PlayerName::new("   ").is_err());
        assert!(PlayerName::new("").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            PlayerName::new(long),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn deserialization_validates() {
        let ok: PlayerName = serde_json::from_str("\"Ana\"").unwrap();
        assert_eq!(ok.as_str(), "Ana");
        assert!(serde_json::from_str::<PlayerName>("\"  \"").is_err());
    }
}
