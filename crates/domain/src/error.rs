//! Unified error types for the domain layer
//!
//! `DomainError` covers two situations that callers must keep apart:
//! setup validation (bad player names, role decks that do not fit the table)
//! and internal invariant violations (eliminating a dead player, resolving a
//! night outside of dawn). The latter are programming defects and are never
//! recoverable game events.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// State transition not allowed
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for setup input that does not satisfy
    /// domain constraints.
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Player name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }

    /// Returns true for errors that indicate a broken internal invariant
    /// rather than bad setup input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidStateTransition(_) | Self::NotFound { .. } | Self::Constraint(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
        assert!(!err.is_invariant_violation());
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Player", "123e4567-e89b-12d3-a456-426614174000");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Player"));
        assert!(err.to_string().contains("123e4567"));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_invalid_state_transition_error() {
        let err = DomainError::invalid_state_transition("player already dead");
        assert_eq!(
            err.to_string(),
            "Invalid state transition: player already dead"
        );
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_parse_error_is_not_an_invariant() {
        let err = DomainError::parse("Unknown role: Mayor");
        assert!(!err.is_invariant_violation());
    }
}
