//! Engine error types.
//!
//! Three failure tiers are kept apart:
//! - contract errors: the response does not fit the instruction (client bug)
//! - rule violations: the response fits but breaks a game rule; the same
//!   instruction is re-issued
//! - invariant violations: engine defects; they poison the engine

use serde::Serialize;
use thiserror::Error;

use hollow_domain::DomainError;
use hollow_shared::{ContractError, ModeratorInstruction};

/// Broad class of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleErrorCategory {
    /// Illegal choice of players for a power
    Targeting,
    /// Role distribution does not match the deck
    Setup,
    /// Response arrived at a step that cannot use it
    Sequence,
}

/// Machine-readable rule violation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleErrorCode {
    RepeatedProtection,
    RoleDistributionMismatch,
    NoEligibleChoice,
    UnexpectedResponse,
    UnknownOption,
}

/// A game-rule failure, reported to the moderator without changing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct RuleViolation {
    pub category: RuleErrorCategory,
    pub code: RuleErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl RuleViolation {
    pub fn new(
        category: RuleErrorCategory,
        code: RuleErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The listener received a response its current sub-state cannot use.
    pub fn unexpected_response(listener: impl std::fmt::Display) -> Self {
        Self::new(
            RuleErrorCategory::Sequence,
            RuleErrorCode::UnexpectedResponse,
            format!("{} cannot use this response now", listener),
        )
    }

    /// An instruction could not be built from the current choices.
    pub fn no_eligible_choice(error: ContractError) -> Self {
        Self::new(
            RuleErrorCategory::Targeting,
            RuleErrorCode::NoEligibleChoice,
            "No valid choice can be offered",
        )
        .with_context(error.to_string())
    }
}

/// Errors returned by [`crate::GameEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid game setup: {0}")]
    Setup(DomainError),

    #[error("Contract violation: {0}")]
    Contract(#[from] ContractError),

    #[error("Rule violation: {violation}")]
    Rule {
        violation: RuleViolation,
        /// Instruction to answer instead
        reissued: Box<ModeratorInstruction>,
    },

    #[error("The session is finished")]
    SessionFinished,

    #[error("Internal invariant violated: {0}")]
    Invariant(DomainError),

    #[error("Engine halted after an internal invariant violation")]
    Poisoned,
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Setup(_) => "setup",
            Self::Contract(e) => e.code(),
            Self::Rule { .. } => "rule_violation",
            Self::SessionFinished => "session_finished",
            Self::Invariant(_) => "invariant",
            Self::Poisoned => "poisoned",
        }
    }

    /// True if the caller can correct the input and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Contract(_) | Self::Rule { .. })
    }
}
