//! Contractual errors
//!
//! A contractual error means the caller sent a response that does not fit the
//! instruction it answers: wrong shape, wrong count, unknown ids. These are
//! client bugs. They are raised before any game logic runs and never change
//! session state.

use thiserror::Error;

use hollow_domain::{MainRole, PlayerId};

use crate::instructions::InstructionKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Expected a {expected} response, received {received}")]
    WrongResponseKind {
        expected: InstructionKind,
        received: InstructionKind,
    },

    #[error("Confirmation must be acknowledged")]
    NotConfirmed,

    #[error("Selected {count} item(s), expected between {min} and {max}")]
    CountOutOfRange { count: usize, min: usize, max: usize },

    #[error("Player {0} is not selectable")]
    NotSelectable(PlayerId),

    #[error("Player {0} was selected more than once")]
    DuplicateSelection(PlayerId),

    #[error("Player {0} is not part of this role assignment")]
    UnknownPlayer(PlayerId),

    #[error("Role {role} is not a candidate for player {player}")]
    RoleNotCandidate { player: PlayerId, role: MainRole },

    #[error("Player {0} was not assigned a role")]
    MissingAssignment(PlayerId),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option selected more than once: {0}")]
    DuplicateOption(String),

    // Instruction construction
    #[error("Instruction needs a public announcement or a private note")]
    EmptyInstructionText,

    #[error("Invalid count constraint: min {min} is greater than max {max}")]
    InvalidConstraint { min: usize, max: usize },

    #[error("Count constraint requires at least {min} choice(s), only {available} offered")]
    NotEnoughChoices { min: usize, available: usize },

    #[error("Player {0} is listed twice in the role assignment")]
    DuplicateCandidate(PlayerId),

    #[error("Player {0} has no candidate roles")]
    NoCandidateRoles(PlayerId),
}

impl ContractError {
    /// Stable machine-readable code, used by the CLI error output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongResponseKind { .. } => "wrong_response_kind",
            Self::NotConfirmed => "not_confirmed",
            Self::CountOutOfRange { .. } => "count_out_of_range",
            Self::NotSelectable(_) => "not_selectable",
            Self::DuplicateSelection(_) => "duplicate_selection",
            Self::UnknownPlayer(_) => "unknown_player",
            Self::RoleNotCandidate { .. } => "role_not_candidate",
            Self::MissingAssignment(_) => "missing_assignment",
            Self::UnknownOption(_) => "unknown_option",
            Self::DuplicateOption(_) => "duplicate_option",
            Self::EmptyInstructionText => "empty_instruction_text",
            Self::InvalidConstraint { .. } => "invalid_constraint",
            Self::NotEnoughChoices { .. } => "not_enough_choices",
            Self::DuplicateCandidate(_) => "duplicate_candidate",
            Self::NoCandidateRoles(_) => "no_candidate_roles",
        }
    }
}
