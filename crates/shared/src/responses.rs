//! Moderator responses
//!
//! `ResponseInput` is what the client sends. `ModeratorResponse` is what the
//! engine consumes; it can only be built by the instruction it answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hollow_domain::{MainRole, PlayerId};

use crate::instructions::InstructionKind;

/// Raw, unvalidated moderator input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ResponseInput {
    Confirmation {
        confirmed: bool,
    },
    SelectPlayers {
        #[serde(default)]
        selected: Vec<PlayerId>,
    },
    AssignRoles {
        assignments: BTreeMap<PlayerId, MainRole>,
    },
    SelectOptions {
        #[serde(default)]
        selected: Vec<String>,
    },
}

impl ResponseInput {
    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::Confirmation { .. } => InstructionKind::Confirmation,
            Self::SelectPlayers { .. } => InstructionKind::SelectPlayers,
            Self::AssignRoles { .. } => InstructionKind::AssignRoles,
            Self::SelectOptions { .. } => InstructionKind::SelectOptions,
        }
    }

    /// Acknowledge a confirmation.
    pub fn confirm() -> Self {
        Self::Confirmation { confirmed: true }
    }

    pub fn players(selected: impl IntoIterator<Item = PlayerId>) -> Self {
        Self::SelectPlayers {
            selected: selected.into_iter().collect(),
        }
    }

    pub fn options<S: Into<String>>(selected: impl IntoIterator<Item = S>) -> Self {
        Self::SelectOptions {
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }
}

/// A response that passed contractual validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeratorResponse(Validated);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Validated {
    Confirmation,
    Players(Vec<PlayerId>),
    Roles(BTreeMap<PlayerId, MainRole>),
    Options(Vec<String>),
}

impl ModeratorResponse {
    pub(crate) fn confirmation() -> Self {
        Self(Validated::Confirmation)
    }

    pub(crate) fn players(selected: Vec<PlayerId>) -> Self {
        Self(Validated::Players(selected))
    }

    pub(crate) fn roles(assignments: BTreeMap<PlayerId, MainRole>) -> Self {
        Self(Validated::Roles(assignments))
    }

    pub(crate) fn options(selected: Vec<String>) -> Self {
        Self(Validated::Options(selected))
    }

    pub fn kind(&self) -> InstructionKind {
        match &self.0 {
            Validated::Confirmation => InstructionKind::Confirmation,
            Validated::Players(_) => InstructionKind::SelectPlayers,
            Validated::Roles(_) => InstructionKind::AssignRoles,
            Validated::Options(_) => InstructionKind::SelectOptions,
        }
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self.0, Validated::Confirmation)
    }

    pub fn selected_players(&self) -> Option<&[PlayerId]> {
        match &self.0 {
            Validated::Players(selected) => Some(selected),
            _ => None,
        }
    }

    pub fn assignments(&self) -> Option<&BTreeMap<PlayerId, MainRole>> {
        match &self.0 {
            Validated::Roles(assignments) => Some(assignments),
            _ => None,
        }
    }

    pub fn selected_options(&self) -> Option<&[String]> {
        match &self.0 {
            Validated::Options(selected) => Some(selected),
            _ => None,
        }
    }

    /// True if `option` was among the selected options.
    pub fn has_option(&self, option: &str) -> bool {
        self.selected_options()
            .is_some_and(|selected| selected.iter().any(|o| o == option))
    }
}
