//! The game log
//!
//! Every change to session state is recorded as a `GameLogEntry`. The log is
//! append-only and ordered; replaying it from an empty session reproduces
//! the current state. Entries are serialized with a `"type"` discriminator
//! so a loader can rebuild the exact variant.

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::value_objects::{EventCard, Faction, ListenerIdentifier, MainPhase, MainRole, StatusEffect};

use super::{EliminationReason, NightAction, NightActionType};

/// One immutable record in the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameLogEntry {
    RoleAssigned {
        player: PlayerId,
        role: MainRole,
    },
    NightActionPerformed {
        turn: u32,
        action: NightActionType,
        target: PlayerId,
        source: ListenerIdentifier,
    },
    StatusEffectApplied {
        player: PlayerId,
        effect: StatusEffect,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ListenerIdentifier>,
    },
    StatusEffectRemoved {
        player: PlayerId,
        effect: StatusEffect,
    },
    PlayerEliminated {
        player: PlayerId,
        reason: EliminationReason,
    },
    PhaseTransitioned {
        from: MainPhase,
        to: MainPhase,
        turn: u32,
    },
    VoteOutcomeReported {
        turn: u32,
        #[serde(default)]
        eliminated: Option<PlayerId>,
    },
    VictoryConditionMet {
        faction: Faction,
        winners: Vec<PlayerId>,
    },
    EventCardDrawn {
        turn: u32,
        card: EventCard,
    },
}

impl GameLogEntry {
    /// Convenience constructor for a night action produced by `source`.
    pub fn night_action(
        turn: u32,
        action: NightActionType,
        target: PlayerId,
        source: impl Into<ListenerIdentifier>,
    ) -> Self {
        Self::NightActionPerformed {
            turn,
            action,
            target,
            source: source.into(),
        }
    }

    pub fn effect_applied(
        player: PlayerId,
        effect: StatusEffect,
        source: Option<ListenerIdentifier>,
    ) -> Self {
        Self::StatusEffectApplied {
            player,
            effect,
            source,
        }
    }

    pub fn eliminated(player: PlayerId, reason: EliminationReason) -> Self {
        Self::PlayerEliminated { player, reason }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RoleAssigned { .. } => "role_assigned",
            Self::NightActionPerformed { .. } => "night_action_performed",
            Self::StatusEffectApplied { .. } => "status_effect_applied",
            Self::StatusEffectRemoved { .. } => "status_effect_removed",
            Self::PlayerEliminated { .. } => "player_eliminated",
            Self::PhaseTransitioned { .. } => "phase_transitioned",
            Self::VoteOutcomeReported { .. } => "vote_outcome_reported",
            Self::VictoryConditionMet { .. } => "victory_condition_met",
            Self::EventCardDrawn { .. } => "event_card_drawn",
        }
    }

    /// The single player this entry is about, if any.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::RoleAssigned { player, .. } => Some(*player),
            Self::NightActionPerformed { target, .. } => Some(*target),
            Self::StatusEffectApplied { player, .. } => Some(*player),
            Self::StatusEffectRemoved { player, .. } => Some(*player),
            Self::PlayerEliminated { player, .. } => Some(*player),
            Self::VoteOutcomeReported { eliminated, .. } => *eliminated,
            Self::PhaseTransitioned { .. }
            | Self::VictoryConditionMet { .. }
            | Self::EventCardDrawn { .. } => None,
        }
    }

    /// The night action carried by this entry, if it was logged on `turn`.
    pub fn night_action_on(&self, turn: u32) -> Option<NightAction> {
        match self {
            Self::NightActionPerformed {
                turn: logged,
                action,
                target,
                source,
            } if *logged == turn => Some(NightAction {
                action: *action,
                target: *target,
                source: *source,
            }),
            _ => None,
        }
    }

    pub fn is_elimination(&self) -> bool {
        matches!(self, Self::PlayerEliminated { .. })
    }
}
