//! Player aggregate - seated identity plus mutable gameplay state
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: All fields are encapsulated
//! - **Identity vs. state**: `Player` never changes after setup; everything
//!   that changes during play lives in the linked `PlayerState`
//! - **Outcome enums**: mutations report what happened instead of silently
//!   ignoring no-ops

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::events::{EffectChange, EliminationReason};
use crate::ids::PlayerId;
use crate::value_objects::{Health, MainRole, PlayerName, StatusEffect, StatusEffects};

/// Vote weight of a regular player
const BASE_VOTE_WEIGHT: u8 = 1;

/// Vote weight while holding the sheriff title
const SHERIFF_VOTE_WEIGHT: u8 = 2;

// ============================================================================
// Player
// ============================================================================

/// A seated player.
///
/// # Example
///
/// ```
/// use hollow_domain::aggregates::Player;
/// use hollow_domain::value_objects::PlayerName;
///
/// let player = Player::new(PlayerName::new("Ana").unwrap());
/// assert_eq!(player.name().as_str(), "Ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    name: PlayerName,
}

impl Player {
    pub fn new(name: PlayerName) -> Self {
        Self {
            id: PlayerId::new(),
            name,
        }
    }

    /// Set the player's ID (used when restoring a saved table).
    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = id;
        self
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &PlayerName {
        &self.name
    }
}

// ============================================================================
// PlayerState
// ============================================================================

/// Mutable gameplay state of one player.
///
/// # Invariants
///
/// - `health` only moves from `Alive` to `Dead`
/// - `vote_weight` is 2 exactly while the player holds `Sheriff`, else 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    player_id: PlayerId,
    health: Health,
    role: Option<MainRole>,
    effects: StatusEffects,
    vote_weight: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elimination: Option<EliminationReason>,
}

impl PlayerState {
    /// State of a freshly seated player, before roles are dealt.
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            health: Health::Alive,
            role: None,
            effects: StatusEffects::empty(),
            vote_weight: BASE_VOTE_WEIGHT,
            elimination: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    #[inline]
    pub fn health(&self) -> Health {
        self.health
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    #[inline]
    pub fn role(&self) -> Option<MainRole> {
        self.role
    }

    /// Returns true if the player holds `role`.
    #[inline]
    pub fn has_role(&self, role: MainRole) -> bool {
        self.role == Some(role)
    }

    #[inline]
    pub fn effects(&self) -> StatusEffects {
        self.effects
    }

    #[inline]
    pub fn has_effect(&self, effect: StatusEffect) -> bool {
        self.effects.contains(effect)
    }

    #[inline]
    pub fn vote_weight(&self) -> u8 {
        self.vote_weight
    }

    /// Why the player died, if they did.
    #[inline]
    pub fn elimination(&self) -> Option<EliminationReason> {
        self.elimination
    }

    /// Werewolf side: a wolf role, or infected by the Accursed Wolf-Father.
    pub fn is_werewolf_side(&self) -> bool {
        self.role.is_some_and(MainRole::is_werewolf) || self.has_effect(StatusEffect::Infected)
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    /// Deal a role to the player.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if a role was already dealt.
    pub fn assign_role(&mut self, role: MainRole) -> Result<(), DomainError> {
        if let Some(existing) = self.role {
            return Err(DomainError::invalid_state_transition(format!(
                "player {} already holds {}",
                self.player_id, existing
            )));
        }
        self.role = Some(role);
        Ok(())
    }

    pub fn apply_effect(&mut self, effect: StatusEffect) -> EffectChange {
        let changed = self.effects.insert(effect);
        self.refresh_vote_weight();
        if changed {
            EffectChange::Applied
        } else {
            EffectChange::Unchanged
        }
    }

    pub fn remove_effect(&mut self, effect: StatusEffect) -> EffectChange {
        let changed = self.effects.remove(effect);
        self.refresh_vote_weight();
        if changed {
            EffectChange::Removed
        } else {
            EffectChange::Unchanged
        }
    }

    /// Kill the player.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if the player is already
    /// dead: every player is eliminated at most once per game.
    pub fn eliminate(&mut self, reason: EliminationReason) -> Result<(), DomainError> {
        if self.health.is_dead() {
            return Err(DomainError::invalid_state_transition(format!(
                "player {} eliminated twice ({:?})",
                self.player_id, reason
            )));
        }
        self.health = Health::Dead;
        self.elimination = Some(reason);
        Ok(())
    }

    fn refresh_vote_weight(&mut self) {
        self.vote_weight = if self.effects.contains(StatusEffect::Sheriff) {
            SHERIFF_VOTE_WEIGHT
        } else {
            BASE_VOTE_WEIGHT
        };
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> PlayerState {
        PlayerState::new(PlayerId::new())
    }

    mod constructor {
        use super::*;

        #[test]
        fn new_state_is_alive_without_role() {
            let state = fresh_state();
            assert!(state.is_alive());
            assert!(state.role().is_none());
            assert!(state.effects().is_empty());
            assert_eq!(state.vote_weight(), 1);
            assert!(state.elimination().is_none());
        }

        #[test]
        fn player_identity_is_stable() {
            let id = PlayerId::new();
            let player = Player::new(PlayerName::new("Ana").unwrap()).with_id(id);
            assert_eq!(player.id(), id);
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn role_is_dealt_once() {
            let mut state = fresh_state();
            state.assign_role(MainRole::Seer).unwrap();
            assert!(state.has_role(MainRole::Seer));
            assert!(state.assign_role(MainRole::Witch).is_err());
        }

        #[test]
        fn elimination_is_final() {
            let mut state = fresh_state();
            state.eliminate(EliminationReason::Vote).unwrap();
            assert!(!state.is_alive());
            assert_eq!(state.elimination(), Some(EliminationReason::Vote));

            let err = state.eliminate(EliminationReason::WitchPoison).unwrap_err();
            assert!(err.is_invariant_violation());
            assert_eq!(state.elimination(), Some(EliminationReason::Vote));
        }

        #[test]
        fn sheriff_title_doubles_vote() {
            let mut state = fresh_state();
            assert_eq!(state.apply_effect(StatusEffect::Sheriff), EffectChange::Applied);
            assert_eq!(state.vote_weight(), 2);
            assert_eq!(state.apply_effect(StatusEffect::Sheriff), EffectChange::Unchanged);
            assert_eq!(state.remove_effect(StatusEffect::Sheriff), EffectChange::Removed);
            assert_eq!(state.vote_weight(), 1);
        }

        #[test]
        fn infection_turns_player_to_wolf_side() {
            let mut state = fresh_state();
            state.assign_role(MainRole::Villager).unwrap();
            assert!(!state.is_werewolf_side());
            state.apply_effect(StatusEffect::Infected);
            assert!(state.is_werewolf_side());
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serialize_produces_camel_case() {
            let mut state = fresh_state();
            state.assign_role(MainRole::LittleGirl).unwrap();
            state.apply_effect(StatusEffect::Charmed);
            let json = serde_json::to_string(&state).unwrap();

            assert!(json.contains("playerId"));
            assert!(json.contains("voteWeight"));
            assert!(json.contains("\"littleGirl\""));
            assert!(json.contains("[\"charmed\"]"));
            assert!(!json.contains("elimination"));

            let back: PlayerState = serde_json::from_str(&json).unwrap();
            assert_eq!(back, state);
        }
    }
}
