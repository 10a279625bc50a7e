//! Night action and elimination vocabulary
//!
//! Night actions are intents logged while the village sleeps. Nothing
//! happens to the target until the resolver runs at dawn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::PlayerId;
use crate::value_objects::ListenerIdentifier;

/// Kind of a logged night action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NightActionType {
    /// The pack's nightly victim
    WerewolfVictimSelection,
    BigBadWolfVictimSelection,
    WhiteWerewolfVictimSelection,
    AccursedWolfFatherInfection,
    DefenderProtect,
    WitchSave,
    WitchKill,
    /// A wolf wounded by the Knight's rusty sword dies
    DelayedSword,
    SeerReveal,
    CupidLink,
    PiperCharm,
}

impl NightActionType {
    /// Plain wolf attacks: blocked by protection, beaten by infection.
    pub fn is_wolf_attack(self) -> bool {
        matches!(
            self,
            NightActionType::WerewolfVictimSelection
                | NightActionType::BigBadWolfVictimSelection
                | NightActionType::WhiteWerewolfVictimSelection
        )
    }

    /// Any action originating from the wolves, infection included.
    pub fn is_wolf_origin(self) -> bool {
        self.is_wolf_attack() || self == NightActionType::AccursedWolfFatherInfection
    }

    /// Actions whose elimination ignores every form of protection.
    pub fn is_unstoppable(self) -> bool {
        matches!(self, NightActionType::WitchKill | NightActionType::DelayedSword)
    }
}

/// Why a player left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EliminationReason {
    WerewolfAttack,
    WitchPoison,
    RustySword,
    Vote,
    HunterShot,
    /// Died of grief after their lover's death
    Heartbreak,
}

impl fmt::Display for EliminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EliminationReason::WerewolfAttack => "devoured by the werewolves",
            EliminationReason::WitchPoison => "poisoned by the witch",
            EliminationReason::RustySword => "killed by the rusty sword's infection",
            EliminationReason::Vote => "eliminated by the village",
            EliminationReason::HunterShot => "shot by the hunter",
            EliminationReason::Heartbreak => "died of heartbreak",
        };
        write!(f, "{}", label)
    }
}

/// One logged night action, as seen by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightAction {
    pub action: NightActionType,
    pub target: PlayerId,
    pub source: ListenerIdentifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infection_is_wolf_origin_but_not_an_attack() {
        let infection = NightActionType::AccursedWolfFatherInfection;
        assert!(infection.is_wolf_origin());
        assert!(!infection.is_wolf_attack());
        assert!(!infection.is_unstoppable());
    }

    #[test]
    fn unstoppable_actions() {
        assert!(NightActionType::WitchKill.is_unstoppable());
        assert!(NightActionType::DelayedSword.is_unstoppable());
        assert!(!NightActionType::WerewolfVictimSelection.is_unstoppable());
        assert!(!NightActionType::WitchKill.is_wolf_origin());
    }
}
