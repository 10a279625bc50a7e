//! Hook listeners
//!
//! A hook listener is a small state machine for one role, status effect or
//! event card: wake someone up, ask for a choice, log the intent, put them
//! back to sleep. Listeners never mutate the session; they return log
//! entries and the orchestrator applies them.
//!
//! Each listener is a plain record of function pointers, registered in a
//! [`ListenerRegistry`] under its [`ListenerIdentifier`].
//!
//! # Sub-states
//!
//! ```text
//! Asleep -> AwaitingAwakeConfirmation -> AwaitingTargetSelection
//!        -> (AwaitingModeratorFeedback) -> AwaitingSleepConfirmation -> Asleep
//! ```

use serde::{Deserialize, Serialize};

use hollow_domain::{GameLogEntry, ListenerIdentifier, MainPhase, NightActionType, PlayerId};
use hollow_shared::{ContractError, ModeratorInstruction, ModeratorResponse};

use crate::config::RulesConfig;
use crate::error::RuleViolation;
use crate::session::GameSession;

pub mod registry;
pub mod standard;

mod accursed_wolf_father;
mod big_bad_wolf;
mod burial;
mod charmed;
mod cupid;
mod defender;
mod hunter;
mod little_girl;
mod lovers;
mod nightmare;
mod piper;
mod rusty_sword;
mod seer;
mod sheriff;
mod werewolves;
mod white_werewolf;
mod witch;

pub use registry::ListenerRegistry;

// =============================================================================
// Listener State
// =============================================================================

/// Internal sub-state of the active listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ListenerState {
    #[default]
    Asleep,
    AwaitingAwakeConfirmation,
    AwaitingTargetSelection,
    AwaitingModeratorFeedback,
    AwaitingSleepConfirmation,
    /// Witch: deciding on the healing potion
    AwaitingSaveDecision,
    /// Witch: deciding on the death potion
    AwaitingKillSelection,
    /// Sheriff: the dying sheriff names a successor
    AwaitingSuccessorSelection,
}

// =============================================================================
// Listener Outcome
// =============================================================================

/// Result of one `advance` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    /// Stay active and wait for the moderator.
    NeedInput {
        instruction: ModeratorInstruction,
        next: ListenerState,
        entries: Vec<GameLogEntry>,
    },
    /// Nothing more to do this cycle.
    Complete {
        next: ListenerState,
        entries: Vec<GameLogEntry>,
    },
    /// The response breaks a game rule; nothing is applied.
    Error(RuleViolation),
}

impl ListenerOutcome {
    pub fn need_with(
        instruction: ModeratorInstruction,
        next: ListenerState,
        entries: Vec<GameLogEntry>,
    ) -> Self {
        Self::NeedInput {
            instruction,
            next,
            entries,
        }
    }

    /// Wrap a fallible instruction; a construction failure becomes a rule error.
    pub fn need_checked(
        instruction: Result<ModeratorInstruction, ContractError>,
        next: ListenerState,
        entries: Vec<GameLogEntry>,
    ) -> Self {
        match instruction {
            Ok(instruction) => Self::need_with(instruction, next, entries),
            Err(e) => Self::Error(RuleViolation::no_eligible_choice(e)),
        }
    }

    pub fn complete() -> Self {
        Self::complete_with(Vec::new())
    }

    pub fn complete_with(entries: Vec<GameLogEntry>) -> Self {
        Self::Complete {
            next: ListenerState::Asleep,
            entries,
        }
    }

    pub fn unexpected(listener: ListenerIdentifier) -> Self {
        Self::Error(RuleViolation::unexpected_response(listener))
    }
}

// =============================================================================
// Listener Context
// =============================================================================

/// Read-only view of the session handed to listeners.
#[derive(Debug, Clone, Copy)]
pub struct ListenerContext<'a> {
    session: &'a GameSession,
}

impl<'a> ListenerContext<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &'a GameSession {
        self.session
    }

    pub fn rules(&self) -> &'a RulesConfig {
        self.session.rules()
    }

    pub fn phase(&self) -> MainPhase {
        self.session.phase()
    }

    pub fn turn(&self) -> u32 {
        self.session.turn()
    }

    pub fn living(&self) -> Vec<PlayerId> {
        self.session.living_ids()
    }

    /// Living players except `player`.
    pub fn living_except(&self, player: PlayerId) -> Vec<PlayerId> {
        self.session
            .living()
            .map(|state| state.player_id())
            .filter(|id| *id != player)
            .collect()
    }

    pub fn tonight(&self, action: NightActionType) -> Vec<PlayerId> {
        self.session.tonight(action)
    }

    /// Targets of tonight's plain wolf attacks, without repeats.
    pub fn tonight_wolf_victims(&self) -> Vec<PlayerId> {
        let mut victims = Vec::new();
        for action in self.session.night_actions(self.turn()) {
            if action.action.is_wolf_attack() && !victims.contains(&action.target) {
                victims.push(action.target);
            }
        }
        victims
    }

    pub fn name(&self, player: PlayerId) -> String {
        self.session.name_of(player)
    }

    /// Names joined for an announcement: "Ana, Ben and Cleo".
    pub fn names(&self, players: &[PlayerId]) -> String {
        let names: Vec<String> = players.iter().map(|p| self.name(*p)).collect();
        match names.split_last() {
            None => "nobody".to_string(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }
}

// =============================================================================
// Hook Listener
// =============================================================================

pub type ActivePredicate = fn(&ListenerContext<'_>) -> bool;
pub type AdvanceFn =
    fn(&ListenerContext<'_>, ListenerState, Option<&ModeratorResponse>) -> ListenerOutcome;

/// A listener record: identity plus behavior.
#[derive(Clone, Copy)]
pub struct HookListener {
    pub id: ListenerIdentifier,
    pub is_active: ActivePredicate,
    pub advance: AdvanceFn,
}

impl std::fmt::Debug for HookListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookListener").field("id", &self.id).finish()
    }
}

/// Every listener the engine ships with.
pub(crate) fn builtin() -> Vec<HookListener> {
    vec![
        cupid::LISTENER,
        lovers::LISTENER,
        defender::LISTENER,
        seer::LISTENER,
        little_girl::LISTENER,
        werewolves::LISTENER,
        accursed_wolf_father::LISTENER,
        big_bad_wolf::LISTENER,
        white_werewolf::LISTENER,
        witch::LISTENER,
        piper::LISTENER,
        charmed::LISTENER,
        rusty_sword::LISTENER,
        hunter::LISTENER,
        sheriff::LISTENER,
        burial::LISTENER,
        nightmare::LISTENER,
    ]
}
