//! Phase worklists and the sub-phase cursor.
//!
//! Every main phase runs a fixed, ordered list of steps. A step is either a
//! hook listener or a system step owned by the orchestrator. The list is
//! filtered once on phase entry by what is in play; each surviving step's
//! `is_active` predicate is checked when the cursor reaches it.

use std::fmt;

use serde::{Deserialize, Serialize};

use hollow_domain::{EventCard, ListenerIdentifier, MainPhase, MainRole, StatusEffect};

use crate::listeners::ListenerState;
use crate::session::GameSession;

/// Steps run by the orchestrator itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SystemStep {
    RoleAssignment,
    NightFalls,
    DrawEventCard,
    NightReport,
    VillageVote,
}

/// One entry of a phase worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Step {
    System(SystemStep),
    Listener(ListenerIdentifier),
}

impl Step {
    const fn role(role: MainRole) -> Self {
        Step::Listener(ListenerIdentifier::MainRole(role))
    }

    const fn effect(effect: StatusEffect) -> Self {
        Step::Listener(ListenerIdentifier::StatusEffect(effect))
    }

    const fn card(card: EventCard) -> Self {
        Step::Listener(ListenerIdentifier::EventCard(card))
    }

    pub fn listener(self) -> Option<ListenerIdentifier> {
        match self {
            Step::Listener(id) => Some(id),
            Step::System(_) => None,
        }
    }

    /// Whether this step belongs in a worklist built now.
    fn in_play(self, session: &GameSession) -> bool {
        let setup = session.setup();
        match self {
            Step::System(SystemStep::DrawEventCard) => !setup.rules().event_cards.is_empty(),
            Step::System(_) => true,
            Step::Listener(ListenerIdentifier::MainRole(MainRole::SimpleWerewolf)) => {
                setup.roles().iter().any(|role| role.is_werewolf())
            }
            Step::Listener(ListenerIdentifier::MainRole(MainRole::Cupid)) => {
                session.turn() == 1 && setup.has_role(MainRole::Cupid)
            }
            Step::Listener(ListenerIdentifier::MainRole(role)) => setup.has_role(role),
            Step::Listener(ListenerIdentifier::StatusEffect(StatusEffect::InLove)) => {
                session.turn() == 1 && setup.has_role(MainRole::Cupid)
            }
            Step::Listener(ListenerIdentifier::StatusEffect(StatusEffect::Charmed)) => {
                setup.has_role(MainRole::Piper)
            }
            Step::Listener(ListenerIdentifier::StatusEffect(StatusEffect::RustySwordWound)) => {
                setup.has_role(MainRole::KnightWithRustySword)
            }
            Step::Listener(ListenerIdentifier::StatusEffect(StatusEffect::Sheriff)) => {
                setup.rules().sheriff_election
            }
            Step::Listener(ListenerIdentifier::StatusEffect(_)) => false,
            Step::Listener(ListenerIdentifier::EventCard(card)) => setup.rules().uses_card(card),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::System(step) => write!(f, "system:{:?}", step),
            Step::Listener(id) => write!(f, "{}", id),
        }
    }
}

const SETUP_ORDER: &[Step] = &[Step::System(SystemStep::RoleAssignment)];

/// Night wake order
const NIGHT_ORDER: &[Step] = &[
    Step::System(SystemStep::NightFalls),
    Step::role(MainRole::Cupid),
    Step::effect(StatusEffect::InLove),
    Step::role(MainRole::Defender),
    Step::role(MainRole::Seer),
    Step::role(MainRole::LittleGirl),
    Step::role(MainRole::SimpleWerewolf),
    Step::role(MainRole::AccursedWolfFather),
    Step::role(MainRole::BigBadWolf),
    Step::role(MainRole::WhiteWerewolf),
    Step::role(MainRole::Witch),
    Step::role(MainRole::Piper),
    Step::effect(StatusEffect::Charmed),
    Step::effect(StatusEffect::RustySwordWound),
];

const DAWN_ORDER: &[Step] = &[
    Step::System(SystemStep::DrawEventCard),
    Step::card(EventCard::Burial),
    Step::System(SystemStep::NightReport),
    Step::role(MainRole::Hunter),
    Step::effect(StatusEffect::Sheriff),
];

const DAY_ORDER: &[Step] = &[
    Step::effect(StatusEffect::Sheriff),
    Step::card(EventCard::Nightmare),
    Step::System(SystemStep::VillageVote),
    Step::role(MainRole::Hunter),
    Step::effect(StatusEffect::Sheriff),
];

/// Worklist for `phase`, filtered by what is in play in `session`.
pub fn for_phase(phase: MainPhase, session: &GameSession) -> Vec<Step> {
    let order = match phase {
        MainPhase::Setup => SETUP_ORDER,
        MainPhase::Night => NIGHT_ORDER,
        MainPhase::Dawn => DAWN_ORDER,
        MainPhase::Day => DAY_ORDER,
        MainPhase::Finished => &[],
    };
    order
        .iter()
        .copied()
        .filter(|step| step.in_play(session))
        .collect()
}

/// Position within the current phase's worklist.
///
/// Saved with the session record so a game can resume mid-phase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPhaseCursor {
    worklist: Vec<Step>,
    position: usize,
    state: ListenerState,
}

impl SubPhaseCursor {
    pub fn new(worklist: Vec<Step>) -> Self {
        Self {
            worklist,
            position: 0,
            state: ListenerState::Asleep,
        }
    }

    pub fn current(&self) -> Option<Step> {
        self.worklist.get(self.position).copied()
    }

    /// The current step with its listener sub-state.
    pub fn active(&self) -> Option<(Step, ListenerState)> {
        self.current().map(|step| (step, self.state))
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn worklist(&self) -> &[Step] {
        &self.worklist
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the position lies within the worklist or just past its end.
    pub fn is_in_bounds(&self) -> bool {
        self.position <= self.worklist.len()
    }

    pub(crate) fn advance(&mut self) {
        if self.position < self.worklist.len() {
            self.position += 1;
        }
        self.state = ListenerState::Asleep;
    }

    pub(crate) fn set_state(&mut self, state: ListenerState) {
        self.state = state;
    }
}
