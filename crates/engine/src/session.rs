//! Game session aggregate root.
//!
//! # Event sourcing
//!
//! Game state (player states, phase, turn, winner) changes only through
//! [`GameSession::apply`], which validates a [`GameLogEntry`], mutates the
//! state and appends the entry to the log. Replaying a log against a fresh
//! session built from the same setup reproduces the same state.
//!
//! Cursor and pending-instruction bookkeeping belongs to the orchestrator and
//! is changed through narrow crate-private setters that notify observers.

use std::fmt;

use serde::{Deserialize, Serialize};

use hollow_domain::{
    resolve_night, DomainError, EventCard, Faction, GameLogEntry, ListenerIdentifier, MainPhase,
    MainRole, NightAction, NightActionType, NightResolution, Player, PlayerId, PlayerState,
    StatusEffect,
};
use hollow_shared::ModeratorInstruction;

use crate::config::RulesConfig;
use crate::listeners::ListenerState;
use crate::observer::SessionObserver;
use crate::setup::GameSetup;
use crate::worklist::{Step, SubPhaseCursor};

/// Setup plus log: everything needed to rebuild a session.
///
/// A record saved from a running game also carries the cursor and the
/// pending instruction, which [`GameEngine::resume`](crate::GameEngine::resume)
/// needs to pick up mid-phase. Replaying uses the log alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub setup: GameSetup,
    pub log: Vec<GameLogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<SubPhaseCursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<ModeratorInstruction>,
}

pub struct GameSession {
    setup: GameSetup,
    states: Vec<PlayerState>,
    phase: MainPhase,
    turn: u32,
    winner: Option<Faction>,
    cursor: SubPhaseCursor,
    pending: Option<ModeratorInstruction>,
    log: Vec<GameLogEntry>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("winner", &self.winner)
            .field("cursor", &self.cursor)
            .field("pending", &self.pending.as_ref().map(|i| i.kind()))
            .field("log_len", &self.log.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GameSession {
    /// A session at `Setup`, no roles dealt.
    pub fn new(setup: GameSetup) -> Result<Self, DomainError> {
        setup.validate()?;
        let states = setup
            .players()
            .iter()
            .map(|player| PlayerState::new(player.id()))
            .collect();
        Ok(Self {
            setup,
            states,
            phase: MainPhase::Setup,
            turn: 0,
            winner: None,
            cursor: SubPhaseCursor::default(),
            pending: None,
            log: Vec::new(),
            observers: Vec::new(),
        })
    }

    /// Rebuild a session by applying `entries` to a fresh session.
    pub fn replay(setup: GameSetup, entries: &[GameLogEntry]) -> Result<Self, DomainError> {
        let mut session = Self::new(setup)?;
        for entry in entries {
            session.apply(entry.clone())?;
        }
        Ok(session)
    }

    pub fn from_record(record: &SessionRecord) -> Result<Self, DomainError> {
        Self::replay(record.setup.clone(), &record.log)
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            setup: self.setup.clone(),
            log: self.log.clone(),
            cursor: (!self.is_finished()).then(|| self.cursor.clone()),
            pending: self.pending.clone(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    // =========================================================================
    // Apply
    // =========================================================================

    /// Apply one log entry. The entry is validated before anything changes.
    ///
    /// # Errors
    ///
    /// Any error is an invariant violation: the entry does not fit the
    /// current state (unknown player, double elimination, illegal phase
    /// transition, night action outside the night).
    pub fn apply(&mut self, entry: GameLogEntry) -> Result<(), DomainError> {
        match &entry {
            GameLogEntry::RoleAssigned { player, role } => {
                self.require_phase(MainPhase::Setup, "role assignment")?;
                self.state_mut(*player)?.assign_role(*role)?;
            }
            GameLogEntry::NightActionPerformed { turn, target, .. } => {
                self.require_phase(MainPhase::Night, "night action")?;
                self.require_turn(*turn)?;
                self.state(*target)
                    .ok_or_else(|| DomainError::not_found("Player", target.to_string()))?;
            }
            GameLogEntry::StatusEffectApplied { player, effect, .. } => {
                self.state_mut(*player)?.apply_effect(*effect);
            }
            GameLogEntry::StatusEffectRemoved { player, effect } => {
                self.state_mut(*player)?.remove_effect(*effect);
            }
            GameLogEntry::PlayerEliminated { player, reason } => {
                self.state_mut(*player)?.eliminate(*reason)?;
            }
            GameLogEntry::PhaseTransitioned { from, to, turn } => {
                self.transition(*from, *to, *turn)?;
            }
            GameLogEntry::VoteOutcomeReported { turn, eliminated } => {
                self.require_phase(MainPhase::Day, "vote outcome")?;
                self.require_turn(*turn)?;
                if let Some(player) = eliminated {
                    self.state(*player)
                        .ok_or_else(|| DomainError::not_found("Player", player.to_string()))?;
                }
            }
            GameLogEntry::VictoryConditionMet { faction, .. } => {
                if let Some(existing) = self.winner {
                    return Err(DomainError::invalid_state_transition(format!(
                        "victory already declared for {}",
                        existing
                    )));
                }
                self.winner = Some(*faction);
            }
            GameLogEntry::EventCardDrawn { turn, card } => {
                self.require_phase(MainPhase::Dawn, "event card draw")?;
                self.require_turn(*turn)?;
                if self.drawn_cards().any(|drawn| drawn == *card) {
                    return Err(DomainError::constraint(format!("{} was already drawn", card)));
                }
            }
        }

        for observer in &self.observers {
            observer.on_log_entry_applied(&entry);
        }
        self.log.push(entry);
        Ok(())
    }

    fn transition(&mut self, from: MainPhase, to: MainPhase, turn: u32) -> Result<(), DomainError> {
        if from != self.phase || !from.can_transition_to(to) {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot move from {} to {} (current phase {})",
                from, to, self.phase
            )));
        }
        let expected_turn = if to == MainPhase::Night {
            self.turn + 1
        } else {
            self.turn
        };
        if turn != expected_turn {
            return Err(DomainError::invalid_state_transition(format!(
                "transition to {} on turn {}, expected turn {}",
                to, turn, expected_turn
            )));
        }

        self.phase = to;
        for observer in &self.observers {
            observer.on_main_phase_changed(from, to);
        }
        if turn != self.turn {
            self.turn = turn;
            for observer in &self.observers {
                observer.on_turn_changed(turn);
            }
        }
        Ok(())
    }

    fn require_phase(&self, phase: MainPhase, what: &str) -> Result<(), DomainError> {
        if self.phase != phase {
            return Err(DomainError::invalid_state_transition(format!(
                "{} during {}",
                what, self.phase
            )));
        }
        Ok(())
    }

    fn require_turn(&self, turn: u32) -> Result<(), DomainError> {
        if turn != self.turn {
            return Err(DomainError::constraint(format!(
                "entry for turn {} during turn {}",
                turn, self.turn
            )));
        }
        Ok(())
    }

    fn state_mut(&mut self, player: PlayerId) -> Result<&mut PlayerState, DomainError> {
        self.states
            .iter_mut()
            .find(|state| state.player_id() == player)
            .ok_or_else(|| DomainError::not_found("Player", player.to_string()))
    }

    // =========================================================================
    // Night resolution
    // =========================================================================

    /// Resolve the night that just ended.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidStateTransition` outside of `Dawn`.
    pub fn resolve_current_night(&self) -> Result<NightResolution, DomainError> {
        if self.phase != MainPhase::Dawn {
            return Err(DomainError::invalid_state_transition(format!(
                "night resolution requested during {}",
                self.phase
            )));
        }
        resolve_night(
            &self.states,
            &self.night_actions(self.turn),
            self.rules().resolution_rules(),
        )
    }

    // =========================================================================
    // Orchestrator bookkeeping
    // =========================================================================

    pub(crate) fn set_worklist(&mut self, worklist: Vec<Step>) {
        self.cursor = SubPhaseCursor::new(worklist);
        self.notify_cursor();
    }

    pub(crate) fn advance_cursor(&mut self) {
        self.cursor.advance();
        self.notify_cursor();
    }

    pub(crate) fn set_step_state(&mut self, state: ListenerState) {
        if self.cursor.state() == state {
            return;
        }
        self.cursor.set_state(state);
        let listener = self.cursor.current().and_then(Step::listener);
        for observer in &self.observers {
            observer.on_active_listener_changed(listener, state);
        }
    }

    pub(crate) fn set_pending(&mut self, instruction: Option<ModeratorInstruction>) {
        match &instruction {
            Some(issued) => {
                for observer in &self.observers {
                    observer.on_instruction_issued(issued);
                }
            }
            None if self.pending.is_some() => {
                for observer in &self.observers {
                    observer.on_instruction_cleared();
                }
            }
            None => {}
        }
        self.pending = instruction;
    }

    /// Put back a saved cursor and pending instruction.
    pub(crate) fn restore(
        &mut self,
        cursor: SubPhaseCursor,
        pending: Option<ModeratorInstruction>,
    ) {
        self.cursor = cursor;
        self.notify_cursor();
        self.set_pending(pending);
    }

    fn notify_cursor(&self) {
        let step = self.cursor.current();
        let listener = step.and_then(Step::listener);
        for observer in &self.observers {
            observer.on_sub_phase_changed(step);
            observer.on_active_listener_changed(listener, self.cursor.state());
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn rules(&self) -> &RulesConfig {
        self.setup.rules()
    }

    /// Seated players, in seating order.
    pub fn players(&self) -> &[Player] {
        self.setup.players()
    }

    /// Player states, in seating order.
    pub fn states(&self) -> &[PlayerState] {
        &self.states
    }

    pub fn state(&self, player: PlayerId) -> Option<&PlayerState> {
        self.states.iter().find(|state| state.player_id() == player)
    }

    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.players().iter().find(|p| p.id() == player)
    }

    /// Display name of `player`, falling back to the id.
    pub fn name_of(&self, player: PlayerId) -> String {
        self.player(player)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| player.to_string())
    }

    pub fn living(&self) -> impl Iterator<Item = &PlayerState> + '_ {
        self.states.iter().filter(|state| state.is_alive())
    }

    pub fn living_ids(&self) -> Vec<PlayerId> {
        self.living().map(PlayerState::player_id).collect()
    }

    /// First living player holding `role`, in seating order.
    pub fn living_holder(&self, role: MainRole) -> Option<&PlayerState> {
        self.living().find(|state| state.has_role(role))
    }

    pub fn with_effect(&self, effect: StatusEffect) -> impl Iterator<Item = &PlayerState> + '_ {
        self.states.iter().filter(move |state| state.has_effect(effect))
    }

    pub fn phase(&self) -> MainPhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn winner(&self) -> Option<Faction> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MainPhase::Finished
    }

    pub fn cursor(&self) -> &SubPhaseCursor {
        &self.cursor
    }

    /// Identifier and sub-state of the active listener, if a listener step
    /// is current.
    pub fn active_listener(&self) -> Option<(ListenerIdentifier, ListenerState)> {
        self.cursor
            .active()
            .and_then(|(step, state)| step.listener().map(|id| (id, state)))
    }

    pub fn pending(&self) -> Option<&ModeratorInstruction> {
        self.pending.as_ref()
    }

    pub fn log(&self) -> &[GameLogEntry] {
        &self.log
    }

    /// Night actions logged on `turn`, in log order.
    pub fn night_actions(&self, turn: u32) -> Vec<NightAction> {
        self.log
            .iter()
            .filter_map(|entry| entry.night_action_on(turn))
            .collect()
    }

    /// Targets of `action` logged tonight.
    pub fn tonight(&self, action: NightActionType) -> Vec<PlayerId> {
        self.night_actions(self.turn)
            .into_iter()
            .filter(|logged| logged.action == action)
            .map(|logged| logged.target)
            .collect()
    }

    /// Entries applied since the last phase transition.
    pub fn current_phase_entries(&self) -> &[GameLogEntry] {
        let start = self
            .log
            .iter()
            .rposition(|entry| matches!(entry, GameLogEntry::PhaseTransitioned { .. }))
            .map_or(0, |index| index + 1);
        &self.log[start..]
    }

    pub fn drawn_cards(&self) -> impl Iterator<Item = EventCard> + '_ {
        self.log.iter().filter_map(|entry| match entry {
            GameLogEntry::EventCardDrawn { card, .. } => Some(*card),
            _ => None,
        })
    }

    /// Event card drawn this turn, if any.
    pub fn event_card(&self) -> Option<EventCard> {
        self.log.iter().find_map(|entry| match entry {
            GameLogEntry::EventCardDrawn { turn, card } if *turn == self.turn => Some(*card),
            _ => None,
        })
    }

    /// Whether the sheriff title was ever handed out.
    pub fn sheriff_ever_elected(&self) -> bool {
        self.log.iter().any(|entry| {
            matches!(
                entry,
                GameLogEntry::StatusEffectApplied {
                    effect: StatusEffect::Sheriff,
                    ..
                }
            )
        })
    }
}
