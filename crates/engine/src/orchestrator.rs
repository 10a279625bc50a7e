//! Session orchestrator
//!
//! [`GameEngine`] walks the phase worklists, asks each step for its next
//! instruction and applies what comes back. The moderator only ever sees
//! one pending instruction at a time.
//!
//! # Flow
//!
//! ```text
//! submit(response)
//!   -> validate against the pending instruction   (ContractError, no mutation)
//!   -> advance the active step                     (RuleViolation, no mutation)
//!   -> apply entries, heartbreak, victory check
//!   -> drive: skip inactive steps, advance until an instruction is pending
//!      or the game is finished; an exhausted worklist enters the next phase
//! ```
//!
//! Night to dawn runs the resolver before anything else happens at dawn.
//! An invariant violation while applying poisons the engine: state may be
//! half applied and every later call fails with [`EngineError::Poisoned`].

use tracing::{debug, error, info, instrument};

use hollow_domain::{DomainError, GameLogEntry, MainPhase, StatusEffect};
use hollow_shared::{ModeratorInstruction, ModeratorResponse, ResponseInput};

use crate::aftermath;
use crate::error::EngineError;
use crate::listeners::{ListenerContext, ListenerOutcome, ListenerRegistry, ListenerState};
use crate::observer::SessionObserver;
use crate::session::{GameSession, SessionRecord};
use crate::setup::GameSetup;
use crate::system_steps;
use crate::victory::{self, Victory};
use crate::worklist::{self, Step, SubPhaseCursor};

/// Drives one game session from role assignment to victory.
#[derive(Debug)]
pub struct GameEngine {
    session: GameSession,
    registry: ListenerRegistry,
    poisoned: bool,
}

impl GameEngine {
    /// Start a session with the standard listeners.
    ///
    /// # Errors
    ///
    /// `EngineError::Setup` if the setup is invalid.
    pub fn new(setup: GameSetup) -> Result<Self, EngineError> {
        Self::with_registry(setup, ListenerRegistry::standard(), Vec::new())
    }

    pub fn with_observers(
        setup: GameSetup,
        observers: Vec<Box<dyn SessionObserver>>,
    ) -> Result<Self, EngineError> {
        Self::with_registry(setup, ListenerRegistry::standard(), observers)
    }

    /// Start a session with a custom listener registry.
    pub fn with_registry(
        setup: GameSetup,
        registry: ListenerRegistry,
        observers: Vec<Box<dyn SessionObserver>>,
    ) -> Result<Self, EngineError> {
        let mut session = GameSession::new(setup).map_err(EngineError::Setup)?;
        for observer in observers {
            session.add_observer(observer);
        }
        info!(
            players = session.players().len(),
            listeners = registry.len(),
            "Starting game session"
        );

        let mut engine = Self {
            session,
            registry,
            poisoned: false,
        };
        let worklist = worklist::for_phase(MainPhase::Setup, &engine.session);
        engine.session.set_worklist(worklist);
        engine.guarded(Self::drive)?;
        Ok(engine)
    }

    /// Pick a saved session back up where it stopped.
    ///
    /// The log is replayed, then the saved cursor and pending instruction put
    /// the engine back on the same step. A record saved between steps is
    /// driven forward to its next instruction. Observers only see what
    /// happens after the replay.
    ///
    /// # Errors
    ///
    /// `EngineError::Setup` if the log does not replay, or if a running game
    /// was saved without a usable cursor.
    pub fn resume(
        record: SessionRecord,
        registry: ListenerRegistry,
        observers: Vec<Box<dyn SessionObserver>>,
    ) -> Result<Self, EngineError> {
        let SessionRecord {
            setup,
            log,
            cursor,
            pending,
        } = record;
        let mut session = GameSession::replay(setup, &log).map_err(EngineError::Setup)?;
        for observer in observers {
            session.add_observer(observer);
        }
        info!(
            entries = log.len(),
            phase = %session.phase(),
            turn = session.turn(),
            "Resuming game session"
        );

        let mut engine = Self {
            session,
            registry,
            poisoned: false,
        };
        if engine.session.is_finished() {
            return Ok(engine);
        }

        let cursor = match cursor {
            Some(cursor) => cursor,
            None if log.is_empty() => {
                SubPhaseCursor::new(worklist::for_phase(MainPhase::Setup, &engine.session))
            }
            None => return Err(unresumable("the record has no cursor")),
        };
        if !cursor.is_in_bounds() {
            return Err(unresumable("the cursor lies past its worklist"));
        }
        if pending.is_some() && cursor.current().is_none() {
            return Err(unresumable("an instruction was saved without a step to answer it"));
        }
        if pending.is_none() && cursor.state() != ListenerState::Asleep {
            return Err(unresumable(format!(
                "{} awaits an answer but no instruction was saved",
                cursor
                    .current()
                    .map_or_else(|| "a finished step".to_string(), |step| step.to_string())
            )));
        }
        engine.session.restore(cursor, pending);
        engine.guarded(Self::drive)?;
        Ok(engine)
    }

    // =========================================================================
    // Boundary
    // =========================================================================

    /// The instruction the moderator has to answer next.
    pub fn pending_instruction(&self) -> Option<&ModeratorInstruction> {
        self.session.pending()
    }

    /// Answer the pending instruction.
    ///
    /// Returns the next pending instruction, or `None` once the game is
    /// finished.
    ///
    /// # Errors
    ///
    /// - `Contract`: the response does not fit the instruction
    /// - `Rule`: the response breaks a game rule; answer `reissued` instead
    /// - `SessionFinished`, `Poisoned`: nothing can be submitted anymore
    ///
    /// Only `Invariant` leaves the session changed, and it poisons the engine.
    #[instrument(skip(self, input), fields(kind = %input.kind(), phase = %self.session.phase()))]
    pub fn submit(
        &mut self,
        input: ResponseInput,
    ) -> Result<Option<&ModeratorInstruction>, EngineError> {
        if self.poisoned {
            return Err(EngineError::Poisoned);
        }
        if self.session.is_finished() {
            return Err(EngineError::SessionFinished);
        }
        let Some(pending) = self.session.pending().cloned() else {
            return Err(self.poison(invariant("no pending instruction while the game runs")));
        };

        let response = pending.validate_response(input)?;
        let outcome = match self.advance_active(Some(&response)) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.poison(e)),
        };
        if let ListenerOutcome::Error(violation) = outcome {
            info!(
                code = ?violation.code,
                context = ?violation.context,
                "Rule violation, re-issuing instruction"
            );
            return Err(EngineError::Rule {
                violation,
                reissued: Box::new(pending),
            });
        }

        self.guarded(|engine| {
            engine.session.set_pending(None);
            engine.settle(outcome)?;
            engine.drive()
        })?;
        Ok(self.session.pending())
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.session.add_observer(observer);
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    // =========================================================================
    // Driving
    // =========================================================================

    /// Advance until an instruction is pending or the game is over.
    fn drive(&mut self) -> Result<(), EngineError> {
        loop {
            if self.session.is_finished() || self.session.pending().is_some() {
                return Ok(());
            }
            let Some(step) = self.session.cursor().current() else {
                self.enter_next_phase()?;
                continue;
            };
            if !self.is_step_active(step) {
                debug!(%step, "Skipping inactive step");
                self.session.advance_cursor();
                continue;
            }
            let outcome = self.advance_active(None)?;
            self.settle(outcome)?;
        }
    }

    fn is_step_active(&self, step: Step) -> bool {
        let ctx = ListenerContext::new(&self.session);
        match step {
            Step::System(system) => system_steps::is_active(system, &ctx),
            Step::Listener(id) => self
                .registry
                .get(&id)
                .is_some_and(|listener| (listener.is_active)(&ctx)),
        }
    }

    fn advance_active(
        &self,
        response: Option<&ModeratorResponse>,
    ) -> Result<ListenerOutcome, EngineError> {
        let Some((step, state)) = self.session.cursor().active() else {
            return Err(invariant("no active step"));
        };
        let ctx = ListenerContext::new(&self.session);
        match step {
            Step::System(system) => Ok(system_steps::advance(system, &ctx, state, response)),
            Step::Listener(id) => {
                let listener = self
                    .registry
                    .get(&id)
                    .ok_or_else(|| invariant(format!("no listener registered for {}", id)))?;
                Ok((listener.advance)(&ctx, state, response))
            }
        }
    }

    /// Apply an accepted outcome and move the cursor.
    fn settle(&mut self, outcome: ListenerOutcome) -> Result<(), EngineError> {
        match outcome {
            ListenerOutcome::NeedInput {
                instruction,
                next,
                entries,
            } => {
                self.apply_batch(entries)?;
                if !self.session.is_finished() {
                    self.session.set_step_state(next);
                    self.session.set_pending(Some(instruction));
                }
            }
            ListenerOutcome::Complete { entries, .. } => {
                self.apply_batch(entries)?;
                if !self.session.is_finished() {
                    self.session.advance_cursor();
                }
            }
            ListenerOutcome::Error(violation) => {
                return Err(invariant(format!(
                    "step failed without a response: {} ({:?})",
                    violation, violation.context
                )));
            }
        }
        Ok(())
    }

    fn enter_next_phase(&mut self) -> Result<(), EngineError> {
        let from = self.session.phase();
        let to = from
            .next()
            .ok_or_else(|| invariant(format!("no phase after {}", from)))?;
        let turn = if to == MainPhase::Night {
            self.session.turn() + 1
        } else {
            self.session.turn()
        };
        info!(%from, %to, turn, "Entering phase");
        self.apply(GameLogEntry::PhaseTransitioned { from, to, turn })?;

        if to == MainPhase::Dawn {
            let resolution = self
                .session
                .resolve_current_night()
                .map_err(EngineError::Invariant)?;
            debug!(
                entries = resolution.entries().len(),
                eliminations = resolution.eliminations().count(),
                "Night resolved"
            );
            for entry in resolution.into_entries() {
                self.apply(entry)?;
            }
            self.aftermath()?;
            if self.session.is_finished() {
                return Ok(());
            }
        }

        let worklist = worklist::for_phase(to, &self.session);
        self.session.set_worklist(worklist);
        Ok(())
    }

    // =========================================================================
    // Applying
    // =========================================================================

    fn apply(&mut self, entry: GameLogEntry) -> Result<(), EngineError> {
        self.session.apply(entry).map_err(EngineError::Invariant)
    }

    fn apply_batch(&mut self, entries: Vec<GameLogEntry>) -> Result<(), EngineError> {
        let decisive = entries
            .iter()
            .any(|entry| entry.is_elimination() || is_hunter_shot(entry));
        for entry in entries {
            self.apply(entry)?;
        }
        if decisive {
            self.aftermath()?;
        }
        Ok(())
    }

    /// Heartbreak cascade, then the victory check.
    ///
    /// The check waits while a fallen Hunter still has a shot to fire.
    fn aftermath(&mut self) -> Result<(), EngineError> {
        loop {
            let grief = aftermath::heartbreak(&self.session);
            if grief.is_empty() {
                break;
            }
            for entry in grief {
                self.apply(entry)?;
            }
        }
        if aftermath::shot_owed(&self.session) {
            debug!("Victory check held for the Hunter");
            return Ok(());
        }
        if let Some(victory) = victory::check(self.session.states()) {
            self.declare(victory)?;
        }
        Ok(())
    }

    fn declare(&mut self, victory: Victory) -> Result<(), EngineError> {
        info!(
            faction = %victory.faction,
            winners = victory.winners.len(),
            turn = self.session.turn(),
            "Victory"
        );
        let from = self.session.phase();
        let turn = self.session.turn();
        self.apply(victory.into_entry())?;
        self.apply(GameLogEntry::PhaseTransitioned {
            from,
            to: MainPhase::Finished,
            turn,
        })?;
        self.session.set_worklist(Vec::new());
        self.session.set_pending(None);
        Ok(())
    }

    // =========================================================================
    // Poisoning
    // =========================================================================

    fn guarded(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        let result = f(self);
        result.map_err(|e| self.poison(e))
    }

    fn poison(&mut self, error: EngineError) -> EngineError {
        if matches!(error, EngineError::Invariant(_)) {
            error!(error = %error, "Invariant violated, engine poisoned");
            self.poisoned = true;
        }
        error
    }
}

fn is_hunter_shot(entry: &GameLogEntry) -> bool {
    matches!(
        entry,
        GameLogEntry::StatusEffectApplied {
            effect: StatusEffect::HunterShotSpent,
            ..
        }
    )
}

fn unresumable(message: impl Into<String>) -> EngineError {
    EngineError::Setup(DomainError::validation(format!(
        "cannot resume: {}",
        message.into()
    )))
}

fn invariant(message: impl Into<String>) -> EngineError {
    EngineError::Invariant(DomainError::invalid_state_transition(message))
}
