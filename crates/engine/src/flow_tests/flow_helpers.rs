//! Harness for driving a [`GameEngine`] by player name.

use std::collections::BTreeMap;

use hollow_domain::{ListenerIdentifier, MainPhase, MainRole, PlayerId, PlayerState};
use hollow_shared::{InstructionKind, ModeratorInstruction, ResponseInput};

use crate::config::RulesConfig;
use crate::error::EngineError;
use crate::listeners::ListenerRegistry;
use crate::observer::SessionObserver;
use crate::orchestrator::GameEngine;
use crate::session::{GameSession, SessionRecord};
use crate::setup::GameSetup;

/// Rules with the sheriff election off, to keep flows short.
pub fn quiet_rules() -> RulesConfig {
    RulesConfig {
        sheriff_election: false,
        ..RulesConfig::default()
    }
}

pub struct FlowHarness {
    pub engine: GameEngine,
    pub setup: GameSetup,
}

impl FlowHarness {
    /// Seat `table` in order and deal the listed roles.
    pub fn start(table: &[(&str, MainRole)], rules: RulesConfig) -> Self {
        Self::start_with_observers(table, rules, Vec::new())
    }

    pub fn start_with_observers(
        table: &[(&str, MainRole)],
        rules: RulesConfig,
        observers: Vec<Box<dyn SessionObserver>>,
    ) -> Self {
        let mut harness = Self::seat(table, rules, observers);
        let assignments = harness.deal(table);
        harness
            .engine
            .submit(ResponseInput::AssignRoles { assignments })
            .expect("dealing the deck as listed is accepted");
        assert_eq!(harness.phase(), MainPhase::Night);
        harness
    }

    /// Seat `table` without dealing.
    pub fn seat(
        table: &[(&str, MainRole)],
        rules: RulesConfig,
        observers: Vec<Box<dyn SessionObserver>>,
    ) -> Self {
        let setup = GameSetup::from_names(
            table.iter().map(|(name, _)| *name),
            table.iter().map(|(_, role)| *role).collect(),
            rules,
        )
        .expect("valid setup");
        let engine =
            GameEngine::with_observers(setup.clone(), observers).expect("engine starts");
        Self { engine, setup }
    }

    /// Pick a saved record back up with the standard listeners.
    pub fn resume(record: SessionRecord) -> Self {
        let setup = record.setup.clone();
        let engine = GameEngine::resume(record, ListenerRegistry::standard(), Vec::new())
            .expect("record resumes");
        Self { engine, setup }
    }

    /// The assignment map matching `table`.
    pub fn deal(&self, table: &[(&str, MainRole)]) -> BTreeMap<PlayerId, MainRole> {
        table
            .iter()
            .map(|(name, role)| (self.id(name), *role))
            .collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn session(&self) -> &GameSession {
        self.engine.session()
    }

    pub fn id(&self, name: &str) -> PlayerId {
        self.session()
            .players()
            .iter()
            .find(|player| player.name().as_str() == name)
            .map(|player| player.id())
            .unwrap_or_else(|| panic!("no player named {}", name))
    }

    pub fn ids(&self, names: &[&str]) -> Vec<PlayerId> {
        names.iter().map(|name| self.id(name)).collect()
    }

    pub fn state(&self, name: &str) -> &PlayerState {
        self.session().state(self.id(name)).expect("seated player")
    }

    pub fn pending(&self) -> &ModeratorInstruction {
        self.engine
            .pending_instruction()
            .expect("an instruction is pending")
    }

    pub fn phase(&self) -> MainPhase {
        self.session().phase()
    }

    pub fn turn(&self) -> u32 {
        self.session().turn()
    }

    pub fn active_listener(&self) -> Option<ListenerIdentifier> {
        self.session().active_listener().map(|(id, _)| id)
    }

    // =========================================================================
    // Answers
    // =========================================================================

    pub fn confirm(&mut self) {
        self.engine
            .submit(ResponseInput::confirm())
            .expect("confirmation accepted");
    }

    /// Confirm until a non-confirmation instruction is pending or the game
    /// is over.
    pub fn confirm_until_choice(&mut self) {
        while self
            .engine
            .pending_instruction()
            .is_some_and(|pending| pending.kind() == InstructionKind::Confirmation)
        {
            self.confirm();
        }
    }

    pub fn try_select(&mut self, names: &[&str]) -> Result<(), EngineError> {
        let selected = self.ids(names);
        self.engine
            .submit(ResponseInput::players(selected))
            .map(|_| ())
    }

    pub fn select(&mut self, names: &[&str]) {
        self.try_select(names).expect("selection accepted");
    }

    pub fn choose(&mut self, options: &[&str]) {
        self.engine
            .submit(ResponseInput::options(options.iter().copied()))
            .expect("options accepted");
    }
}
