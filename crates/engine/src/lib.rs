//! Hollow engine library.
//!
//! Runs a werewolf-style party game on behalf of a human moderator: it
//! tracks the game, decides who wakes up next, and issues one
//! [`ModeratorInstruction`](hollow_shared::ModeratorInstruction) at a time.
//!
//! ## Structure
//!
//! - `session` - event-sourced game state; `apply` is the only mutator
//! - `listeners/` - per-role hook listeners and their registry
//! - `worklist` - phase step orders and the sub-phase cursor
//! - `system_steps` - role dealing, nightfall, event cards, dawn report, vote
//! - `orchestrator` - [`GameEngine`], which drives everything above
//! - `aftermath`, `victory` - consequences checked after eliminations
//! - `config`, `setup` - table rules and the setup file

pub mod aftermath;
pub mod config;
pub mod error;
pub mod listeners;
pub mod observer;
pub mod orchestrator;
pub mod session;
pub mod setup;
pub mod system_steps;
pub mod victory;
pub mod worklist;

/// Scenario tests that play whole games through the engine boundary.
#[cfg(test)]
mod flow_tests;

pub use config::RulesConfig;
pub use error::{EngineError, RuleErrorCategory, RuleErrorCode, RuleViolation};
pub use listeners::{HookListener, ListenerContext, ListenerOutcome, ListenerRegistry, ListenerState};
pub use observer::{SessionObserver, TracingObserver};
pub use orchestrator::GameEngine;
pub use session::{GameSession, SessionRecord};
pub use setup::{load_record_file, load_setup_file, GameSetup, SetupError, SetupFile};
pub use victory::Victory;
pub use worklist::{Step, SubPhaseCursor, SystemStep};
