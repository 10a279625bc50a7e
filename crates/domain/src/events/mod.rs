//! Domain Events
//!
//! - `log_entry`: the append-only game log, the single source of truth for
//!   rebuilding a session
//! - `night_action`: vocabulary of night intents and elimination reasons
//! - `player_events`: return types from player mutations

pub mod log_entry;
pub mod night_action;
pub mod player_events;

pub use log_entry::GameLogEntry;
pub use night_action::{EliminationReason, NightAction, NightActionType};
pub use player_events::EffectChange;
