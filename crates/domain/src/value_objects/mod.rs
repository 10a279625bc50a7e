//! Value objects - immutable types defined by their values
//!
//! Roles, status effects, phases and listener identifiers are closed enums:
//! adding a variant is a rules change, not configuration.

mod faction;
mod health;
mod listener;
mod names;
mod phase;
mod role;
mod status_effect;

pub use faction::Faction;
pub use health::Health;
pub use listener::{EventCard, ListenerCategory, ListenerIdentifier};
pub use names::PlayerName;
pub use phase::MainPhase;
pub use role::{MainRole, Team};
pub use status_effect::{StatusEffect, StatusEffects};
