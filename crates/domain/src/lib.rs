extern crate self as hollow_domain;

pub mod aggregates;
pub mod error;
pub mod events;
pub mod ids;
pub mod night;
pub mod value_objects;

pub use aggregates::{Player, PlayerState};
pub use error::DomainError;
pub use events::{
    EffectChange, EliminationReason, GameLogEntry, NightAction, NightActionType,
};
pub use ids::PlayerId;
pub use night::{resolve_night, NightResolution, ResolutionRules, WitchSaveScope};
pub use value_objects::{
    EventCard, Faction, Health, ListenerCategory, ListenerIdentifier, MainPhase, MainRole,
    PlayerName, StatusEffect, StatusEffects, Team,
};
