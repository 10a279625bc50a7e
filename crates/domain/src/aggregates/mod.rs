//! Aggregates - entities with identity and invariants
//!
//! The session aggregate root lives in the engine crate because it owns the
//! pending moderator instruction; players are its children.

pub mod player;

pub use player::{Player, PlayerState};
