//! Night resolution

pub mod resolver;

pub use resolver::{resolve_night, NightResolution, ResolutionRules, WitchSaveScope};
