//! Player-related mutation outcomes
//!
//! These enums communicate what happened when player state was modified,
//! allowing callers to react appropriately.

/// Outcome of setting or clearing a status effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectChange {
    Applied,
    Removed,
    /// The effect was already in the requested state
    Unchanged,
}
