//! Player health state
//!
//! A seated player is either alive or dead. Death is final for the whole
//! game: there is no transition back to `Alive`.

use serde::{Deserialize, Serialize};

/// Player health
///
/// # State Transitions
///
/// ```text
/// Alive -> Dead (elimination)
/// ```
///
/// # Examples
///
/// ```
/// use hollow_domain::value_objects::Health;
///
/// let health = Health::Alive;
/// assert!(health.is_alive());
/// assert!(Health::Dead.is_dead());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Health {
    #[default]
    Alive,
    Dead,
}

impl Health {
    /// Returns true if the player is still in the game
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Returns true if the player has been eliminated
    #[inline]
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
        }
    }
}
