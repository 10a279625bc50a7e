//! Top-level game phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main phase of a session.
///
/// # State Transitions
///
/// ```text
/// Setup -> Night -> Dawn -> Day -> Night -> ...
/// (any) -> Finished
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MainPhase {
    /// Roles are being dealt
    #[default]
    Setup,
    Night,
    /// Night actions are resolved and the deaths announced
    Dawn,
    Day,
    Finished,
}

impl MainPhase {
    /// The phase that follows this one in the regular cycle.
    ///
    /// `Finished` has no successor.
    pub fn next(self) -> Option<MainPhase> {
        match self {
            MainPhase::Setup => Some(MainPhase::Night),
            MainPhase::Night => Some(MainPhase::Dawn),
            MainPhase::Dawn => Some(MainPhase::Day),
            MainPhase::Day => Some(MainPhase::Night),
            MainPhase::Finished => None,
        }
    }

    /// Returns true if moving from `self` to `to` is a legal transition.
    pub fn can_transition_to(self, to: MainPhase) -> bool {
        if self == MainPhase::Finished {
            return false;
        }
        to == MainPhase::Finished || self.next() == Some(to)
    }
}

impl fmt::Display for MainPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainPhase::Setup => write!(f, "setup"),
            MainPhase::Night => write!(f, "night"),
            MainPhase::Dawn => write!(f, "dawn"),
            MainPhase::Day => write!(f, "day"),
            MainPhase::Finished => write!(f, "finished"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_cycle() {
        assert!(MainPhase::Setup.can_transition_to(MainPhase::Night));
        assert!(MainPhase::Night.can_transition_to(MainPhase::Dawn));
        assert!(MainPhase::Dawn.can_transition_to(MainPhase::Day));
        assert!(MainPhase::Day.can_transition_to(MainPhase::Night));
    }

    #[test]
    fn skipping_phases_is_illegal() {
        assert!(!MainPhase::Night.can_transition_to(MainPhase::Day));
        assert!(!MainPhase::Setup.can_transition_to(MainPhase::Dawn));
    }

    #[test]
    fn finished_is_terminal() {
        assert!(MainPhase::Dawn.can_transition_to(MainPhase::Finished));
        assert!(!MainPhase::Finished.can_transition_to(MainPhase::Night));
        assert_eq!(MainPhase::Finished.next(), None);
    }
}
