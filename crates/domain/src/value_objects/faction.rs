use serde::{Deserialize, Serialize};
use std::fmt;

/// Who won the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Faction {
    Village,
    Werewolves,
    WhiteWerewolf,
    Piper,
    Lovers,
    /// Everybody died
    Nobody,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Faction::Village => "the village",
            Faction::Werewolves => "the werewolves",
            Faction::WhiteWerewolf => "the white werewolf",
            Faction::Piper => "the piper",
            Faction::Lovers => "the lovers",
            Faction::Nobody => "nobody",
        };
        write!(f, "{}", label)
    }
}
