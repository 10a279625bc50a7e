//! Main roles and teams
//!
//! The role set is closed: every role the engine knows how to moderate is
//! listed here. Roles without a night power (Villager, Elder, Hunter,
//! Knight) still matter to resolution and victory checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Side a role plays for at the start of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    Village,
    Werewolves,
    /// Plays for the wolves until only wolves remain, then against them
    WhiteWerewolf,
    Piper,
}

/// A card dealt face down at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainRole {
    Villager,
    SimpleWerewolf,
    BigBadWolf,
    WhiteWerewolf,
    AccursedWolfFather,
    Seer,
    Witch,
    Defender,
    Elder,
    LittleGirl,
    Hunter,
    Cupid,
    Piper,
    KnightWithRustySword,
}

impl MainRole {
    pub const ALL: [MainRole; 14] = [
        MainRole::Villager,
        MainRole::SimpleWerewolf,
        MainRole::BigBadWolf,
        MainRole::WhiteWerewolf,
        MainRole::AccursedWolfFather,
        MainRole::Seer,
        MainRole::Witch,
        MainRole::Defender,
        MainRole::Elder,
        MainRole::LittleGirl,
        MainRole::Hunter,
        MainRole::Cupid,
        MainRole::Piper,
        MainRole::KnightWithRustySword,
    ];

    /// The team this role starts on.
    pub fn team(self) -> Team {
        match self {
            MainRole::SimpleWerewolf | MainRole::BigBadWolf | MainRole::AccursedWolfFather => {
                Team::Werewolves
            }
            MainRole::WhiteWerewolf => Team::WhiteWerewolf,
            MainRole::Piper => Team::Piper,
            _ => Team::Village,
        }
    }

    /// Wolf roles wake with the pack and are never targets of the pack.
    pub fn is_werewolf(self) -> bool {
        matches!(
            self,
            MainRole::SimpleWerewolf
                | MainRole::BigBadWolf
                | MainRole::WhiteWerewolf
                | MainRole::AccursedWolfFather
        )
    }

    /// Human-readable card name used in moderator prompts.
    pub fn display_name(self) -> &'static str {
        match self {
            MainRole::Villager => "Villager",
            MainRole::SimpleWerewolf => "Simple Werewolf",
            MainRole::BigBadWolf => "Big Bad Wolf",
            MainRole::WhiteWerewolf => "White Werewolf",
            MainRole::AccursedWolfFather => "Accursed Wolf-Father",
            MainRole::Seer => "Seer",
            MainRole::Witch => "Witch",
            MainRole::Defender => "Defender",
            MainRole::Elder => "Elder",
            MainRole::LittleGirl => "Little Girl",
            MainRole::Hunter => "Hunter",
            MainRole::Cupid => "Cupid",
            MainRole::Piper => "Piper",
            MainRole::KnightWithRustySword => "Knight with the Rusty Sword",
        }
    }

    fn key(self) -> &'static str {
        match self {
            MainRole::Villager => "villager",
            MainRole::SimpleWerewolf => "simpleWerewolf",
            MainRole::BigBadWolf => "bigBadWolf",
            MainRole::WhiteWerewolf => "whiteWerewolf",
            MainRole::AccursedWolfFather => "accursedWolfFather",
            MainRole::Seer => "seer",
            MainRole::Witch => "witch",
            MainRole::Defender => "defender",
            MainRole::Elder => "elder",
            MainRole::LittleGirl => "littleGirl",
            MainRole::Hunter => "hunter",
            MainRole::Cupid => "cupid",
            MainRole::Piper => "piper",
            MainRole::KnightWithRustySword => "knightWithRustySword",
        }
    }
}

impl fmt::Display for MainRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MainRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MainRole::ALL
            .into_iter()
            .find(|role| role.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::parse(format!("Unknown role: {}", s)))
    }
}
