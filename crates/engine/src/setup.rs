//! Game setup: who sits at the table, which cards are in the deck, and
//! which table rules apply.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hollow_domain::{DomainError, MainRole, Player, PlayerName};

use crate::config::RulesConfig;
use crate::session::SessionRecord;

/// Smallest table the engine will moderate
pub const MIN_PLAYERS: usize = 3;

/// Roles that may appear more than once in a deck
const REPEATABLE_ROLES: [MainRole; 2] = [MainRole::Villager, MainRole::SimpleWerewolf];

/// A validated game setup. Seating order is the order of `players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSetup {
    players: Vec<Player>,
    roles: Vec<MainRole>,
    #[serde(default)]
    rules: RulesConfig,
}

impl GameSetup {
    /// # Errors
    ///
    /// `DomainError::Validation` if the table is too small, the deck size
    /// does not match the table, the deck has no werewolf, a unique role is
    /// repeated, or two players share an id or name.
    pub fn new(
        players: Vec<Player>,
        roles: Vec<MainRole>,
        rules: RulesConfig,
    ) -> Result<Self, DomainError> {
        let setup = Self {
            players,
            roles,
            rules,
        };
        setup.validate()?;
        Ok(setup)
    }

    /// Seat players by name, in order.
    pub fn from_names<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        roles: Vec<MainRole>,
        rules: RulesConfig,
    ) -> Result<Self, DomainError> {
        let players = names
            .into_iter()
            .map(|name| PlayerName::new(name).map(Player::new))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(players, roles, rules)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(DomainError::validation(format!(
                "At least {} players are required, got {}",
                MIN_PLAYERS,
                self.players.len()
            )));
        }
        if self.roles.len() != self.players.len() {
            return Err(DomainError::validation(format!(
                "Deck has {} roles for {} players",
                self.roles.len(),
                self.players.len()
            )));
        }
        if !self.roles.iter().any(|role| role.is_werewolf()) {
            return Err(DomainError::validation("Deck has no werewolf"));
        }

        let mut unique_roles = HashSet::new();
        for role in &self.roles {
            if !REPEATABLE_ROLES.contains(role) && !unique_roles.insert(*role) {
                return Err(DomainError::validation(format!(
                    "{} can only be dealt once",
                    role
                )));
            }
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for player in &self.players {
            if !ids.insert(player.id()) {
                return Err(DomainError::validation(format!(
                    "Player id {} is seated twice",
                    player.id()
                )));
            }
            if !names.insert(player.name().as_str().to_lowercase()) {
                return Err(DomainError::validation(format!(
                    "Player name {} is seated twice",
                    player.name()
                )));
            }
        }
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The deck, one card per player.
    pub fn roles(&self) -> &[MainRole] {
        &self.roles
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn has_role(&self, role: MainRole) -> bool {
        self.roles.contains(&role)
    }
}

// =============================================================================
// Setup file
// =============================================================================

/// On-disk setup accepted by the CLI runner.
///
/// ```json
/// {
///   "players": ["Ana", "Ben", "Cleo", "Dev"],
///   "roles": ["seer", "simpleWerewolf", "witch", "villager"],
///   "rules": {"sheriffElection": false}
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupFile {
    pub players: Vec<String>,
    pub roles: Vec<MainRole>,
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Cannot read setup file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed setup file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl SetupFile {
    pub fn into_setup(self) -> Result<GameSetup, DomainError> {
        GameSetup::from_names(self.players, self.roles, self.rules)
    }
}

/// Load a setup file and apply `HOLLOW_*` environment overrides to its rules.
pub fn load_setup_file(path: &Path) -> Result<GameSetup, SetupError> {
    let raw = std::fs::read_to_string(path)?;
    let mut file: SetupFile = serde_json::from_str(&raw)?;
    file.rules = file.rules.with_env_overrides();
    tracing::info!(path = %path.display(), players = file.players.len(), "Loaded setup file");
    Ok(file.into_setup()?)
}

/// Load a session record written by the CLI runner.
pub fn load_record_file(path: &Path) -> Result<SessionRecord, SetupError> {
    let raw = std::fs::read_to_string(path)?;
    let record: SessionRecord = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), entries = record.log.len(), "Loaded session record");
    Ok(record)
}
