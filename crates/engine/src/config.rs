//! Table rules configuration.
//!
//! Rules are read from the setup file and can be overridden from the
//! environment (after `.env` is loaded):
//!
//! | Variable | Values |
//! |---|---|
//! | `HOLLOW_WITCH_SAVE_SCOPE` | `attack_only`, `all_wolf_actions` |
//! | `HOLLOW_DEFENDER_MAY_REPEAT` | `true` / `false` |
//! | `HOLLOW_SHERIFF_ELECTION` | `true` / `false` |
//! | `HOLLOW_EVENT_CARDS` | comma list of `nightmare`, `burial`, or empty |

use serde::{Deserialize, Serialize};

use hollow_domain::{EventCard, ResolutionRules, WitchSaveScope};

pub const ENV_WITCH_SAVE_SCOPE: &str = "HOLLOW_WITCH_SAVE_SCOPE";
pub const ENV_DEFENDER_MAY_REPEAT: &str = "HOLLOW_DEFENDER_MAY_REPEAT";
pub const ENV_SHERIFF_ELECTION: &str = "HOLLOW_SHERIFF_ELECTION";
pub const ENV_EVENT_CARDS: &str = "HOLLOW_EVENT_CARDS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesConfig {
    /// Whether the healing potion also stops an infection
    pub witch_save_scope: WitchSaveScope,
    /// Whether the Defender may protect the same player two nights in a row
    pub defender_may_repeat_target: bool,
    /// Whether the village elects a sheriff on the first day
    pub sheriff_election: bool,
    /// Event cards shuffled into the deck
    pub event_cards: Vec<EventCard>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            witch_save_scope: WitchSaveScope::default(),
            defender_may_repeat_target: false,
            sheriff_election: true,
            event_cards: Vec::new(),
        }
    }
}

impl RulesConfig {
    /// Apply `HOLLOW_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unparseable values are logged
    /// and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_WITCH_SAVE_SCOPE) {
            match value.parse() {
                Ok(scope) => self.witch_save_scope = scope,
                Err(e) => tracing::warn!(key = ENV_WITCH_SAVE_SCOPE, error = %e, "Ignoring override"),
            }
        }
        if let Some(value) = lookup(ENV_DEFENDER_MAY_REPEAT) {
            match parse_flag(&value) {
                Some(flag) => self.defender_may_repeat_target = flag,
                None => tracing::warn!(key = ENV_DEFENDER_MAY_REPEAT, value = %value, "Ignoring override"),
            }
        }
        if let Some(value) = lookup(ENV_SHERIFF_ELECTION) {
            match parse_flag(&value) {
                Some(flag) => self.sheriff_election = flag,
                None => tracing::warn!(key = ENV_SHERIFF_ELECTION, value = %value, "Ignoring override"),
            }
        }
        if let Some(value) = lookup(ENV_EVENT_CARDS) {
            match parse_cards(&value) {
                Some(cards) => self.event_cards = cards,
                None => tracing::warn!(key = ENV_EVENT_CARDS, value = %value, "Ignoring override"),
            }
        }
        self
    }

    pub fn resolution_rules(&self) -> ResolutionRules {
        ResolutionRules {
            witch_save_scope: self.witch_save_scope,
        }
    }

    pub fn uses_card(&self, card: EventCard) -> bool {
        self.event_cards.contains(&card)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_cards(value: &str) -> Option<Vec<EventCard>> {
    let mut cards = Vec::new();
    for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let card = EventCard::ALL
            .into_iter()
            .find(|card| card.display_name().eq_ignore_ascii_case(name))?;
        if !cards.contains(&card) {
            cards.push(card);
        }
    }
    Some(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let rules = RulesConfig::default();
        assert_eq!(rules.witch_save_scope, WitchSaveScope::AttackOnly);
        assert!(!rules.defender_may_repeat_target);
        assert!(rules.sheriff_election);
        assert!(rules.event_cards.is_empty());
    }

    #[test]
    fn overrides_replace_values() {
        let rules = RulesConfig::default().with_overrides(lookup(&[
            (ENV_WITCH_SAVE_SCOPE, "all_wolf_actions"),
            (ENV_DEFENDER_MAY_REPEAT, "yes"),
            (ENV_SHERIFF_ELECTION, "0"),
            (ENV_EVENT_CARDS, "burial, Nightmare"),
        ]));
        assert_eq!(rules.witch_save_scope, WitchSaveScope::AllWolfActions);
        assert!(rules.defender_may_repeat_target);
        assert!(!rules.sheriff_election);
        assert_eq!(rules.event_cards, vec![EventCard::Burial, EventCard::Nightmare]);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let rules = RulesConfig::default().with_overrides(lookup(&[
            (ENV_SHERIFF_ELECTION, "maybe"),
            (ENV_EVENT_CARDS, "eclipse"),
        ]));
        assert_eq!(rules, RulesConfig::default());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let rules: RulesConfig =
            serde_json::from_str(r#"{"witchSaveScope":"allWolfActions"}"#).unwrap();
        assert_eq!(rules.witch_save_scope, WitchSaveScope::AllWolfActions);
        assert!(rules.sheriff_election);
    }
}
