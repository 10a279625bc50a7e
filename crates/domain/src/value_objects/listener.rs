//! Listener identifiers and event cards
//!
//! A listener is addressed by what it hooks: a main role, a status effect,
//! or an event card. The set of categories is closed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MainRole, StatusEffect};

/// Event cards from the *New Moon* deck that the engine moderates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventCard {
    /// The village has a nightmare: no vote today
    Nightmare,
    /// The dead are buried without revealing their roles
    Burial,
}

impl EventCard {
    pub const ALL: [EventCard; 2] = [EventCard::Nightmare, EventCard::Burial];

    pub fn display_name(self) -> &'static str {
        match self {
            EventCard::Nightmare => "Nightmare",
            EventCard::Burial => "Burial",
        }
    }
}

impl fmt::Display for EventCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Category half of a [`ListenerIdentifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerCategory {
    MainRole,
    StatusEffect,
    EventCard,
}

/// Key of a hook listener, also recorded on log entries it produced.
///
/// Serialized as `{"category": "mainRole", "value": "seer"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "camelCase")]
pub enum ListenerIdentifier {
    MainRole(MainRole),
    StatusEffect(StatusEffect),
    EventCard(EventCard),
}

impl ListenerIdentifier {
    pub fn category(&self) -> ListenerCategory {
        match self {
            ListenerIdentifier::MainRole(_) => ListenerCategory::MainRole,
            ListenerIdentifier::StatusEffect(_) => ListenerCategory::StatusEffect,
            ListenerIdentifier::EventCard(_) => ListenerCategory::EventCard,
        }
    }
}

impl fmt::Display for ListenerIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerIdentifier::MainRole(role) => write!(f, "role:{}", role.display_name()),
            ListenerIdentifier::StatusEffect(effect) => write!(f, "effect:{}", effect),
            ListenerIdentifier::EventCard(card) => write!(f, "card:{}", card),
        }
    }
}

impl From<MainRole> for ListenerIdentifier {
    fn from(role: MainRole) -> Self {
        ListenerIdentifier::MainRole(role)
    }
}

impl From<StatusEffect> for ListenerIdentifier {
    fn from(effect: StatusEffect) -> Self {
        ListenerIdentifier::StatusEffect(effect)
    }
}

impl From<EventCard> for ListenerIdentifier {
    fn from(card: EventCard) -> Self {
        ListenerIdentifier::EventCard(card)
    }
}
