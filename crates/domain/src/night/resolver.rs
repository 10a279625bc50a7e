//! Night interaction resolver
//!
//! Converts the night actions logged during one night into the log entries
//! that apply their consequences. The resolver is a pure function of its
//! inputs: it never mutates players, never draws randomness, and emits its
//! entries in seating order, so running it twice yields identical output.
//!
//! # Precedence (per targeted player)
//!
//! ```text
//! 1. WitchSave          defends against wolf attacks (and infection, if configured)
//! 2. DefenderProtect    defends against wolf-origin actions, fails on the Little Girl
//! 3. Elder extra life   absorbs an undefended wolf-origin action once
//! 4. Infection          beats a plain attack: infect instead of kill
//! 5. Wolf attack        eliminate (WerewolfAttack)
//! 6. WitchKill / DelayedSword  eliminate regardless of 1-5, later reason wins;
//!                              steps 3-5 leave no trace on that player
//! 7. At most one elimination per player
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::aggregates::PlayerState;
use crate::error::DomainError;
use crate::events::{EliminationReason, GameLogEntry, NightAction, NightActionType};
use crate::ids::PlayerId;
use crate::value_objects::{ListenerIdentifier, MainRole, StatusEffect};

/// How far the witch's healing potion reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum WitchSaveScope {
    /// Blocks the physical attack only; an infection still takes hold
    #[default]
    AttackOnly,
    /// Blocks every wolf-origin action, infection included
    AllWolfActions,
}

impl std::str::FromStr for WitchSaveScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack_only" | "attackonly" | "attack" => Ok(WitchSaveScope::AttackOnly),
            "all_wolf_actions" | "allwolfactions" | "all" => Ok(WitchSaveScope::AllWolfActions),
            _ => Err(DomainError::parse(format!("Unknown witch save scope: {}", s))),
        }
    }
}

/// Rules that change how the resolver arbitrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionRules {
    pub witch_save_scope: WitchSaveScope,
}

/// Consequences of one night, ready to be applied in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NightResolution {
    entries: Vec<GameLogEntry>,
}

impl NightResolution {
    pub fn entries(&self) -> &[GameLogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<GameLogEntry> {
        self.entries
    }

    /// Eliminations decided for this night, in seating order.
    pub fn eliminations(&self) -> impl Iterator<Item = (PlayerId, EliminationReason)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            GameLogEntry::PlayerEliminated { player, reason } => Some((*player, *reason)),
            _ => None,
        })
    }

    pub fn is_quiet(&self) -> bool {
        self.eliminations().next().is_none()
    }
}

/// Resolve one night.
///
/// `players` must be in seating order; `actions` are the night actions
/// logged for the night being resolved, in log order.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if an action targets a player who is not
/// seated. That can only happen through a corrupted log.
pub fn resolve_night(
    players: &[PlayerState],
    actions: &[NightAction],
    rules: ResolutionRules,
) -> Result<NightResolution, DomainError> {
    let mut by_target: HashMap<PlayerId, Vec<NightActionType>> = HashMap::new();
    for action in actions {
        if !players.iter().any(|p| p.player_id() == action.target) {
            return Err(DomainError::not_found("Player", action.target.to_string()));
        }
        by_target.entry(action.target).or_default().push(action.action);
    }

    let mut entries = Vec::new();
    let mut eliminated: HashMap<PlayerId, EliminationReason> = HashMap::new();
    let mut infected_tonight: HashSet<PlayerId> = HashSet::new();

    for state in players {
        let Some(targeted_by) = by_target.get(&state.player_id()) else {
            continue;
        };
        if !state.is_alive() {
            continue;
        }
        let outcome = resolve_target(state, targeted_by, rules);

        for (effect, source) in outcome.effects {
            if !state.has_effect(effect) {
                entries.push(GameLogEntry::effect_applied(
                    state.player_id(),
                    effect,
                    Some(source),
                ));
            }
        }
        if outcome.infected {
            infected_tonight.insert(state.player_id());
        }
        if let Some(reason) = outcome.elimination {
            if reason == EliminationReason::RustySword && state.has_effect(StatusEffect::RustySwordWound) {
                entries.push(GameLogEntry::StatusEffectRemoved {
                    player: state.player_id(),
                    effect: StatusEffect::RustySwordWound,
                });
            }
            entries.push(GameLogEntry::eliminated(state.player_id(), reason));
            eliminated.insert(state.player_id(), reason);
        }
    }

    entries.extend(rusty_sword_wounds(players, &eliminated, &infected_tonight));

    Ok(NightResolution { entries })
}

/// Decision for one targeted player.
#[derive(Debug, Default)]
struct TargetOutcome {
    effects: Vec<(StatusEffect, ListenerIdentifier)>,
    infected: bool,
    elimination: Option<EliminationReason>,
}

fn resolve_target(
    state: &PlayerState,
    targeted_by: &[NightActionType],
    rules: ResolutionRules,
) -> TargetOutcome {
    let has = |action: NightActionType| targeted_by.contains(&action);
    let mut outcome = TargetOutcome::default();

    if has(NightActionType::CupidLink) {
        outcome
            .effects
            .push((StatusEffect::InLove, MainRole::Cupid.into()));
    }
    if has(NightActionType::PiperCharm) {
        outcome
            .effects
            .push((StatusEffect::Charmed, MainRole::Piper.into()));
    }

    // Steps 1 and 2: protection
    let witch_saved = has(NightActionType::WitchSave);
    // The Little Girl cannot be protected; the Defender fails silently.
    let defended = has(NightActionType::DefenderProtect) && !state.has_role(MainRole::LittleGirl);
    let attack_blocked = witch_saved || defended;
    let infection_blocked = defended
        || (witch_saved && rules.witch_save_scope == WitchSaveScope::AllWolfActions);

    // Step 6 first: an unstoppable elimination voids steps 3 to 5
    let unstoppable = if has(NightActionType::DelayedSword) {
        Some(EliminationReason::RustySword)
    } else if has(NightActionType::WitchKill) {
        Some(EliminationReason::WitchPoison)
    } else {
        None
    };
    if unstoppable.is_some() {
        outcome.elimination = unstoppable;
        return outcome;
    }

    let attacked = !attack_blocked && targeted_by.iter().any(|a| a.is_wolf_attack());
    let infected = !infection_blocked && has(NightActionType::AccursedWolfFatherInfection);

    if attacked || infected {
        if state.has_role(MainRole::Elder) && !state.has_effect(StatusEffect::ElderExtraLifeLost) {
            // Step 3
            outcome
                .effects
                .push((StatusEffect::ElderExtraLifeLost, MainRole::Elder.into()));
        } else if infected {
            // Step 4
            outcome.infected = true;
            outcome
                .effects
                .push((StatusEffect::Infected, MainRole::AccursedWolfFather.into()));
        } else {
            // Step 5
            outcome.elimination = Some(EliminationReason::WerewolfAttack);
        }
    }

    outcome
}

/// A Knight devoured by the wolves wounds the first werewolf seated after him.
fn rusty_sword_wounds(
    players: &[PlayerState],
    eliminated: &HashMap<PlayerId, EliminationReason>,
    infected_tonight: &HashSet<PlayerId>,
) -> Vec<GameLogEntry> {
    let mut wounds = Vec::new();
    for (seat, knight) in players.iter().enumerate() {
        if !knight.has_role(MainRole::KnightWithRustySword)
            || eliminated.get(&knight.player_id()) != Some(&EliminationReason::WerewolfAttack)
        {
            continue;
        }
        let wounded = (1..players.len())
            .map(|offset| &players[(seat + offset) % players.len()])
            .find(|candidate| {
                candidate.is_alive()
                    && !eliminated.contains_key(&candidate.player_id())
                    && (candidate.is_werewolf_side()
                        || infected_tonight.contains(&candidate.player_id()))
            });
        if let Some(wolf) = wounded {
            if !wolf.has_effect(StatusEffect::RustySwordWound) {
                wounds.push(GameLogEntry::effect_applied(
                    wolf.player_id(),
                    StatusEffect::RustySwordWound,
                    Some(MainRole::KnightWithRustySword.into()),
                ));
            }
        }
    }
    wounds
}
