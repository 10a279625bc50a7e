//! Orchestrator-owned steps.
//!
//! System steps are not hook listeners: they are not registered by
//! identifier and cannot be replaced. They share the listener contract
//! (`advance` returns a [`ListenerOutcome`]) so the orchestrator drives both
//! the same way.

use std::collections::BTreeMap;

use hollow_domain::{
    EliminationReason, EventCard, GameLogEntry, MainRole, PlayerId, StatusEffect,
};
use hollow_shared::{
    ContractError, CountConstraint, InstructionText, ModeratorInstruction, ModeratorResponse,
    RoleCandidates,
};

use crate::error::{RuleErrorCategory, RuleErrorCode, RuleViolation};
use crate::listeners::standard::go_to_sleep;
use crate::listeners::{ListenerContext, ListenerOutcome, ListenerState};
use crate::worklist::{Step, SystemStep};

pub fn is_active(step: SystemStep, ctx: &ListenerContext<'_>) -> bool {
    match step {
        SystemStep::RoleAssignment | SystemStep::NightFalls | SystemStep::NightReport => true,
        SystemStep::DrawEventCard => !undrawn_cards(ctx).is_empty(),
        SystemStep::VillageVote => {
            ctx.session().event_card() != Some(EventCard::Nightmare) && !ctx.living().is_empty()
        }
    }
}

pub fn advance(
    step: SystemStep,
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    let outcome = match step {
        SystemStep::RoleAssignment => role_assignment(ctx, state, response),
        SystemStep::NightFalls => night_falls(state, response),
        SystemStep::DrawEventCard => draw_event_card(ctx, state, response),
        SystemStep::NightReport => night_report(ctx, state, response),
        SystemStep::VillageVote => village_vote(ctx, state, response),
    };
    outcome.unwrap_or_else(|| {
        ListenerOutcome::Error(RuleViolation::unexpected_response(Step::System(step)))
    })
}

// =============================================================================
// Setup
// =============================================================================

fn role_assignment(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> Option<ListenerOutcome> {
    match (state, response) {
        (ListenerState::Asleep, None) => {
            let mut distinct: Vec<MainRole> = Vec::new();
            for role in ctx.session().setup().roles() {
                if !distinct.contains(role) {
                    distinct.push(*role);
                }
            }
            let candidates = ctx
                .session()
                .players()
                .iter()
                .map(|player| RoleCandidates {
                    player: player.id(),
                    roles: distinct.clone(),
                })
                .collect();
            Some(ListenerOutcome::need_checked(
                InstructionText::public("Deal one role card face down to each player.").and_then(
                    |text| {
                        ModeratorInstruction::assign_roles(
                            text.with_private_note("Record the card each player received."),
                            candidates,
                        )
                    },
                ),
                ListenerState::AwaitingTargetSelection,
                Vec::new(),
            ))
        }
        (ListenerState::AwaitingTargetSelection, Some(r)) => {
            let assignments = r.assignments()?;
            if let Err(violation) = matches_deck(ctx, assignments) {
                return Some(ListenerOutcome::Error(violation));
            }
            // Seating order, not map order
            let entries = ctx
                .session()
                .players()
                .iter()
                .filter_map(|player| {
                    assignments
                        .get(&player.id())
                        .map(|role| GameLogEntry::RoleAssigned {
                            player: player.id(),
                            role: *role,
                        })
                })
                .collect();
            Some(ListenerOutcome::complete_with(entries))
        }
        _ => None,
    }
}

fn matches_deck(
    ctx: &ListenerContext<'_>,
    assignments: &BTreeMap<PlayerId, MainRole>,
) -> Result<(), RuleViolation> {
    let mut expected: BTreeMap<MainRole, usize> = BTreeMap::new();
    for role in ctx.session().setup().roles() {
        *expected.entry(*role).or_default() += 1;
    }
    let mut dealt: BTreeMap<MainRole, usize> = BTreeMap::new();
    for role in assignments.values() {
        *dealt.entry(*role).or_default() += 1;
    }
    if expected == dealt {
        return Ok(());
    }

    let differences: Vec<String> = MainRole::ALL
        .iter()
        .filter_map(|role| {
            let want = expected.get(role).copied().unwrap_or(0);
            let got = dealt.get(role).copied().unwrap_or(0);
            (want != got).then(|| format!("{}: expected {}, got {}", role, want, got))
        })
        .collect();
    Err(RuleViolation::new(
        RuleErrorCategory::Setup,
        RuleErrorCode::RoleDistributionMismatch,
        "The assigned roles do not match the deck.",
    )
    .with_context(differences.join("; ")))
}

// =============================================================================
// Night
// =============================================================================

fn night_falls(state: ListenerState, response: Option<&ModeratorResponse>) -> Option<ListenerOutcome> {
    match (state, response) {
        (ListenerState::Asleep, None) => Some(go_to_sleep(
            "Night falls. Everyone, close your eyes.",
            Vec::new(),
        )),
        (ListenerState::AwaitingSleepConfirmation, Some(r)) if r.is_confirmation() => {
            Some(ListenerOutcome::complete())
        }
        _ => None,
    }
}

// =============================================================================
// Dawn
// =============================================================================

fn undrawn_cards(ctx: &ListenerContext<'_>) -> Vec<EventCard> {
    let drawn: Vec<EventCard> = ctx.session().drawn_cards().collect();
    ctx.rules()
        .event_cards
        .iter()
        .copied()
        .filter(|card| !drawn.contains(card))
        .collect()
}

fn draw_event_card(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> Option<ListenerOutcome> {
    match (state, response) {
        (ListenerState::Asleep, None) => {
            let options = undrawn_cards(ctx)
                .into_iter()
                .map(|card| card.display_name().to_string())
                .collect();
            Some(ListenerOutcome::need_checked(
                InstructionText::private(
                    "Draw the top event card and select it, or select nothing if the deck is not used today.",
                )
                .and_then(|text| {
                    ModeratorInstruction::select_options(text, options, CountConstraint::up_to(1))
                }),
                ListenerState::AwaitingTargetSelection,
                Vec::new(),
            ))
        }
        (ListenerState::AwaitingTargetSelection, Some(r)) => {
            let mut entries = Vec::new();
            for option in r.selected_options()? {
                let Some(card) = EventCard::ALL
                    .into_iter()
                    .find(|card| card.display_name() == option)
                else {
                    return Some(ListenerOutcome::Error(
                        RuleViolation::new(
                            RuleErrorCategory::Sequence,
                            RuleErrorCode::UnknownOption,
                            "Unknown event card.",
                        )
                        .with_context(option.clone()),
                    ));
                };
                entries.push(GameLogEntry::EventCardDrawn {
                    turn: ctx.turn(),
                    card,
                });
            }
            Some(ListenerOutcome::complete_with(entries))
        }
        _ => None,
    }
}

fn night_report(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> Option<ListenerOutcome> {
    match (state, response) {
        (ListenerState::Asleep, None) => Some(ListenerOutcome::need_checked(
            report(ctx),
            ListenerState::AwaitingModeratorFeedback,
            Vec::new(),
        )),
        (ListenerState::AwaitingModeratorFeedback, Some(r)) if r.is_confirmation() => {
            Some(ListenerOutcome::complete())
        }
        _ => None,
    }
}

/// Dawn announcement built from what this dawn applied so far.
fn report(ctx: &ListenerContext<'_>) -> Result<ModeratorInstruction, ContractError> {
    let mut dead: Vec<(PlayerId, EliminationReason)> = Vec::new();
    let mut infected: Vec<PlayerId> = Vec::new();
    for entry in ctx.session().current_phase_entries() {
        match entry {
            GameLogEntry::PlayerEliminated { player, reason } => dead.push((*player, *reason)),
            GameLogEntry::StatusEffectApplied {
                player,
                effect: StatusEffect::Infected,
                ..
            } => infected.push(*player),
            _ => {}
        }
    }

    let hidden = ctx.session().event_card() == Some(EventCard::Burial);
    let role_of = |player: PlayerId| {
        ctx.session()
            .state(player)
            .and_then(|state| state.role())
            .map_or("unknown role", MainRole::display_name)
    };

    let public = if dead.is_empty() {
        "The village wakes up. Nobody died tonight.".to_string()
    } else if hidden {
        let ids: Vec<PlayerId> = dead.iter().map(|(player, _)| *player).collect();
        format!(
            "The village wakes up. {} did not survive the night.",
            ctx.names(&ids)
        )
    } else {
        let fallen: Vec<String> = dead
            .iter()
            .map(|(player, _)| format!("{} ({})", ctx.name(*player), role_of(*player)))
            .collect();
        format!(
            "The village wakes up. Tonight the village lost {}.",
            fallen.join(", ")
        )
    };

    let mut notes: Vec<String> = dead
        .iter()
        .map(|(player, reason)| {
            format!("{} the {} was {}.", ctx.name(*player), role_of(*player), reason)
        })
        .collect();
    if !infected.is_empty() {
        notes.push(format!("Infected tonight: {}.", ctx.names(&infected)));
    }

    let mut text = InstructionText::public(public)?;
    if !notes.is_empty() {
        text = text.with_private_note(notes.join(" "));
    }
    Ok(ModeratorInstruction::confirm(text)
        .with_affected_players(dead.into_iter().map(|(player, _)| player).collect()))
}

// =============================================================================
// Day
// =============================================================================

fn village_vote(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> Option<ListenerOutcome> {
    match (state, response) {
        (ListenerState::Asleep, None) => {
            let mut note = "Select the player the village eliminated, or nobody on a tie.".to_string();
            if let Some(sheriff) = ctx
                .session()
                .living()
                .find(|state| state.has_effect(StatusEffect::Sheriff))
            {
                note.push_str(&format!(
                    " {}'s vote counts {} times.",
                    ctx.name(sheriff.player_id()),
                    sheriff.vote_weight()
                ));
            }
            Some(ListenerOutcome::need_checked(
                InstructionText::public("The village debates and votes to eliminate a suspect.")
                    .and_then(|text| {
                        ModeratorInstruction::select_players(
                            text.with_private_note(note),
                            ctx.living(),
                            CountConstraint::up_to(1),
                        )
                    }),
                ListenerState::AwaitingTargetSelection,
                Vec::new(),
            ))
        }
        (ListenerState::AwaitingTargetSelection, Some(r)) => {
            let eliminated = r.selected_players()?.first().copied();
            let mut entries = vec![GameLogEntry::VoteOutcomeReported {
                turn: ctx.turn(),
                eliminated,
            }];
            entries.extend(
                eliminated.map(|player| GameLogEntry::eliminated(player, EliminationReason::Vote)),
            );
            Some(ListenerOutcome::complete_with(entries))
        }
        _ => None,
    }
}
