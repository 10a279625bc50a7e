//! The standard night-role cycle, written once and parameterized per role.
//!
//! ```text
//! Asleep
//!   -> AwaitingAwakeConfirmation   "<Role>, wake up."
//!   -> AwaitingTargetSelection     SelectPlayers over the eligible set
//!   -> AwaitingModeratorFeedback   private feedback (Seer), optional
//!   -> AwaitingSleepConfirmation   "<Role>, go back to sleep."
//!   -> Asleep
//! ```
//!
//! Accepting a target selection logs one `NightActionPerformed` per target.
//! Consequences are left to the night resolver.

use std::ops::RangeInclusive;

use hollow_domain::{GameLogEntry, ListenerIdentifier, NightActionType, PlayerId};
use hollow_shared::{CountConstraint, InstructionText, ModeratorInstruction, ModeratorResponse};

use super::{ListenerContext, ListenerOutcome, ListenerState};
use crate::error::RuleViolation;

/// Role-specific parameters of the standard cycle.
pub struct NightPower {
    pub id: ListenerIdentifier,
    pub wake: &'static str,
    pub prompt: &'static str,
    pub sleep: &'static str,
    pub action: NightActionType,
    /// Players the power may target
    pub eligible: fn(&ListenerContext<'_>) -> Vec<PlayerId>,
    /// How many players to choose; `start` is capped by the eligible count
    pub count: RangeInclusive<usize>,
    /// Private text shown after the selection
    pub feedback: Option<fn(&ListenerContext<'_>, &[PlayerId]) -> String>,
    /// Game-rule check on an accepted selection
    pub rule_check: Option<fn(&ListenerContext<'_>, &[PlayerId]) -> Result<(), RuleViolation>>,
    /// Extra entries logged with a non-empty selection
    pub on_selected: Option<fn(&ListenerContext<'_>, &[PlayerId]) -> Vec<GameLogEntry>>,
}

pub fn advance(
    power: &NightPower,
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::need_checked(
            InstructionText::public(power.wake).map(ModeratorInstruction::confirm),
            ListenerState::AwaitingAwakeConfirmation,
            Vec::new(),
        ),
        (ListenerState::AwaitingAwakeConfirmation, Some(r)) if r.is_confirmation() => {
            select_targets(power, ctx)
        }
        (ListenerState::AwaitingTargetSelection, Some(r)) => match r.selected_players() {
            Some(selected) => accept_targets(power, ctx, selected),
            None => ListenerOutcome::unexpected(power.id),
        },
        (ListenerState::AwaitingModeratorFeedback, Some(r)) if r.is_confirmation() => {
            go_to_sleep(power.sleep, Vec::new())
        }
        (ListenerState::AwaitingSleepConfirmation, Some(r)) if r.is_confirmation() => {
            ListenerOutcome::complete()
        }
        _ => ListenerOutcome::unexpected(power.id),
    }
}

fn select_targets(power: &NightPower, ctx: &ListenerContext<'_>) -> ListenerOutcome {
    let eligible = (power.eligible)(ctx);
    if eligible.is_empty() {
        return ListenerOutcome::need_checked(
            InstructionText::public(power.sleep).map(|text| {
                ModeratorInstruction::confirm(text.with_private_note("Nobody can be chosen tonight."))
            }),
            ListenerState::AwaitingSleepConfirmation,
            Vec::new(),
        );
    }
    let min = (*power.count.start()).min(eligible.len());
    ListenerOutcome::need_checked(
        CountConstraint::new(min, *power.count.end()).and_then(|constraint| {
            ModeratorInstruction::select_players(
                InstructionText::private(power.prompt)?,
                eligible,
                constraint,
            )
        }),
        ListenerState::AwaitingTargetSelection,
        Vec::new(),
    )
}

fn accept_targets(
    power: &NightPower,
    ctx: &ListenerContext<'_>,
    selected: &[PlayerId],
) -> ListenerOutcome {
    if let Some(check) = power.rule_check {
        if let Err(violation) = check(ctx, selected) {
            return ListenerOutcome::Error(violation);
        }
    }

    let mut entries: Vec<GameLogEntry> = selected
        .iter()
        .map(|target| GameLogEntry::night_action(ctx.turn(), power.action, *target, power.id))
        .collect();
    if !selected.is_empty() {
        if let Some(extra) = power.on_selected {
            entries.extend(extra(ctx, selected));
        }
    }

    match power.feedback {
        Some(feedback) if !selected.is_empty() => ListenerOutcome::need_checked(
            InstructionText::private(feedback(ctx, selected)).map(|text| {
                ModeratorInstruction::confirm(text).with_affected_players(selected.to_vec())
            }),
            ListenerState::AwaitingModeratorFeedback,
            entries,
        ),
        _ => go_to_sleep(power.sleep, entries),
    }
}

/// Ask the moderator to put the role back to sleep.
pub fn go_to_sleep(text: &'static str, entries: Vec<GameLogEntry>) -> ListenerOutcome {
    ListenerOutcome::need_checked(
        InstructionText::public(text).map(ModeratorInstruction::confirm),
        ListenerState::AwaitingSleepConfirmation,
        entries,
    )
}
