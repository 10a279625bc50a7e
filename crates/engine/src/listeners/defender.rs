//! Defender: protects one player from the wolves each night.
//!
//! The same player may not be protected on two consecutive nights unless
//! `defenderMayRepeatTarget` is set.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};
use crate::error::{RuleErrorCategory, RuleErrorCode, RuleViolation};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::Defender);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Defender, wake up.",
    prompt: "Select the player the Defender protects tonight.",
    sleep: "Defender, go back to sleep.",
    action: NightActionType::DefenderProtect,
    eligible,
    count: 1..=1,
    feedback: None,
    rule_check: Some(no_repeated_protection),
    on_selected: None,
};

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session().living_holder(MainRole::Defender).is_some()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    ctx.living()
}

fn no_repeated_protection(
    ctx: &ListenerContext<'_>,
    selected: &[PlayerId],
) -> Result<(), RuleViolation> {
    if ctx.rules().defender_may_repeat_target || ctx.turn() <= 1 {
        return Ok(());
    }
    let last_night = ctx.session().night_actions(ctx.turn() - 1);
    let repeated = last_night
        .iter()
        .filter(|logged| logged.action == NightActionType::DefenderProtect)
        .find(|logged| selected.contains(&logged.target));
    match repeated {
        Some(logged) => Err(RuleViolation::new(
            RuleErrorCategory::Targeting,
            RuleErrorCode::RepeatedProtection,
            "The Defender cannot protect the same player two nights in a row.",
        )
        .with_context(ctx.name(logged.target))),
        None => Ok(()),
    }
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    standard::advance(&POWER, ctx, state, response)
}
