//! Piper: charms one or two players each night.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId, StatusEffect};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::Piper);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Piper, wake up.",
    prompt: "Select one or two players for the Piper to charm.",
    sleep: "Piper, go back to sleep.",
    action: NightActionType::PiperCharm,
    eligible,
    count: 1..=2,
    feedback: None,
    rule_check: None,
    on_selected: None,
};

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session().living_holder(MainRole::Piper).is_some()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    ctx.session()
        .living()
        .filter(|state| {
            !state.has_role(MainRole::Piper) && !state.has_effect(StatusEffect::Charmed)
        })
        .map(|state| state.player_id())
        .collect()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    standard::advance(&POWER, ctx, state, response)
}
