//! Cupid: on the first night, links two players as lovers.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::Cupid);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Cupid, wake up.",
    prompt: "Cupid chooses two players who fall in love. Cupid may choose themselves.",
    sleep: "Cupid, go back to sleep.",
    action: NightActionType::CupidLink,
    eligible,
    count: 2..=2,
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
    ctx.turn() == 1 && ctx.session().living_holder(MainRole::Cupid).is_some()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    ctx.living()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    standard::advance(&POWER, ctx, state, response)
}
