//! Big Bad Wolf: claims a second victim, as long as no werewolf has died.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::BigBadWolf);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Big Bad Wolf, wake up and choose a second victim.",
    prompt: "Select the Big Bad Wolf's victim, or nobody.",
    sleep: "Big Bad Wolf, go back to sleep.",
    action: NightActionType::BigBadWolfVictimSelection,
    eligible,
    count: 0..=1,
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
    let session = ctx.session();
    let pack_intact = !session
        .states()
        .iter()
        .any(|state| !state.is_alive() && state.is_werewolf_side());
    pack_intact && session.living_holder(MainRole::BigBadWolf).is_some()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    let pack_victims = ctx.tonight(NightActionType::WerewolfVictimSelection);
    ctx.session()
        .living()
        .filter(|state| !state.is_werewolf_side())
        .map(|state| state.player_id())
        .filter(|id| !pack_victims.contains(id))
        .collect()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    standard::advance(&POWER, ctx, state, response)
}
