//! The pack: every werewolf-side player wakes and agrees on one victim.
//!
//! Registered under the Simple Werewolf, but any living werewolf-side
//! player keeps it active, infected villagers included.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::SimpleWerewolf);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Werewolves, wake up and choose a victim.",
    prompt: "Select the pack's victim.",
    sleep: "Werewolves, go back to sleep.",
    action: NightActionType::WerewolfVictimSelection,
    eligible,
    count: 1..=1,
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
    ctx.session().living().any(|state| state.is_werewolf_side())
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    ctx.session()
        .living()
        .filter(|state| !state.is_werewolf_side())
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
