//! Seer: learns one player's role each night.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::Seer);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Seer, wake up.",
    prompt: "Select the player whose card the Seer looks at.",
    sleep: "Seer, go back to sleep.",
    action: NightActionType::SeerReveal,
    eligible,
    count: 1..=1,
    feedback: Some(reveal),
    rule_check: None,
    on_selected: None,
};

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session().living_holder(MainRole::Seer).is_some()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    match ctx.session().living_holder(MainRole::Seer) {
        Some(seer) => ctx.living_except(seer.player_id()),
        None => Vec::new(),
    }
}

/// Show the Seer the card, not the allegiance: an infected villager still
/// reads as their original role.
fn reveal(ctx: &ListenerContext<'_>, selected: &[PlayerId]) -> String {
    selected
        .iter()
        .map(|player| {
            let role = ctx
                .session()
                .state(*player)
                .and_then(|state| state.role())
                .map_or("unknown", MainRole::display_name);
            format!("{} is the {}.", ctx.name(*player), role)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    standard::advance(&POWER, ctx, state, response)
}
