//! Accursed Wolf-Father: once per game, turns the pack's victim into a
//! werewolf instead of letting them be devoured.

use hollow_domain::{
    GameLogEntry, ListenerIdentifier, MainRole, NightActionType, PlayerId, StatusEffect,
};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::AccursedWolfFather);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "Accursed Wolf-Father, wake up.",
    prompt: "Select the pack's victim to infect them instead, or nobody.",
    sleep: "Accursed Wolf-Father, go back to sleep.",
    action: NightActionType::AccursedWolfFatherInfection,
    eligible,
    count: 0..=1,
    feedback: None,
    rule_check: None,
    on_selected: Some(spend_infection),
};

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    let ready = ctx
        .session()
        .living_holder(MainRole::AccursedWolfFather)
        .is_some_and(|father| !father.has_effect(StatusEffect::InfectionUsed));
    ready && !eligible(ctx).is_empty()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    ctx.tonight(NightActionType::WerewolfVictimSelection)
}

fn spend_infection(ctx: &ListenerContext<'_>, _selected: &[PlayerId]) -> Vec<GameLogEntry> {
    ctx.session()
        .living_holder(MainRole::AccursedWolfFather)
        .map(|father| {
            GameLogEntry::effect_applied(
                father.player_id(),
                StatusEffect::InfectionUsed,
                Some(ID),
            )
        })
        .into_iter()
        .collect()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    standard::advance(&POWER, ctx, state, response)
}
