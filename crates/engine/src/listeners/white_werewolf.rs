//! White Werewolf: every other night, may kill one of the pack.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId};
use hollow_shared::ModeratorResponse;

use super::standard::{self, NightPower};
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::WhiteWerewolf);

const POWER: NightPower = NightPower {
    id: ID,
    wake: "White Werewolf, wake up.",
    prompt: "Select a werewolf for the White Werewolf to devour, or nobody.",
    sleep: "White Werewolf, go back to sleep.",
    action: NightActionType::WhiteWerewolfVictimSelection,
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

/// Wakes on even nights only.
fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.turn() % 2 == 0 && ctx.session().living_holder(MainRole::WhiteWerewolf).is_some()
}

fn eligible(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    ctx.session()
        .living()
        .filter(|state| state.is_werewolf_side() && !state.has_role(MainRole::WhiteWerewolf))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::listeners::testing;

    #[test]
    fn sleeps_on_odd_nights() {
        let session = testing::night_session(
            &[
                MainRole::WhiteWerewolf,
                MainRole::SimpleWerewolf,
                MainRole::Villager,
            ],
            RulesConfig::default(),
        );
        let ctx = ListenerContext::new(&session);
        assert!(!is_active(&ctx));
        assert_eq!(eligible(&ctx), vec![testing::id(&session, 1)]);
    }
}
