//! Rusty sword wound: the wounded wolf dies the night after the Knight fell.
//!
//! No moderator input; the listener logs a `DelayedSword` action per
//! wounded player and the resolver eliminates them at dawn.

use hollow_domain::{GameLogEntry, ListenerIdentifier, NightActionType, StatusEffect};
use hollow_shared::ModeratorResponse;

use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::StatusEffect(StatusEffect::RustySwordWound);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session()
        .living()
        .any(|state| state.has_effect(StatusEffect::RustySwordWound))
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::complete_with(
            ctx.session()
                .living()
                .filter(|state| state.has_effect(StatusEffect::RustySwordWound))
                .map(|state| {
                    GameLogEntry::night_action(
                        ctx.turn(),
                        NightActionType::DelayedSword,
                        state.player_id(),
                        ID,
                    )
                })
                .collect(),
        ),
        _ => ListenerOutcome::unexpected(ID),
    }
}
