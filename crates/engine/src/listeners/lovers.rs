//! The lovers wake together on the night Cupid links them.

use hollow_domain::{ListenerIdentifier, NightActionType, StatusEffect};
use hollow_shared::{InstructionText, ModeratorInstruction, ModeratorResponse};

use super::standard::go_to_sleep;
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::StatusEffect(StatusEffect::InLove);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    !ctx.tonight(NightActionType::CupidLink).is_empty()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => {
            let lovers = ctx.tonight(NightActionType::CupidLink);
            let note = format!("The lovers are {}.", ctx.names(&lovers));
            ListenerOutcome::need_checked(
                InstructionText::public(
                    "Lovers, wake up and look at each other. From now on you share one fate.",
                )
                .map(|text| {
                    ModeratorInstruction::confirm(text.with_private_note(note))
                        .with_affected_players(lovers)
                }),
                ListenerState::AwaitingAwakeConfirmation,
                Vec::new(),
            )
        }
        (ListenerState::AwaitingAwakeConfirmation, Some(r)) if r.is_confirmation() => {
            go_to_sleep("Lovers, go back to sleep.", Vec::new())
        }
        (ListenerState::AwaitingSleepConfirmation, Some(r)) if r.is_confirmation() => {
            ListenerOutcome::complete()
        }
        _ => ListenerOutcome::unexpected(ID),
    }
}
