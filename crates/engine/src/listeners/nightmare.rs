//! Nightmare event card: the village wakes terrified and holds no vote.

use hollow_domain::{EventCard, ListenerIdentifier, MainPhase};
use hollow_shared::{InstructionText, ModeratorInstruction, ModeratorResponse};

use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::EventCard(EventCard::Nightmare);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.phase() == MainPhase::Day && ctx.session().event_card() == Some(EventCard::Nightmare)
}

fn advance(
    _ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::need_checked(
            InstructionText::public(
                "Nightmare! The village wakes up terrified: there is no vote today.",
            )
            .map(ModeratorInstruction::confirm),
            ListenerState::AwaitingAwakeConfirmation,
            Vec::new(),
        ),
        (ListenerState::AwaitingAwakeConfirmation, Some(r)) if r.is_confirmation() => {
            ListenerOutcome::complete()
        }
        _ => ListenerOutcome::unexpected(ID),
    }
}
