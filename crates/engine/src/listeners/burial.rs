//! Burial event card: tonight's dead are buried without showing their cards.

use hollow_domain::{EventCard, ListenerIdentifier, MainPhase};
use hollow_shared::{InstructionText, ModeratorInstruction, ModeratorResponse};

use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::EventCard(EventCard::Burial);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.phase() == MainPhase::Dawn && ctx.session().event_card() == Some(EventCard::Burial)
}

fn advance(
    _ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::need_checked(
            InstructionText::public(
                "Burial: the dead are buried in silence. Their cards stay hidden.",
            )
            .map(|text| {
                ModeratorInstruction::confirm(
                    text.with_private_note("Do not reveal the roles of players eliminated tonight."),
                )
            }),
            ListenerState::AwaitingAwakeConfirmation,
            Vec::new(),
        ),
        (ListenerState::AwaitingAwakeConfirmation, Some(r)) if r.is_confirmation() => {
            ListenerOutcome::complete()
        }
        _ => ListenerOutcome::unexpected(ID),
    }
}
