//! Little Girl: may spy on the wolves. Nothing to moderate beyond noting
//! she is in play, so the listener completes at once.

use hollow_domain::{ListenerIdentifier, MainRole};
use hollow_shared::ModeratorResponse;

use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::LittleGirl);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session().living_holder(MainRole::LittleGirl).is_some()
}

fn advance(
    _ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::complete(),
        _ => ListenerOutcome::unexpected(ID),
    }
}
