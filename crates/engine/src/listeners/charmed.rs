//! Charmed players wake together after the Piper and recognize each other.

use hollow_domain::{ListenerIdentifier, MainRole, NightActionType, PlayerId, StatusEffect};
use hollow_shared::{InstructionText, ModeratorInstruction, ModeratorResponse};

use super::standard::go_to_sleep;
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::StatusEffect(StatusEffect::Charmed);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session().setup().has_role(MainRole::Piper) && !charmed(ctx).is_empty()
}

/// Living charmed players plus tonight's new ones.
fn charmed(ctx: &ListenerContext<'_>) -> Vec<PlayerId> {
    let mut players: Vec<PlayerId> = ctx
        .session()
        .living()
        .filter(|state| state.has_effect(StatusEffect::Charmed))
        .map(|state| state.player_id())
        .collect();
    for target in ctx.tonight(NightActionType::PiperCharm) {
        if !players.contains(&target) {
            players.push(target);
        }
    }
    players
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => {
            let players = charmed(ctx);
            let note = format!("Charmed: {}.", ctx.names(&players));
            ListenerOutcome::need_checked(
                InstructionText::public("Charmed players, wake up and recognize each other.").map(
                    |text| {
                        ModeratorInstruction::confirm(text.with_private_note(note))
                            .with_affected_players(players)
                    },
                ),
                ListenerState::AwaitingAwakeConfirmation,
                Vec::new(),
            )
        }
        (ListenerState::AwaitingAwakeConfirmation, Some(r)) if r.is_confirmation() => {
            go_to_sleep("Charmed players, go back to sleep.", Vec::new())
        }
        (ListenerState::AwaitingSleepConfirmation, Some(r)) if r.is_confirmation() => {
            ListenerOutcome::complete()
        }
        _ => ListenerOutcome::unexpected(ID),
    }
}
