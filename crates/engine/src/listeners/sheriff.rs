//! Sheriff: elected by the village on the first day; when the sheriff dies
//! they hand the title to a living successor.

use hollow_domain::{
    GameLogEntry, ListenerIdentifier, MainPhase, PlayerId, PlayerState, StatusEffect,
};
use hollow_shared::{CountConstraint, InstructionText, ModeratorInstruction, ModeratorResponse};

use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::StatusEffect(StatusEffect::Sheriff);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    fallen_sheriff(ctx).is_some() || election_due(ctx)
}

fn fallen_sheriff<'a>(ctx: &ListenerContext<'a>) -> Option<&'a PlayerState> {
    ctx.session()
        .with_effect(StatusEffect::Sheriff)
        .find(|state| !state.is_alive())
}

fn election_due(ctx: &ListenerContext<'_>) -> bool {
    ctx.phase() == MainPhase::Day
        && ctx.rules().sheriff_election
        && !ctx.session().sheriff_ever_elected()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    match (state, response) {
        (ListenerState::Asleep, None) => match fallen_sheriff(ctx) {
            Some(fallen) => name_successor(ctx, fallen.player_id()),
            None => ListenerOutcome::need_checked(
                InstructionText::public("The village elects a Sheriff, whose vote counts double.")
                    .and_then(|text| {
                        ModeratorInstruction::select_players(
                            text.with_private_note("Select the elected player."),
                            ctx.living(),
                            CountConstraint::exactly(1),
                        )
                    }),
                ListenerState::AwaitingTargetSelection,
                Vec::new(),
            ),
        },
        (ListenerState::AwaitingTargetSelection, Some(r)) => match r.selected_players() {
            Some(elected) => ListenerOutcome::complete_with(
                elected
                    .iter()
                    .map(|player| GameLogEntry::effect_applied(*player, StatusEffect::Sheriff, Some(ID)))
                    .collect(),
            ),
            None => ListenerOutcome::unexpected(ID),
        },
        (ListenerState::AwaitingSuccessorSelection, Some(r)) => {
            match (fallen_sheriff(ctx), r.selected_players()) {
                (Some(fallen), Some(successor)) => {
                    ListenerOutcome::complete_with(hand_over(fallen.player_id(), successor))
                }
                _ => ListenerOutcome::unexpected(ID),
            }
        }
        _ => ListenerOutcome::unexpected(ID),
    }
}

fn name_successor(ctx: &ListenerContext<'_>, fallen: PlayerId) -> ListenerOutcome {
    let living = ctx.living();
    if living.is_empty() {
        return ListenerOutcome::complete_with(hand_over(fallen, &[]));
    }
    let text = InstructionText::public(format!(
        "{} was the Sheriff and names a successor.",
        ctx.name(fallen)
    ));
    ListenerOutcome::need_checked(
        text.and_then(|text| {
            ModeratorInstruction::select_players(
                text.with_private_note("Select the new Sheriff."),
                living,
                CountConstraint::exactly(1),
            )
        })
        .map(|instruction| instruction.with_affected_players(vec![fallen])),
        ListenerState::AwaitingSuccessorSelection,
        Vec::new(),
    )
}

fn hand_over(fallen: PlayerId, successor: &[PlayerId]) -> Vec<GameLogEntry> {
    let mut entries = vec![GameLogEntry::StatusEffectRemoved {
        player: fallen,
        effect: StatusEffect::Sheriff,
    }];
    entries.extend(
        successor
            .iter()
            .map(|player| GameLogEntry::effect_applied(*player, StatusEffect::Sheriff, Some(ID))),
    );
    entries
}
