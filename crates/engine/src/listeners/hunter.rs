//! Hunter: when eliminated, immediately shoots one living player.

use hollow_domain::{
    EliminationReason, GameLogEntry, ListenerIdentifier, MainRole, PlayerId, PlayerState,
    StatusEffect,
};
use hollow_shared::{
    ContractError, CountConstraint, InstructionText, ModeratorInstruction, ModeratorResponse,
};

use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::Hunter);

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    fallen_hunter(ctx).is_some()
}

/// A dead Hunter who has not fired yet.
fn fallen_hunter<'a>(ctx: &ListenerContext<'a>) -> Option<&'a PlayerState> {
    ctx.session().states().iter().find(|state| {
        state.has_role(MainRole::Hunter)
            && !state.is_alive()
            && !state.has_effect(StatusEffect::HunterShotSpent)
    })
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    let Some(hunter) = fallen_hunter(ctx) else {
        return ListenerOutcome::unexpected(ID);
    };

    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::need_checked(
            aim(ctx, hunter.player_id(), &[]),
            ListenerState::AwaitingTargetSelection,
            Vec::new(),
        ),
        (ListenerState::AwaitingTargetSelection, Some(r)) => match r.selected_players() {
            Some(selected) => {
                let mut entries = vec![GameLogEntry::effect_applied(
                    hunter.player_id(),
                    StatusEffect::HunterShotSpent,
                    Some(ID),
                )];
                entries.extend(
                    selected
                        .iter()
                        .map(|target| GameLogEntry::eliminated(*target, EliminationReason::HunterShot)),
                );

                // Every fallen Hunter fires before the step ends, including
                // one brought down by this shot.
                let doomed = doomed_by(ctx, selected);
                let next = doomed
                    .iter()
                    .copied()
                    .find(|player| owes_a_shot(ctx, *player))
                    .or_else(|| other_fallen_hunter(ctx, hunter.player_id()));
                match next {
                    Some(next) => ListenerOutcome::need_checked(
                        aim(ctx, next, &doomed),
                        ListenerState::AwaitingTargetSelection,
                        entries,
                    ),
                    None => ListenerOutcome::complete_with(entries),
                }
            }
            None => ListenerOutcome::unexpected(ID),
        },
        _ => ListenerOutcome::unexpected(ID),
    }
}

fn aim(
    ctx: &ListenerContext<'_>,
    hunter: PlayerId,
    doomed: &[PlayerId],
) -> Result<ModeratorInstruction, ContractError> {
    let text = InstructionText::public(format!(
        "{} was the Hunter and takes one last shot.",
        ctx.name(hunter)
    ))?
    .with_private_note("Select the Hunter's target, or nobody.");
    let targets = ctx
        .living()
        .into_iter()
        .filter(|player| !doomed.contains(player))
        .collect();
    ModeratorInstruction::select_players(text, targets, CountConstraint::up_to(1))
        .map(|instruction| instruction.with_affected_players(vec![hunter]))
}

/// Players the shot kills, lovers of a shot lover included.
fn doomed_by(ctx: &ListenerContext<'_>, shot: &[PlayerId]) -> Vec<PlayerId> {
    let mut doomed = shot.to_vec();
    let lover_shot = shot.iter().any(|player| {
        ctx.session()
            .state(*player)
            .is_some_and(|state| state.has_effect(StatusEffect::InLove))
    });
    if lover_shot {
        for lover in ctx.session().living() {
            if lover.has_effect(StatusEffect::InLove) && !doomed.contains(&lover.player_id()) {
                doomed.push(lover.player_id());
            }
        }
    }
    doomed
}

fn other_fallen_hunter(ctx: &ListenerContext<'_>, current: PlayerId) -> Option<PlayerId> {
    ctx.session()
        .states()
        .iter()
        .filter(|state| !state.is_alive() && state.player_id() != current)
        .map(|state| state.player_id())
        .find(|player| owes_a_shot(ctx, *player))
}

fn owes_a_shot(ctx: &ListenerContext<'_>, player: PlayerId) -> bool {
    ctx.session().state(player).is_some_and(|state| {
        state.has_role(MainRole::Hunter) && !state.has_effect(StatusEffect::HunterShotSpent)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::listeners::testing::{self, answer, entries, instruction};
    use hollow_shared::ResponseInput;

    #[test]
    fn a_dead_hunter_shoots_once() {
        let mut session = testing::night_session(
            &[MainRole::Hunter, MainRole::SimpleWerewolf, MainRole::Villager],
            RulesConfig::default(),
        );
        let ctx = ListenerContext::new(&session);
        assert!(!is_active(&ctx));

        let hunter = testing::id(&session, 0);
        let wolf = testing::id(&session, 1);
        session
            .apply(GameLogEntry::eliminated(hunter, EliminationReason::WerewolfAttack))
            .unwrap();
        let ctx = ListenerContext::new(&session);
        assert!(is_active(&ctx));

        let aim = advance(&ctx, ListenerState::Asleep, None);
        assert!(!instruction(&aim).selectable().unwrap().contains(&hunter));
        let shot = answer(&aim, ResponseInput::players([wolf]));
        let done = advance(&ctx, ListenerState::AwaitingTargetSelection, Some(&shot));
        assert_eq!(
            entries(&done),
            &[
                GameLogEntry::effect_applied(hunter, StatusEffect::HunterShotSpent, Some(ID)),
                GameLogEntry::eliminated(wolf, EliminationReason::HunterShot),
            ]
        );
    }

    #[test]
    fn a_hunter_shot_by_a_hunter_fires_in_the_same_step() {
        let mut session = testing::night_session(
            &[
                MainRole::Hunter,
                MainRole::Hunter,
                MainRole::SimpleWerewolf,
                MainRole::Villager,
            ],
            RulesConfig::default(),
        );
        let first = testing::id(&session, 0);
        let second = testing::id(&session, 1);
        let wolf = testing::id(&session, 2);
        session
            .apply(GameLogEntry::eliminated(first, EliminationReason::WerewolfAttack))
            .unwrap();
        let ctx = ListenerContext::new(&session);

        let aim = advance(&ctx, ListenerState::Asleep, None);
        let shot = answer(&aim, ResponseInput::players([second]));
        let chained = advance(&ctx, ListenerState::AwaitingTargetSelection, Some(&shot));
        assert_eq!(
            entries(&chained),
            &[
                GameLogEntry::effect_applied(first, StatusEffect::HunterShotSpent, Some(ID)),
                GameLogEntry::eliminated(second, EliminationReason::HunterShot),
            ]
        );
        let next_aim = instruction(&chained);
        assert_eq!(next_aim.affected_players(), &[second]);
        assert!(!next_aim.selectable().unwrap().contains(&second));

        for entry in entries(&chained).to_vec() {
            session.apply(entry).unwrap();
        }
        let ctx = ListenerContext::new(&session);
        let shot = answer(&chained, ResponseInput::players([wolf]));
        let done = advance(&ctx, ListenerState::AwaitingTargetSelection, Some(&shot));
        assert!(matches!(done, ListenerOutcome::Complete { .. }));
        assert_eq!(
            entries(&done),
            &[
                GameLogEntry::effect_applied(second, StatusEffect::HunterShotSpent, Some(ID)),
                GameLogEntry::eliminated(wolf, EliminationReason::HunterShot),
            ]
        );
    }

    #[test]
    fn hunters_fallen_the_same_night_both_fire() {
        let mut session = testing::night_session(
            &[
                MainRole::Hunter,
                MainRole::Hunter,
                MainRole::SimpleWerewolf,
                MainRole::Villager,
            ],
            RulesConfig::default(),
        );
        let first = testing::id(&session, 0);
        let second = testing::id(&session, 1);
        for hunter in [first, second] {
            session
                .apply(GameLogEntry::eliminated(hunter, EliminationReason::WerewolfAttack))
                .unwrap();
        }
        let ctx = ListenerContext::new(&session);

        let aim = advance(&ctx, ListenerState::Asleep, None);
        assert_eq!(instruction(&aim).affected_players(), &[first]);
        let shot = answer(&aim, ResponseInput::players([]));
        let chained = advance(&ctx, ListenerState::AwaitingTargetSelection, Some(&shot));
        assert_eq!(instruction(&chained).affected_players(), &[second]);
    }

    #[test]
    fn shooting_nobody_completes_the_step() {
        let mut session = testing::night_session(
            &[MainRole::Hunter, MainRole::SimpleWerewolf, MainRole::Villager],
            RulesConfig::default(),
        );
        let hunter = testing::id(&session, 0);
        session
            .apply(GameLogEntry::eliminated(hunter, EliminationReason::Vote))
            .unwrap();
        let ctx = ListenerContext::new(&session);

        let aim = advance(&ctx, ListenerState::Asleep, None);
        let shot = answer(&aim, ResponseInput::players([]));
        let done = advance(&ctx, ListenerState::AwaitingTargetSelection, Some(&shot));
        assert_eq!(
            done,
            ListenerOutcome::complete_with(vec![GameLogEntry::effect_applied(
                hunter,
                StatusEffect::HunterShotSpent,
                Some(ID),
            )])
        );
    }
}
