//! Witch: one healing potion and one death potion for the whole game.
//!
//! ```text
//! Asleep -> AwaitingAwakeConfirmation
//!        -> AwaitingSaveDecision     (healing potion left and a victim tonight)
//!        -> AwaitingKillSelection    (death potion left)
//!        -> AwaitingSleepConfirmation -> Asleep
//! ```
//!
//! A spent potion is never offered again, so single use holds without a
//! rule check.

use hollow_domain::{
    GameLogEntry, ListenerIdentifier, MainRole, NightActionType, PlayerId, PlayerState,
    StatusEffect,
};
use hollow_shared::{CountConstraint, InstructionText, ModeratorInstruction, ModeratorResponse};

use super::standard::go_to_sleep;
use super::{HookListener, ListenerContext, ListenerOutcome, ListenerState};

const ID: ListenerIdentifier = ListenerIdentifier::MainRole(MainRole::Witch);

const WAKE: &str = "Witch, wake up.";
const SLEEP: &str = "Witch, go back to sleep.";

pub(super) const LISTENER: HookListener = HookListener {
    id: ID,
    is_active,
    advance,
};

fn is_active(ctx: &ListenerContext<'_>) -> bool {
    ctx.session().living_holder(MainRole::Witch).is_some()
}

fn advance(
    ctx: &ListenerContext<'_>,
    state: ListenerState,
    response: Option<&ModeratorResponse>,
) -> ListenerOutcome {
    let Some(witch) = ctx.session().living_holder(MainRole::Witch) else {
        return ListenerOutcome::unexpected(ID);
    };

    match (state, response) {
        (ListenerState::Asleep, None) => ListenerOutcome::need_checked(
            InstructionText::public(WAKE).map(ModeratorInstruction::confirm),
            ListenerState::AwaitingAwakeConfirmation,
            Vec::new(),
        ),
        (ListenerState::AwaitingAwakeConfirmation, Some(r)) if r.is_confirmation() => {
            offer_heal(ctx, witch)
        }
        (ListenerState::AwaitingSaveDecision, Some(r)) => match r.selected_players() {
            Some(saved) => {
                let entries = use_potion(
                    ctx,
                    witch,
                    saved,
                    NightActionType::WitchSave,
                    StatusEffect::HealPotionUsed,
                );
                offer_poison(ctx, witch, entries)
            }
            None => ListenerOutcome::unexpected(ID),
        },
        (ListenerState::AwaitingKillSelection, Some(r)) => match r.selected_players() {
            Some(killed) => go_to_sleep(
                SLEEP,
                use_potion(
                    ctx,
                    witch,
                    killed,
                    NightActionType::WitchKill,
                    StatusEffect::PoisonPotionUsed,
                ),
            ),
            None => ListenerOutcome::unexpected(ID),
        },
        (ListenerState::AwaitingSleepConfirmation, Some(r)) if r.is_confirmation() => {
            ListenerOutcome::complete()
        }
        _ => ListenerOutcome::unexpected(ID),
    }
}

fn offer_heal(ctx: &ListenerContext<'_>, witch: &PlayerState) -> ListenerOutcome {
    let victims = ctx.tonight_wolf_victims();
    if witch.has_effect(StatusEffect::HealPotionUsed) || victims.is_empty() {
        return offer_poison(ctx, witch, Vec::new());
    }
    let text = InstructionText::private(format!(
        "Tonight's victims: {}. Select a player to heal, or nobody.",
        ctx.names(&victims)
    ));
    ListenerOutcome::need_checked(
        text.and_then(|text| {
            ModeratorInstruction::select_players(text, victims.clone(), CountConstraint::up_to(1))
        })
        .map(|instruction| instruction.with_affected_players(victims)),
        ListenerState::AwaitingSaveDecision,
        Vec::new(),
    )
}

fn offer_poison(
    ctx: &ListenerContext<'_>,
    witch: &PlayerState,
    entries: Vec<GameLogEntry>,
) -> ListenerOutcome {
    let targets = ctx.living_except(witch.player_id());
    if witch.has_effect(StatusEffect::PoisonPotionUsed) || targets.is_empty() {
        return go_to_sleep(SLEEP, entries);
    }
    ListenerOutcome::need_checked(
        InstructionText::private("Select a player to poison, or nobody.").and_then(|text| {
            ModeratorInstruction::select_players(text, targets, CountConstraint::up_to(1))
        }),
        ListenerState::AwaitingKillSelection,
        entries,
    )
}

fn use_potion(
    ctx: &ListenerContext<'_>,
    witch: &PlayerState,
    targets: &[PlayerId],
    action: NightActionType,
    spent: StatusEffect,
) -> Vec<GameLogEntry> {
    let mut entries: Vec<GameLogEntry> = targets
        .iter()
        .map(|target| GameLogEntry::night_action(ctx.turn(), action, *target, ID))
        .collect();
    if !entries.is_empty() {
        entries.push(GameLogEntry::effect_applied(
            witch.player_id(),
            spent,
            Some(ID),
        ));
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::listeners::testing::{self, answer, entries, instruction, next_state};
    use crate::session::GameSession;
    use hollow_shared::ResponseInput;

    fn session(victim: bool) -> GameSession {
        let mut session = testing::night_session(
            &[
                MainRole::Witch,
                MainRole::SimpleWerewolf,
                MainRole::Villager,
                MainRole::Seer,
            ],
            RulesConfig::default(),
        );
        if victim {
            let target = testing::id(&session, 2);
            session
                .apply(GameLogEntry::night_action(
                    1,
                    NightActionType::WerewolfVictimSelection,
                    target,
                    MainRole::SimpleWerewolf,
                ))
                .unwrap();
        }
        session
    }

    fn wake(ctx: &ListenerContext<'_>) -> ListenerOutcome {
        let woke = advance(ctx, ListenerState::Asleep, None);
        let ok = answer(&woke, ResponseInput::confirm());
        advance(ctx, next_state(&woke), Some(&ok))
    }

    mod potions {
        use super::*;

        #[test]
        fn heal_then_poison() {
            let session = session(true);
            let ctx = ListenerContext::new(&session);
            let witch = testing::id(&session, 0);
            let wolf = testing::id(&session, 1);
            let victim = testing::id(&session, 2);

            let save = wake(&ctx);
            assert_eq!(next_state(&save), ListenerState::AwaitingSaveDecision);
            assert_eq!(instruction(&save).selectable().unwrap(), &[victim]);

            let saved = answer(&save, ResponseInput::players([victim]));
            let kill = advance(&ctx, next_state(&save), Some(&saved));
            assert_eq!(next_state(&kill), ListenerState::AwaitingKillSelection);
            assert_eq!(
                entries(&kill),
                &[
                    GameLogEntry::night_action(1, NightActionType::WitchSave, victim, ID),
                    GameLogEntry::effect_applied(witch, StatusEffect::HealPotionUsed, Some(ID)),
                ]
            );
            assert!(!instruction(&kill).selectable().unwrap().contains(&witch));

            let killed = answer(&kill, ResponseInput::players([wolf]));
            let sleep = advance(&ctx, next_state(&kill), Some(&killed));
            assert_eq!(next_state(&sleep), ListenerState::AwaitingSleepConfirmation);
            assert_eq!(
                entries(&sleep),
                &[
                    GameLogEntry::night_action(1, NightActionType::WitchKill, wolf, ID),
                    GameLogEntry::effect_applied(witch, StatusEffect::PoisonPotionUsed, Some(ID)),
                ]
            );
        }

        #[test]
        fn no_victim_skips_the_heal() {
            let session = session(false);
            let ctx = ListenerContext::new(&session);
            assert_eq!(next_state(&wake(&ctx)), ListenerState::AwaitingKillSelection);
        }

        #[test]
        fn spent_potions_are_not_offered() {
            let mut session = session(true);
            let witch = testing::id(&session, 0);
            for effect in [StatusEffect::HealPotionUsed, StatusEffect::PoisonPotionUsed] {
                session
                    .apply(GameLogEntry::effect_applied(witch, effect, Some(ID)))
                    .unwrap();
            }
            let ctx = ListenerContext::new(&session);
            let sleep = wake(&ctx);
            assert_eq!(next_state(&sleep), ListenerState::AwaitingSleepConfirmation);
            assert!(entries(&sleep).is_empty());
        }

        #[test]
        fn declining_keeps_the_potion() {
            let session = session(true);
            let ctx = ListenerContext::new(&session);
            let save = wake(&ctx);
            let nobody = answer(&save, ResponseInput::players([]));
            let kill = advance(&ctx, next_state(&save), Some(&nobody));
            assert!(entries(&kill).is_empty());
        }
    }
}
