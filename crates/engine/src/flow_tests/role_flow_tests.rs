//! Night roles and event cards played through the real wake order.

use hollow_domain::{
    EliminationReason, EventCard, Faction, GameLogEntry, ListenerIdentifier, MainPhase, MainRole,
    NightActionType, StatusEffect,
};
use hollow_shared::InstructionKind;

use super::{quiet_rules, FlowHarness};
use crate::config::RulesConfig;

fn role(role: MainRole) -> Option<ListenerIdentifier> {
    Some(ListenerIdentifier::MainRole(role))
}

/// Whether `action` was logged on `turn`.
fn logged(h: &FlowHarness, turn: u32, action: NightActionType) -> bool {
    h.session()
        .night_actions(turn)
        .iter()
        .any(|logged| logged.action == action)
}

// =============================================================================
// Wolves
// =============================================================================

#[test]
fn test_accursed_wolf_father_infects_once_per_game() {
    let mut h = FlowHarness::start(
        &[
            ("Ana", MainRole::AccursedWolfFather),
            ("Ben", MainRole::SimpleWerewolf),
            ("Cleo", MainRole::Villager),
            ("Dev", MainRole::Villager),
            ("Eve", MainRole::Villager),
        ],
        quiet_rules(),
    );

    h.confirm_until_choice();
    h.select(&["Cleo"]);
    h.confirm_until_choice();
    assert_eq!(h.active_listener(), role(MainRole::AccursedWolfFather));
    assert_eq!(h.pending().selectable(), Some(h.ids(&["Cleo"]).as_slice()));
    h.select(&["Cleo"]);
    assert!(h.state("Ana").has_effect(StatusEffect::InfectionUsed));

    h.confirm();
    assert_eq!(h.phase(), MainPhase::Dawn);
    assert_eq!(
        h.pending().text().public_announcement(),
        Some("The village wakes up. Nobody died tonight.")
    );
    assert_eq!(
        h.pending().text().private_note(),
        Some("Infected tonight: Cleo.")
    );
    let cleo = h.state("Cleo");
    assert!(cleo.is_alive());
    assert!(cleo.has_effect(StatusEffect::Infected));
    assert!(cleo.is_werewolf_side());

    h.confirm_until_choice();
    assert_eq!(h.phase(), MainPhase::Day);
    h.select(&[]);

    h.confirm_until_choice();
    assert_eq!((h.phase(), h.turn()), (MainPhase::Night, 2));
    assert_eq!(h.pending().selectable(), Some(h.ids(&["Dev", "Eve"]).as_slice()));
    h.select(&["Dev"]);
    h.confirm_until_choice();

    assert_eq!((h.phase(), h.turn()), (MainPhase::Day, 2));
    assert!(!logged(&h, 2, NightActionType::AccursedWolfFatherInfection));
    assert_eq!(
        h.state("Dev").elimination(),
        Some(EliminationReason::WerewolfAttack)
    );
}

#[test]
fn test_big_bad_wolf_claims_a_second_victim_while_the_pack_is_whole() {
    let mut h = FlowHarness::start(
        &[
            ("Ana", MainRole::BigBadWolf),
            ("Ben", MainRole::SimpleWerewolf),
            ("Cleo", MainRole::Villager),
            ("Dev", MainRole::Villager),
            ("Eve", MainRole::Villager),
            ("Fay", MainRole::Villager),
        ],
        quiet_rules(),
    );

    h.confirm_until_choice();
    h.select(&["Cleo"]);
    h.confirm_until_choice();
    assert_eq!(h.active_listener(), role(MainRole::BigBadWolf));
    assert!(!h.pending().selectable().unwrap().contains(&h.id("Cleo")));
    h.select(&["Dev"]);

    h.confirm_until_choice();
    assert_eq!(h.phase(), MainPhase::Day);
    for victim in ["Cleo", "Dev"] {
        assert_eq!(
            h.state(victim).elimination(),
            Some(EliminationReason::WerewolfAttack)
        );
    }

    h.select(&["Ben"]);
    h.confirm_until_choice();
    assert_eq!((h.phase(), h.turn()), (MainPhase::Night, 2));
    h.select(&["Eve"]);
    h.confirm_until_choice();

    assert_eq!((h.phase(), h.turn()), (MainPhase::Day, 2));
    assert!(!logged(&h, 2, NightActionType::BigBadWolfVictimSelection));
    assert!(h.state("Fay").is_alive());
}

#[test]
fn test_white_werewolf_hunts_the_pack_on_even_nights() {
    let mut h = FlowHarness::start(
        &[
            ("Ana", MainRole::WhiteWerewolf),
            ("Ben", MainRole::SimpleWerewolf),
            ("Cleo", MainRole::Villager),
            ("Dev", MainRole::Villager),
            ("Eve", MainRole::Villager),
            ("Fay", MainRole::Villager),
        ],
        quiet_rules(),
    );

    h.confirm_until_choice();
    h.select(&["Cleo"]);
    h.confirm_until_choice();
    assert_eq!((h.phase(), h.turn()), (MainPhase::Day, 1));
    assert!(!logged(&h, 1, NightActionType::WhiteWerewolfVictimSelection));
    h.select(&[]);

    h.confirm_until_choice();
    h.select(&["Dev"]);
    h.confirm_until_choice();
    assert_eq!(h.active_listener(), role(MainRole::WhiteWerewolf));
    assert_eq!(h.pending().selectable(), Some(h.ids(&["Ben"]).as_slice()));
    h.select(&["Ben"]);

    h.confirm_until_choice();
    assert_eq!((h.phase(), h.turn()), (MainPhase::Day, 2));
    assert_eq!(
        h.state("Ben").elimination(),
        Some(EliminationReason::WerewolfAttack)
    );
    assert!(!h.state("Dev").is_alive());
    assert!(h.state("Ana").is_alive());
}

// =============================================================================
// Village and loners
// =============================================================================

#[test]
fn test_piper_wins_once_every_other_survivor_is_charmed() {
    let mut h = FlowHarness::start(
        &[
            ("Ana", MainRole::Piper),
            ("Ben", MainRole::SimpleWerewolf),
            ("Cleo", MainRole::Villager),
            ("Dev", MainRole::Villager),
        ],
        quiet_rules(),
    );

    h.confirm_until_choice();
    h.select(&["Cleo"]);
    h.confirm_until_choice();
    assert_eq!(h.active_listener(), role(MainRole::Piper));
    h.select(&["Ben", "Dev"]);

    h.confirm();
    assert_eq!(
        h.active_listener(),
        Some(ListenerIdentifier::StatusEffect(StatusEffect::Charmed))
    );
    assert_eq!(h.pending().affected_players(), h.ids(&["Ben", "Dev"]).as_slice());

    h.confirm_until_choice();
    assert_eq!(h.phase(), MainPhase::Finished);
    assert_eq!(h.session().winner(), Some(Faction::Piper));
    let log = h.session().log();
    assert!(log.contains(&GameLogEntry::VictoryConditionMet {
        faction: Faction::Piper,
        winners: h.ids(&["Ana"]),
    }));
}

#[test]
fn test_elder_survives_the_first_attack_only() {
    let mut h = FlowHarness::start(
        &[
            ("Ana", MainRole::Elder),
            ("Ben", MainRole::SimpleWerewolf),
            ("Cleo", MainRole::Villager),
            ("Dev", MainRole::Villager),
        ],
        quiet_rules(),
    );

    h.confirm_until_choice();
    h.select(&["Ana"]);
    h.confirm_until_choice();
    assert_eq!(h.phase(), MainPhase::Dawn);
    assert_eq!(
        h.pending().text().public_announcement(),
        Some("The village wakes up. Nobody died tonight.")
    );
    assert!(h.state("Ana").is_alive());
    assert!(h.state("Ana").has_effect(StatusEffect::ElderExtraLifeLost));

    h.confirm_until_choice();
    h.select(&[]);
    h.confirm_until_choice();
    assert_eq!((h.phase(), h.turn()), (MainPhase::Night, 2));
    h.select(&["Ana"]);
    h.confirm_until_choice();

    assert_eq!((h.phase(), h.turn()), (MainPhase::Day, 2));
    assert_eq!(
        h.state("Ana").elimination(),
        Some(EliminationReason::WerewolfAttack)
    );
}

// =============================================================================
// Event cards
// =============================================================================

#[test]
fn test_burial_hides_the_roles_of_the_dead() {
    let rules = RulesConfig {
        event_cards: vec![EventCard::Burial],
        ..quiet_rules()
    };
    let mut h = FlowHarness::start(
        &[
            ("Ana", MainRole::Seer),
            ("Ben", MainRole::SimpleWerewolf),
            ("Cleo", MainRole::Villager),
            ("Dev", MainRole::Villager),
        ],
        rules,
    );

    h.confirm_until_choice();
    h.select(&["Ben"]);
    h.confirm_until_choice();
    h.select(&["Cleo"]);
    h.confirm_until_choice();

    assert_eq!(h.phase(), MainPhase::Dawn);
    assert_eq!(h.pending().kind(), InstructionKind::SelectOptions);
    h.choose(&["Burial"]);
    assert_eq!(h.session().event_card(), Some(EventCard::Burial));
    assert_eq!(
        h.active_listener(),
        Some(ListenerIdentifier::EventCard(EventCard::Burial))
    );

    h.confirm();
    assert_eq!(
        h.pending().text().public_announcement(),
        Some("The village wakes up. Cleo did not survive the night.")
    );
    h.confirm();
    assert_eq!(h.phase(), MainPhase::Day);
}
