//! Observer notifications while a session runs.

use std::sync::{Arc, Mutex};

use mockall::predicate::eq;

use hollow_domain::{GameLogEntry, MainPhase, MainRole};
use hollow_shared::{InstructionKind, ModeratorInstruction};

use super::{quiet_rules, FlowHarness};
use crate::observer::{MockSessionObserver, SessionObserver};

const TABLE: [(&str, MainRole); 4] = [
    ("Ana", MainRole::Seer),
    ("Ben", MainRole::SimpleWerewolf),
    ("Cleo", MainRole::Villager),
    ("Dev", MainRole::Villager),
];

#[test]
fn test_dealing_notifies_observers() {
    let mut observer = MockSessionObserver::new();
    observer
        .expect_on_main_phase_changed()
        .with(eq(MainPhase::Setup), eq(MainPhase::Night))
        .times(1)
        .return_const(());
    observer
        .expect_on_turn_changed()
        .with(eq(1))
        .times(1)
        .return_const(());
    observer
        .expect_on_log_entry_applied()
        .times(5)
        .return_const(());
    observer
        .expect_on_instruction_issued()
        .times(2)
        .return_const(());
    observer
        .expect_on_instruction_cleared()
        .times(1)
        .return_const(());
    observer.expect_on_sub_phase_changed().return_const(());
    observer
        .expect_on_active_listener_changed()
        .return_const(());

    FlowHarness::start_with_observers(&TABLE, quiet_rules(), vec![Box::new(observer)]);
}

/// Records every entry it sees.
struct Recorder(Arc<Mutex<Vec<GameLogEntry>>>);

impl SessionObserver for Recorder {
    fn on_log_entry_applied(&self, entry: &GameLogEntry) {
        self.0.lock().unwrap().push(entry.clone());
    }
}

#[test]
fn test_observer_sees_the_whole_log() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut h = FlowHarness::start_with_observers(
        &TABLE,
        quiet_rules(),
        vec![Box::new(Recorder(Arc::clone(&seen)))],
    );
    h.confirm_until_choice();
    h.select(&["Ben"]);

    assert_eq!(seen.lock().unwrap().as_slice(), h.session().log());
}

#[test]
fn test_observer_added_later_sees_only_new_instructions() {
    let mut h = FlowHarness::start(&TABLE, quiet_rules());

    let mut observer = MockSessionObserver::new();
    observer
        .expect_on_instruction_cleared()
        .times(1)
        .return_const(());
    observer
        .expect_on_instruction_issued()
        .withf(|instruction: &ModeratorInstruction| {
            instruction.kind() == InstructionKind::Confirmation
        })
        .times(1)
        .return_const(());
    observer.expect_on_sub_phase_changed().return_const(());
    observer
        .expect_on_active_listener_changed()
        .return_const(());
    observer.expect_on_log_entry_applied().never();
    h.engine.add_observer(Box::new(observer));

    // NightFalls -> Seer wake-up
    h.confirm();
}
