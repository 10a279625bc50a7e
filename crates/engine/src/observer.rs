//! Read-only session observers.
//!
//! Observers are told about every bookkeeping change and every applied log
//! entry. They cannot influence the flow.

use hollow_domain::{GameLogEntry, ListenerIdentifier, MainPhase};
use hollow_shared::ModeratorInstruction;

use crate::listeners::ListenerState;
use crate::worklist::Step;

/// Diagnostics hook on a [`crate::GameSession`]. All methods default to no-ops.
#[cfg_attr(test, mockall::automock)]
pub trait SessionObserver: Send {
    fn on_main_phase_changed(&self, _from: MainPhase, _to: MainPhase) {}

    /// The cursor moved to another step (`None` once the worklist is done).
    fn on_sub_phase_changed(&self, _step: Option<Step>) {}

    fn on_active_listener_changed(
        &self,
        _listener: Option<ListenerIdentifier>,
        _state: ListenerState,
    ) {
    }

    fn on_turn_changed(&self, _turn: u32) {}

    fn on_instruction_issued(&self, _instruction: &ModeratorInstruction) {}

    fn on_instruction_cleared(&self) {}

    fn on_log_entry_applied(&self, _entry: &GameLogEntry) {}
}

/// Writes every notification to the `tracing` log at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_main_phase_changed(&self, from: MainPhase, to: MainPhase) {
        tracing::debug!(%from, %to, "Main phase changed");
    }

    fn on_sub_phase_changed(&self, step: Option<Step>) {
        tracing::debug!(?step, "Sub-phase changed");
    }

    fn on_active_listener_changed(&self, listener: Option<ListenerIdentifier>, state: ListenerState) {
        tracing::debug!(?listener, ?state, "Active listener changed");
    }

    fn on_turn_changed(&self, turn: u32) {
        tracing::debug!(turn, "Turn changed");
    }

    fn on_instruction_issued(&self, instruction: &ModeratorInstruction) {
        tracing::debug!(kind = %instruction.kind(), "Instruction issued");
    }

    fn on_log_entry_applied(&self, entry: &GameLogEntry) {
        tracing::debug!(event_type = entry.event_type(), player = ?entry.player(), "Log entry applied");
    }
}
