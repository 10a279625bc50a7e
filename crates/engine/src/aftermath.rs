//! Consequences that follow an elimination.

use hollow_domain::{EliminationReason, GameLogEntry, MainRole, StatusEffect};

use crate::session::GameSession;

/// Lovers whose partner is dead die of grief.
///
/// Returns nothing once every lover is dead or every lover is alive, so the
/// caller can apply and repeat until the result is empty.
pub fn heartbreak(session: &GameSession) -> Vec<GameLogEntry> {
    let mut lovers = session.with_effect(StatusEffect::InLove);
    if !lovers.any(|state| !state.is_alive()) {
        return Vec::new();
    }
    session
        .with_effect(StatusEffect::InLove)
        .filter(|state| state.is_alive())
        .map(|state| GameLogEntry::eliminated(state.player_id(), EliminationReason::Heartbreak))
        .collect()
}

/// A dead Hunter has not fired yet.
pub fn shot_owed(session: &GameSession) -> bool {
    session.states().iter().any(|state| {
        state.has_role(MainRole::Hunter)
            && !state.is_alive()
            && !state.has_effect(StatusEffect::HunterShotSpent)
    })
}
