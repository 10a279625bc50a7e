//! Victory conditions
//!
//! Checked by the orchestrator after every batch of eliminations and after
//! each night is resolved. Rules are tried in order; the first match wins:
//!
//! ```text
//! 1. nobody alive                                        -> Nobody
//! 2. exactly two players alive, both in love             -> Lovers
//! 3. Piper alive, every other living player charmed      -> Piper
//! 4. White Werewolf is the sole survivor                 -> WhiteWerewolf
//! 5. no werewolf-side player alive                       -> Village
//! 6. all living players werewolf-side, no White Werewolf -> Werewolves
//! ```

use hollow_domain::{Faction, GameLogEntry, MainRole, PlayerId, PlayerState, StatusEffect};

/// A decided game: the winning faction and its surviving members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Victory {
    pub faction: Faction,
    pub winners: Vec<PlayerId>,
}

impl Victory {
    fn new(faction: Faction, winners: Vec<PlayerId>) -> Self {
        Self { faction, winners }
    }

    pub fn into_entry(self) -> GameLogEntry {
        GameLogEntry::VictoryConditionMet {
            faction: self.faction,
            winners: self.winners,
        }
    }
}

/// Decide whether the game is over. Returns `None` until every role is dealt.
pub fn check(states: &[PlayerState]) -> Option<Victory> {
    if states.iter().any(|state| state.role().is_none()) {
        return None;
    }

    let living: Vec<&PlayerState> = states.iter().filter(|state| state.is_alive()).collect();
    let ids = |players: &[&PlayerState]| -> Vec<PlayerId> {
        players.iter().map(|state| state.player_id()).collect()
    };

    if living.is_empty() {
        return Some(Victory::new(Faction::Nobody, Vec::new()));
    }

    if living.len() == 2 && living.iter().all(|state| state.has_effect(StatusEffect::InLove)) {
        return Some(Victory::new(Faction::Lovers, ids(&living)));
    }

    if let Some(piper) = living.iter().find(|state| state.has_role(MainRole::Piper)) {
        let all_charmed = living
            .iter()
            .filter(|state| state.player_id() != piper.player_id())
            .all(|state| state.has_effect(StatusEffect::Charmed));
        if all_charmed {
            return Some(Victory::new(Faction::Piper, vec![piper.player_id()]));
        }
    }

    if let [survivor] = living.as_slice() {
        if survivor.has_role(MainRole::WhiteWerewolf) {
            return Some(Victory::new(Faction::WhiteWerewolf, ids(&living)));
        }
    }

    if !living.iter().any(|state| state.is_werewolf_side()) {
        return Some(Victory::new(Faction::Village, ids(&living)));
    }

    let pack_only = living.iter().all(|state| state.is_werewolf_side());
    let white_alive = living
        .iter()
        .any(|state| state.has_role(MainRole::WhiteWerewolf));
    if pack_only && !white_alive {
        return Some(Victory::new(Faction::Werewolves, ids(&living)));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use hollow_domain::EliminationReason;

    fn table(roles: &[MainRole]) -> Vec<PlayerState> {
        roles
            .iter()
            .map(|role| {
                let mut state = PlayerState::new(PlayerId::new());
                state.assign_role(*role).unwrap();
                state
            })
            .collect()
    }

    fn kill(states: &mut [PlayerState], seats: &[usize]) {
        for seat in seats {
            states[*seat].eliminate(EliminationReason::Vote).unwrap();
        }
    }

    #[test]
    fn undealt_table_never_wins() {
        let states = vec![PlayerState::new(PlayerId::new())];
        assert_eq!(check(&states), None);
    }

    #[test]
    fn game_goes_on_while_both_sides_live() {
        let states = table(&[MainRole::SimpleWerewolf, MainRole::Villager, MainRole::Seer]);
        assert_eq!(check(&states), None);
    }

    #[test]
    fn everybody_dead() {
        let mut states = table(&[MainRole::SimpleWerewolf, MainRole::Villager]);
        kill(&mut states, &[0, 1]);
        assert_eq!(check(&states).unwrap().faction, Faction::Nobody);
    }

    #[test]
    fn village_wins_when_the_pack_is_gone() {
        let mut states = table(&[MainRole::SimpleWerewolf, MainRole::Villager, MainRole::Seer]);
        kill(&mut states, &[0]);
        let victory = check(&states).unwrap();
        assert_eq!(victory.faction, Faction::Village);
        assert_eq!(victory.winners.len(), 2);
    }

    #[test]
    fn infected_players_count_for_the_pack() {
        let mut states = table(&[MainRole::SimpleWerewolf, MainRole::Villager, MainRole::Seer]);
        states[1].apply_effect(StatusEffect::Infected);
        kill(&mut states, &[2]);
        assert_eq!(check(&states).unwrap().faction, Faction::Werewolves);
    }

    #[test]
    fn white_werewolf_blocks_the_pack_win() {
        let mut states = table(&[
            MainRole::SimpleWerewolf,
            MainRole::WhiteWerewolf,
            MainRole::Villager,
        ]);
        kill(&mut states, &[2]);
        assert_eq!(check(&states), None);

        kill(&mut states, &[0]);
        assert_eq!(check(&states).unwrap().faction, Faction::WhiteWerewolf);
    }

    #[test]
    fn lovers_across_sides_win_together() {
        let mut states = table(&[MainRole::SimpleWerewolf, MainRole::Villager, MainRole::Seer]);
        states[0].apply_effect(StatusEffect::InLove);
        states[1].apply_effect(StatusEffect::InLove);
        kill(&mut states, &[2]);
        let victory = check(&states).unwrap();
        assert_eq!(victory.faction, Faction::Lovers);
        assert_eq!(
            victory.winners,
            vec![states[0].player_id(), states[1].player_id()]
        );
    }

    #[test]
    fn piper_wins_once_everyone_is_charmed() {
        let mut states = table(&[
            MainRole::Piper,
            MainRole::SimpleWerewolf,
            MainRole::Villager,
        ]);
        states[1].apply_effect(StatusEffect::Charmed);
        assert_eq!(check(&states), None);

        states[2].apply_effect(StatusEffect::Charmed);
        let victory = check(&states).unwrap();
        assert_eq!(victory.faction, Faction::Piper);
        assert_eq!(victory.winners, vec![states[0].player_id()]);
    }
}
