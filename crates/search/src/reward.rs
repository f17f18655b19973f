use serde::{Deserialize, Serialize};
use spirebot_core::CombatState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardWeights {
    pub hp: f64,
    pub max_hp: f64,
    pub potion: f64,
    pub round_cost: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            hp: 1.0,
            max_hp: 7.0,
            potion: 7.0,
            round_cost: 0.5,
        }
    }
}

/// Score `state` against the real state its fork chain started from.
pub fn reward(state: &CombatState, weights: &RewardWeights) -> f64 {
    let root = state.origin();
    let hp = (state.player.current_hp - root.player.current_hp) as f64;
    let max_hp = (state.player.max_hp - root.player.max_hp) as f64;
    let potions = state.potion_count() as f64 - root.potion_count() as f64;
    weights.hp * hp + weights.max_hp * max_hp + weights.potion * potions
        - weights.round_cost * state.turn as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use spirebot_core::{CardLibrary, Player, Potion};
    use std::sync::Arc;

    fn root_state() -> CombatState {
        let library = Arc::new(CardLibrary::builtin());
        let monster = library.spawn_monster("Cultist", 0).expect("cultist");
        let mut state = CombatState::new(Player::new(70, 60), vec![monster], library, 1);
        state.potions = vec![Potion::new("Fire Potion"), Potion::empty()];
        state
    }

    #[test]
    fn unforked_state_only_pays_for_rounds() {
        let state = root_state();
        assert_eq!(reward(&state, &RewardWeights::default()), -0.5);
    }

    #[test]
    fn deltas_are_taken_from_the_root_not_the_parent() {
        let root = root_state();
        let mut child = root.fork();
        child.player.current_hp -= 4;
        let mut grandchild = child.fork();
        grandchild.player.current_hp -= 6;
        grandchild.player.max_hp += 1;
        grandchild.potions[0] = Potion::empty();
        grandchild.turn = 3;
        let value = reward(&grandchild, &RewardWeights::default());
        assert_eq!(value, -10.0 + 7.0 - 7.0 - 1.5);
    }

    #[test]
    fn weights_scale_each_term() {
        let root = root_state();
        let mut child = root.fork();
        child.player.current_hp -= 10;
        let weights = RewardWeights {
            hp: 2.0,
            max_hp: 0.0,
            potion: 0.0,
            round_cost: 0.0,
        };
        assert_eq!(reward(&child, &weights), -20.0);
    }
}
