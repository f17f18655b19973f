use crate::{PowerId, Powers};
use serde::{Deserialize, Serialize};

/// Shared surface of the player and monsters.
pub trait Character {
    fn max_hp(&self) -> i32;
    fn current_hp(&self) -> i32;
    fn block(&self) -> i32;
    fn powers(&self) -> &Powers;
    fn powers_mut(&mut self) -> &mut Powers;
    fn set_max_hp(&mut self, value: i32);
    fn set_current_hp(&mut self, value: i32);
    fn set_block(&mut self, value: i32);
    fn is_player(&self) -> bool;

    fn power(&self, id: &PowerId) -> i32 {
        self.powers().amount(id)
    }

    fn has_power(&self, id: &PowerId) -> bool {
        self.powers().has(id)
    }

    fn is_dead(&self) -> bool {
        self.current_hp() <= 0
    }

    fn heal(&mut self, amount: i32) {
        if amount <= 0 || self.is_dead() {
            return;
        }
        let next = (self.current_hp() + amount).min(self.max_hp());
        self.set_current_hp(next);
    }

    /// Lose HP directly, bypassing block. Returns the HP actually lost.
    fn lose_hp(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.current_hp();
        let next = (before - amount).max(0);
        self.set_current_hp(next);
        before - next
    }

    fn add_block(&mut self, amount: i32) {
        if amount > 0 {
            self.set_block(self.block() + amount);
        }
    }
}

/// Addresses a creature inside a combat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Monster(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub max_hp: i32,
    pub current_hp: i32,
    #[serde(default)]
    pub block: i32,
    #[serde(default)]
    pub powers: Powers,
    #[serde(default)]
    pub energy: i32,
    #[serde(default)]
    pub orb_slots: u32,
}

impl Player {
    pub fn new(max_hp: i32, current_hp: i32) -> Self {
        Self {
            max_hp,
            current_hp,
            block: 0,
            powers: Powers::new(),
            energy: 0,
            orb_slots: 0,
        }
    }
}

impl Character for Player {
    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn current_hp(&self) -> i32 {
        self.current_hp
    }

    fn block(&self) -> i32 {
        self.block
    }

    fn powers(&self) -> &Powers {
        &self.powers
    }

    fn powers_mut(&mut self) -> &mut Powers {
        &mut self.powers
    }

    fn set_max_hp(&mut self, value: i32) {
        self.max_hp = value.max(1);
        self.current_hp = self.current_hp.min(self.max_hp);
    }

    fn set_current_hp(&mut self, value: i32) {
        self.current_hp = value.min(self.max_hp);
    }

    fn set_block(&mut self, value: i32) {
        self.block = value.max(0);
    }

    fn is_player(&self) -> bool {
        true
    }
}
