use crate::{Card, CardLibrary, CombatState, Potion, Relic};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One observation of the whole game, in or out of combat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(default)]
    pub floor: i32,
    #[serde(default)]
    pub act: i32,
    #[serde(default)]
    pub room_phase: String,
    #[serde(default)]
    pub room_type: String,
    #[serde(default)]
    pub screen_type: String,
    #[serde(default)]
    pub choice_list: Vec<String>,
    #[serde(default)]
    pub current_hp: i32,
    #[serde(default)]
    pub max_hp: i32,
    #[serde(default)]
    pub gold: i32,
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub relics: Vec<Relic>,
    #[serde(default)]
    pub potions: Vec<Potion>,
    #[serde(default)]
    pub combat: Option<CombatState>,
}

impl GameSnapshot {
    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    pub fn attach_library(&mut self, library: &Arc<CardLibrary>) {
        if let Some(combat) = self.combat.as_mut() {
            combat.attach_library(Arc::clone(library));
        }
    }
}
