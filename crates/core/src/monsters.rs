use crate::{Character, Effect, Power, Powers};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Attack,
    AttackBuff,
    AttackDebuff,
    AttackDefend,
    Buff,
    Debuff,
    StrongDebuff,
    Defend,
    DefendBuff,
    DefendDebuff,
    Escape,
    Magic,
    Sleep,
    Stun,
    #[default]
    Unknown,
    None,
}

impl Intent {
    pub fn is_attack(self) -> bool {
        matches!(
            self,
            Self::Attack | Self::AttackBuff | Self::AttackDebuff | Self::AttackDefend
        )
    }
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDef {
    pub name: String,
    pub intent: Intent,
    /// Relative probability in the weighted draw; 0 means only reachable by chaining.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Maximum consecutive uses.
    #[serde(default)]
    pub max_repeats: Option<u32>,
    /// Deterministic successor.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub max_hp: i32,
    #[serde(default)]
    pub first_move: Option<String>,
    pub moves: Vec<MoveDef>,
    #[serde(default)]
    pub powers: Vec<Power>,
}

impl MonsterDef {
    pub fn move_named(&self, name: &str) -> Option<&MoveDef> {
        self.moves.iter().find(|item| item.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: String,
    pub name: String,
    /// Combat slot, used to link records across snapshots.
    pub monster_index: usize,
    pub max_hp: i32,
    pub current_hp: i32,
    #[serde(default)]
    pub block: i32,
    #[serde(default)]
    pub powers: Powers,
    #[serde(default)]
    pub intent: Intent,
    /// Name of the move the monster will perform on its next turn, when known.
    #[serde(default)]
    pub next_move: Option<String>,
    /// Moves performed this combat, oldest first.
    #[serde(default)]
    pub move_history: Vec<String>,
    #[serde(default)]
    pub half_dead: bool,
    #[serde(default)]
    pub is_gone: bool,
    #[serde(skip)]
    def: Option<Arc<MonsterDef>>,
}

impl Monster {
    pub fn new(id: impl Into<String>, name: impl Into<String>, monster_index: usize, hp: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            monster_index,
            max_hp: hp,
            current_hp: hp,
            block: 0,
            powers: Powers::new(),
            intent: Intent::Unknown,
            next_move: None,
            move_history: Vec::new(),
            half_dead: false,
            is_gone: false,
            def: None,
        }
    }

    pub fn from_def(def: Arc<MonsterDef>, monster_index: usize) -> Self {
        let mut monster = Self::new(def.id.clone(), def.name.clone(), monster_index, def.max_hp);
        monster.powers = def.powers.iter().cloned().collect();
        monster.def = Some(def);
        monster
    }

    pub fn definition(&self) -> Option<&Arc<MonsterDef>> {
        self.def.as_ref()
    }

    pub(crate) fn attach(&mut self, def: Arc<MonsterDef>) {
        self.def = Some(def);
    }

    /// Number of trailing history entries equal to `name`.
    pub fn repeat_count(&self, name: &str) -> u32 {
        self.move_history
            .iter()
            .rev()
            .take_while(|entry| entry.as_str() == name)
            .count() as u32
    }

    /// Alive, not half-dead, and still in the fight.
    pub fn is_available(&self) -> bool {
        self.current_hp > 0 && !self.half_dead && !self.is_gone
    }
}

impl Character for Monster {
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
        false
    }
}
