use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use spirebot_core::{CardRarity, CardType, Intent, Power};

/// One entry of `cards.json`. Effects stay raw so a single bad effect
/// degrades to `Unmapped` instead of rejecting the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(alias = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: CardRarity,
    pub base: VariantRecord,
    #[serde(default)]
    pub upgraded: Option<VariantRecord>,
    #[serde(default)]
    pub multi_upgrade: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRecord {
    pub cost: i32,
    /// Derived from the effects when absent.
    #[serde(default)]
    pub has_target: Option<bool>,
    #[serde(default)]
    pub exhausts: bool,
    #[serde(default)]
    pub ethereal: bool,
    #[serde(default)]
    pub innate: bool,
    #[serde(default)]
    pub effects: Vec<Value>,
}

/// One entry of `monsters.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub max_hp: i32,
    #[serde(default)]
    pub first_move: Option<String>,
    pub moves: Vec<MoveRecord>,
    #[serde(default)]
    pub powers: Vec<Power>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    #[serde(default)]
    pub intent: Intent,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub max_repeats: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub effects: Vec<Value>,
}

fn default_weight() -> f64 {
    1.0
}
