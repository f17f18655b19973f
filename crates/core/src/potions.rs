use serde::{Deserialize, Serialize};

/// Id the game reports for an empty potion slot.
pub const EMPTY_SLOT: &str = "Potion Slot";

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Potion {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub can_use: bool,
    #[serde(default)]
    pub requires_target: bool,
}

impl Potion {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let requires_target = matches!(
            id.as_str(),
            "Fire Potion" | "FearPotion" | "Weak Potion" | "Poison Potion"
        );
        Self {
            name: id.clone(),
            can_use: id != "FairyPotion" && id != EMPTY_SLOT,
            requires_target,
            id,
        }
    }

    pub fn empty() -> Self {
        Self {
            id: EMPTY_SLOT.to_string(),
            name: EMPTY_SLOT.to_string(),
            can_use: false,
            requires_target: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == EMPTY_SLOT
    }
}
