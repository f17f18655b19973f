use crate::Effect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Energy cost marker for X-cost cards.
pub const COST_X: i32 = -1;
/// Energy cost marker for cards that can never be played.
pub const COST_UNPLAYABLE: i32 = -2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Status,
    Curse,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CardRarity {
    Basic,
    #[default]
    Common,
    Uncommon,
    Rare,
    Special,
    Curse,
}

/// Stable identity of one card instance across zones and snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardUuid(Arc<str>);

impl CardUuid {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardUuid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardVariant {
    pub cost: i32,
    #[serde(default)]
    pub has_target: bool,
    #[serde(default)]
    pub exhausts: bool,
    #[serde(default)]
    pub ethereal: bool,
    #[serde(default)]
    pub innate: bool,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl CardVariant {
    pub fn new(cost: i32, effects: Vec<Effect>) -> Self {
        Self {
            cost,
            has_target: false,
            exhausts: false,
            ethereal: false,
            innate: false,
            effects,
        }
    }

    pub fn targeted(mut self) -> Self {
        self.has_target = true;
        self
    }

    pub fn exhausting(mut self) -> Self {
        self.exhausts = true;
        self
    }

    pub fn ethereal(mut self) -> Self {
        self.ethereal = true;
        self
    }

    pub fn innate(mut self) -> Self {
        self.innate = true;
        self
    }
}

/// Static definition shared by every instance of a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDef {
    pub id: String,
    pub name: String,
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: CardRarity,
    pub base: CardVariant,
    #[serde(default)]
    pub upgraded: Option<CardVariant>,
    /// Searing Blow style cards upgrade without limit.
    #[serde(default)]
    pub multi_upgrade: bool,
}

impl CardDef {
    pub fn variant(&self, upgrades: u32) -> &CardVariant {
        match (&self.upgraded, upgrades) {
            (Some(upgraded), n) if n > 0 => upgraded,
            _ => &self.base,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub uuid: CardUuid,
    pub id: String,
    pub name: String,
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: CardRarity,
    #[serde(default)]
    pub upgrades: u32,
    pub cost: i32,
    #[serde(default)]
    pub has_target: bool,
    #[serde(default)]
    pub exhausts: bool,
    #[serde(default)]
    pub ethereal: bool,
    #[serde(default)]
    pub innate: bool,
    #[serde(default)]
    pub misc: i32,
    /// Cost override that lasts until end of turn.
    #[serde(default)]
    pub cost_for_turn: Option<i32>,
    /// Plays for free once (Forethought).
    #[serde(default)]
    pub free_once: bool,
    #[serde(skip)]
    def: Option<Arc<CardDef>>,
}

impl Card {
    pub fn from_def(def: Arc<CardDef>, uuid: CardUuid, upgrades: u32) -> Self {
        let variant = def.variant(upgrades);
        let name = upgraded_name(&def.name, upgrades);
        Self {
            uuid,
            id: def.id.clone(),
            name,
            card_type: def.card_type,
            rarity: def.rarity,
            upgrades,
            cost: variant.cost,
            has_target: variant.has_target,
            exhausts: variant.exhausts,
            ethereal: variant.ethereal,
            innate: variant.innate,
            misc: 0,
            cost_for_turn: None,
            free_once: false,
            def: Some(def),
        }
    }

    pub fn definition(&self) -> Option<&Arc<CardDef>> {
        self.def.as_ref()
    }

    pub(crate) fn attach(&mut self, def: Arc<CardDef>) {
        self.def = Some(def);
    }

    /// Ordered effect list; empty when the definition is unknown.
    pub fn effects(&self) -> &[Effect] {
        match &self.def {
            Some(def) => &def.variant(self.upgrades).effects,
            None => &[],
        }
    }

    pub fn is_x_cost(&self) -> bool {
        self.cost == COST_X
    }

    pub fn is_unplayable(&self) -> bool {
        self.cost <= COST_UNPLAYABLE
    }

    pub fn can_upgrade(&self) -> bool {
        if matches!(self.card_type, CardType::Status | CardType::Curse) {
            return false;
        }
        match &self.def {
            Some(def) => def.upgraded.is_some() && (self.upgrades == 0 || def.multi_upgrade),
            None => self.upgrades == 0,
        }
    }

    /// Switch to the upgraded variant. Returns false when the card cannot upgrade.
    pub fn upgrade(&mut self) -> bool {
        if !self.can_upgrade() {
            return false;
        }
        self.upgrades += 1;
        if let Some(def) = self.def.clone() {
            let base_cost = def.base.cost;
            let variant = def.variant(self.upgrades);
            if self.cost == base_cost {
                self.cost = variant.cost;
            }
            self.has_target = variant.has_target;
            self.exhausts = variant.exhausts;
            self.ethereal = variant.ethereal;
            self.innate = variant.innate;
            self.name = upgraded_name(&def.name, self.upgrades);
        } else {
            self.name = upgraded_name(&self.name, self.upgrades);
        }
        true
    }
}

fn upgraded_name(base: &str, upgrades: u32) -> String {
    match upgrades {
        0 => base.to_string(),
        1 => format!("{base}+"),
        n => format!("{base}+{n}"),
    }
}

/// Same physical card: identity by uuid.
pub fn same_instance(a: &Card, b: &Card) -> bool {
    a.uuid == b.uuid
}

/// Same catalog entry at the same upgrade level, regardless of instance.
pub fn same_definition(a: &Card, b: &Card) -> bool {
    a.id == b.id && a.upgrades == b.upgrades
}
