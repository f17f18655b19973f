use crate::{CardType, PowerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetMode {
    #[serde(rename = "self")]
    SelfTarget,
    #[default]
    One,
    All,
    Random,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CardZone {
    Hand,
    DrawPile,
    DiscardPile,
    ExhaustPile,
}

impl CardZone {
    pub const ALL: [CardZone; 4] = [
        CardZone::Hand,
        CardZone::DrawPile,
        CardZone::DiscardPile,
        CardZone::ExhaustPile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hand => "hand",
            Self::DrawPile => "draw",
            Self::DiscardPile => "discard",
            Self::ExhaustPile => "exhaust",
        }
    }
}

/// Effects that suspend resolution until a follow-up `Choose` action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    /// Upgrade one card in hand.
    Armaments,
    /// Put a card from the discard pile on top of the draw pile.
    Headbutt,
    /// Return an exhausted card to hand.
    Exhume,
    /// Put a card from hand on top of the draw pile.
    HandToDeck,
    /// Copy an attack or power in hand.
    DualWield { copies: u32 },
    /// Put a card from hand on the bottom of the draw pile; it costs 0 until played.
    Forethought,
    /// Exhaust a chosen card from hand.
    ExhaustSelect,
    /// Pick one of three generated cards; it costs 0 this turn.
    Discover,
}

impl ChoiceKind {
    /// Name of the pending game action this choice completes.
    pub fn current_action(self) -> &'static str {
        match self {
            Self::Armaments => "ArmamentsAction",
            Self::Headbutt => "DiscardPileToTopOfDeckAction",
            Self::Exhume => "ExhumeAction",
            Self::HandToDeck => "PutOnDeckAction",
            Self::DualWield { .. } => "DualWieldAction",
            Self::Forethought => "ForethoughtAction",
            Self::ExhaustSelect => "ExhaustAction",
            Self::Discover => "DiscoveryAction",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EffectKind {
    /// Attack damage, modified by Strength/Weakened/Vulnerable.
    Damage {
        amount: i32,
        #[serde(default = "one")]
        hits: u32,
    },
    /// Damage that ignores attack modifiers (potions, Combust, Thorns).
    DirectDamage { amount: i32 },
    Block { amount: i32 },
    ApplyPower { power: PowerId, amount: i32 },
    RemovePower { power: PowerId },
    Draw { count: u32 },
    GainEnergy { amount: i32 },
    LoseHp { amount: i32 },
    Heal { amount: i32 },
    HealPercent { percent: i32 },
    GainGold { amount: i32 },
    GainMaxHp { amount: i32 },
    AddCard {
        card: String,
        zone: CardZone,
        #[serde(default = "one")]
        count: u32,
        #[serde(default)]
        upgraded: bool,
    },
    AddCopyOfPlayed { zone: CardZone },
    ExhaustRandomInHand { count: u32 },
    ExhaustNonAttacks { block_each: i32 },
    FiendFire { per_card: i32 },
    Choose { kind: ChoiceKind },
    UpgradeHand,
    UpgradeAll,
    BodySlam,
    HeavyBlade { base: i32, strength_multiplier: i32 },
    PerfectedStrike { base: i32, per_strike: i32 },
    SearingBlow,
    Whirlwind { amount: i32 },
    Rampage { base: i32, increment: i32 },
    Feed { amount: i32, max_hp: i32 },
    Reaper { amount: i32 },
    Dropkick { amount: i32 },
    SpotWeakness { amount: i32 },
    HandOfGreed { amount: i32, gold: i32 },
    Havoc,
    DoubleBlock,
    DoubleStrength,
    RandomCardToHand { card_type: CardType, free_this_turn: bool },
    StealGold { amount: i32 },
    Escape,
    ResetModeShift,
    /// A definition named an effect this catalog does not model.
    Unmapped { name: String },
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Effect {
    #[serde(default)]
    pub target: TargetMode,
    #[serde(flatten)]
    pub kind: EffectKind,
}

impl Effect {
    pub fn new(target: TargetMode, kind: EffectKind) -> Self {
        Self { target, kind }
    }

    pub fn on_self(kind: EffectKind) -> Self {
        Self::new(TargetMode::SelfTarget, kind)
    }

    pub fn on_one(kind: EffectKind) -> Self {
        Self::new(TargetMode::One, kind)
    }

    pub fn on_all(kind: EffectKind) -> Self {
        Self::new(TargetMode::All, kind)
    }

    pub fn on_random(kind: EffectKind) -> Self {
        Self::new(TargetMode::Random, kind)
    }

    pub fn damage(amount: i32) -> Self {
        Self::on_one(EffectKind::Damage { amount, hits: 1 })
    }

    pub fn block(amount: i32) -> Self {
        Self::on_self(EffectKind::Block { amount })
    }

    pub fn power(target: TargetMode, power: PowerId, amount: i32) -> Self {
        Self::new(target, EffectKind::ApplyPower { power, amount })
    }

    pub fn draw(count: u32) -> Self {
        Self::on_self(EffectKind::Draw { count })
    }

    pub fn choose(kind: ChoiceKind) -> Self {
        Self::on_self(EffectKind::Choose { kind })
    }

    pub fn unmapped(name: impl Into<String>) -> Self {
        Self::on_self(EffectKind::Unmapped { name: name.into() })
    }
}
