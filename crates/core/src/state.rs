use crate::actions::ActionCache;
use crate::{
    Actor, Card, CardLibrary, CardUuid, CardZone, Character, ChoiceKind, Effect, EffectContext,
    Monster, Player, Potion, Relic, RngState, SimError,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Cards a hand can hold; further draws go to the discard pile.
pub const MAX_HAND_SIZE: usize = 10;
pub const BASE_ENERGY: i32 = 3;
pub const BASE_DRAW: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CombatPhase {
    #[default]
    PlayerTurnActive,
    EndingPlayerTurn,
    MonsterTurnActive,
    StartingPlayerTurn,
    Victory,
    Defeat,
}

impl CombatPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Auxiliary counters the game keeps outside of creatures and cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackedState {
    #[serde(default)]
    pub registered_start_of_combat: bool,
    #[serde(default)]
    pub attacks_this_turn: u32,
    #[serde(default)]
    pub skills_this_turn: u32,
    #[serde(default)]
    pub powers_this_turn: u32,
    #[serde(default)]
    pub cards_played_this_turn: u32,
    #[serde(default)]
    pub pellets_triggered: bool,
    #[serde(default)]
    pub necronomicon_used: bool,
    #[serde(default)]
    pub art_of_war_ready: bool,
    #[serde(default)]
    pub reshuffles: u32,
    /// Gold held by each thief, keyed by monster slot.
    #[serde(default)]
    pub stolen_gold: BTreeMap<usize, i32>,
    /// Mode Shift amount the Guardian returns to after its defensive cycle.
    #[serde(default)]
    pub mode_shift_threshold: BTreeMap<usize, i32>,
    #[serde(default)]
    pub next_uuid: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceOption {
    pub uuid: CardUuid,
    pub name: String,
}

/// A card effect suspended until the player answers with `Choose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingChoice {
    pub kind: ChoiceKind,
    pub candidates: Vec<ChoiceOption>,
    /// Generated cards on offer (Discovery); empty for zone selections.
    #[serde(default)]
    pub offered: Vec<Card>,
    /// Effects of the source that resume after the choice.
    #[serde(default)]
    pub remaining: Vec<Effect>,
    pub context: EffectContext,
}

impl PendingChoice {
    pub fn current_action(&self) -> &'static str {
        self.kind.current_action()
    }

    pub fn screen_type(&self) -> &'static str {
        match self.kind {
            ChoiceKind::Discover => "CARD_REWARD",
            ChoiceKind::Headbutt | ChoiceKind::Exhume => "GRID",
            _ => "HAND_SELECT",
        }
    }
}

/// Serialized shape of a combat observation. The player is optional here so
/// a missing actor surfaces as `SimError::MissingActor` instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    #[serde(default)]
    pub player: Option<Player>,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    #[serde(default)]
    pub draw_pile: Vec<Card>,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    #[serde(default)]
    pub exhaust_pile: Vec<Card>,
    #[serde(default)]
    pub gold: i32,
    #[serde(default)]
    pub relics: Vec<Relic>,
    #[serde(default)]
    pub potions: Vec<Potion>,
    #[serde(default)]
    pub turn: u32,
    #[serde(default)]
    pub tracked: TrackedState,
    #[serde(default)]
    pub phase: CombatPhase,
    #[serde(default)]
    pub pending_choice: Option<PendingChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CombatSnapshot")]
pub struct CombatState {
    pub player: Player,
    pub monsters: Vec<Monster>,
    /// Top of the draw pile is the last element.
    pub draw_pile: Vec<Card>,
    pub hand: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub exhaust_pile: Vec<Card>,
    pub gold: i32,
    pub relics: Vec<Relic>,
    pub potions: Vec<Potion>,
    /// Player turn number, 1 on the first turn of combat.
    pub turn: u32,
    pub tracked: TrackedState,
    pub phase: CombatPhase,
    pub pending_choice: Option<PendingChoice>,
    #[serde(skip)]
    pub(crate) rng: RngState,
    #[serde(skip)]
    origin: Option<Arc<CombatState>>,
    #[serde(skip)]
    pub(crate) actions: ActionCache,
    #[serde(skip)]
    library: Arc<CardLibrary>,
}

impl TryFrom<CombatSnapshot> for CombatState {
    type Error = SimError;

    fn try_from(snapshot: CombatSnapshot) -> Result<Self, Self::Error> {
        let player = snapshot.player.ok_or(SimError::MissingActor("player"))?;
        Ok(Self {
            player,
            monsters: snapshot.monsters,
            draw_pile: snapshot.draw_pile,
            hand: snapshot.hand,
            discard_pile: snapshot.discard_pile,
            exhaust_pile: snapshot.exhaust_pile,
            gold: snapshot.gold,
            relics: snapshot.relics,
            potions: snapshot.potions,
            turn: snapshot.turn.max(1),
            tracked: snapshot.tracked,
            phase: snapshot.phase,
            pending_choice: snapshot.pending_choice,
            rng: RngState::default(),
            origin: None,
            actions: ActionCache::default(),
            library: Arc::default(),
        })
    }
}

impl CombatState {
    pub fn new(player: Player, monsters: Vec<Monster>, library: Arc<CardLibrary>, seed: u64) -> Self {
        Self {
            player,
            monsters,
            draw_pile: Vec::new(),
            hand: Vec::new(),
            discard_pile: Vec::new(),
            exhaust_pile: Vec::new(),
            gold: 0,
            relics: Vec::new(),
            potions: Vec::new(),
            turn: 1,
            tracked: TrackedState::default(),
            phase: CombatPhase::PlayerTurnActive,
            pending_choice: None,
            rng: RngState::from_seed(seed),
            origin: None,
            actions: ActionCache::default(),
            library,
        }
    }

    /// Independent copy whose `origin` points at the root-most real state.
    pub fn fork(&self) -> Self {
        let mut child = self.clone();
        child.origin = Some(match &self.origin {
            Some(root) => Arc::clone(root),
            None => Arc::new(self.clone()),
        });
        child
    }

    pub fn fork_with_seed(&self, seed: u64) -> Self {
        let mut child = self.fork();
        child.rng = RngState::from_seed(seed);
        child
    }

    /// Root-most ancestor, or `self` when this state was never forked.
    pub fn origin(&self) -> &CombatState {
        self.origin.as_deref().unwrap_or(self)
    }

    pub fn is_fork(&self) -> bool {
        self.origin.is_some()
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = RngState::from_seed(seed);
    }

    pub fn library(&self) -> &Arc<CardLibrary> {
        &self.library
    }

    /// Link every card and monster to its shared definition.
    pub fn attach_library(&mut self, library: Arc<CardLibrary>) {
        let mut missing = Vec::new();
        let mut link = |card: &mut Card| {
            match library.card_def(&card.id).or_else(|| library.card_def(&card.name)) {
                Some(def) => card.attach(Arc::clone(def)),
                None => missing.push(card.id.clone()),
            }
        };
        for card in self
            .draw_pile
            .iter_mut()
            .chain(self.hand.iter_mut())
            .chain(self.discard_pile.iter_mut())
            .chain(self.exhaust_pile.iter_mut())
        {
            link(card);
        }
        if let Some(pending) = self.pending_choice.as_mut() {
            for card in pending.offered.iter_mut().chain(pending.context.card.as_mut()) {
                link(card);
            }
        }
        for monster in &mut self.monsters {
            match library.monster_def(&monster.id) {
                Some(def) => monster.attach(Arc::clone(def)),
                None => warn!(monster = %monster.id, "no monster definition; moves are unknown"),
            }
        }
        missing.sort();
        missing.dedup();
        for id in missing {
            warn!(card = %id, "no card definition; card resolves with no effects");
        }
        self.library = library;
        self.actions.invalidate();
    }

    /// Player dead or no monster left standing.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal() || self.player.is_dead() || !self.any_monster_available()
    }

    pub fn awaiting_choice(&self) -> bool {
        self.pending_choice.is_some()
    }

    pub fn any_monster_available(&self) -> bool {
        self.monsters.iter().any(Monster::is_available)
    }

    pub fn available_monsters(&self) -> impl Iterator<Item = usize> + '_ {
        self.monsters
            .iter()
            .enumerate()
            .filter(|(_, monster)| monster.is_available())
            .map(|(idx, _)| idx)
    }

    pub fn monster_available(&self, idx: usize) -> bool {
        self.monsters.get(idx).is_some_and(Monster::is_available)
    }

    pub fn character(&self, actor: Actor) -> Option<&dyn Character> {
        match actor {
            Actor::Player => Some(&self.player),
            Actor::Monster(idx) => self.monsters.get(idx).map(|m| m as &dyn Character),
        }
    }

    pub fn character_mut(&mut self, actor: Actor) -> Option<&mut dyn Character> {
        match actor {
            Actor::Player => Some(&mut self.player),
            Actor::Monster(idx) => self.monsters.get_mut(idx).map(|m| m as &mut dyn Character),
        }
    }

    pub fn zone(&self, zone: CardZone) -> &Vec<Card> {
        match zone {
            CardZone::Hand => &self.hand,
            CardZone::DrawPile => &self.draw_pile,
            CardZone::DiscardPile => &self.discard_pile,
            CardZone::ExhaustPile => &self.exhaust_pile,
        }
    }

    pub fn zone_mut(&mut self, zone: CardZone) -> &mut Vec<Card> {
        match zone {
            CardZone::Hand => &mut self.hand,
            CardZone::DrawPile => &mut self.draw_pile,
            CardZone::DiscardPile => &mut self.discard_pile,
            CardZone::ExhaustPile => &mut self.exhaust_pile,
        }
    }

    pub fn locate(&self, uuid: &CardUuid) -> Option<(CardZone, usize)> {
        CardZone::ALL.into_iter().find_map(|zone| {
            self.zone(zone)
                .iter()
                .position(|card| card.uuid == *uuid)
                .map(|pos| (zone, pos))
        })
    }

    pub fn total_cards(&self) -> usize {
        CardZone::ALL.iter().map(|zone| self.zone(*zone).len()).sum()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile
            .iter()
            .chain(self.hand.iter())
            .chain(self.discard_pile.iter())
            .chain(self.exhaust_pile.iter())
    }

    pub fn potion_count(&self) -> usize {
        self.potions.iter().filter(|potion| !potion.is_empty()).count()
    }

    pub fn has_relic(&self, id: &str) -> bool {
        self.relics.iter().any(|relic| relic.id == id)
    }

    pub fn relic_mut(&mut self, id: &str) -> Option<&mut Relic> {
        self.relics.iter_mut().find(|relic| relic.id == id)
    }

    /// Increment a threshold relic. Returns true (and resets it) when it fires.
    pub(crate) fn bump_relic(&mut self, id: &str, threshold: i32) -> bool {
        let Some(relic) = self.relic_mut(id) else {
            return false;
        };
        relic.counter += 1;
        if relic.counter >= threshold {
            relic.counter = 0;
            return true;
        }
        false
    }

    pub(crate) fn next_uuid(&mut self) -> CardUuid {
        self.tracked.next_uuid += 1;
        CardUuid::new(format!("sim-{}", self.tracked.next_uuid))
    }

    pub(crate) fn invalidate_actions(&mut self) {
        self.actions.invalidate();
    }
}
