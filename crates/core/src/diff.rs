//! Structural comparison of two observations, used to check simulated
//! transitions against what the game actually did.

use crate::{
    apply_action, Action, CardType, CardUuid, CardZone, CombatState, GameSnapshot, Intent,
    Monster, Potion, Powers, Relic, SimError,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarField {
    CurrentHp,
    MaxHp,
    Block,
    Energy,
    Gold,
    Floor,
    Act,
    Turn,
}

impl ScalarField {
    pub fn label(self) -> &'static str {
        match self {
            Self::CurrentHp => "current_hp",
            Self::MaxHp => "max_hp",
            Self::Block => "block",
            Self::Energy => "energy",
            Self::Gold => "gold",
            Self::Floor => "floor",
            Self::Act => "act",
            Self::Turn => "turn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    RoomPhase,
    RoomType,
    ScreenType,
}

impl TextField {
    pub fn label(self) -> &'static str {
        match self {
            Self::RoomPhase => "room_phase",
            Self::RoomType => "room_type",
            Self::ScreenType => "screen_type",
        }
    }
}

/// How a card moved between zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMotion {
    Drawn,
    Discarded,
    Exhausted,
    Exhumed,
    HandToDeck,
    DiscardToHand,
    DeckToDiscard,
    DiscardToDeck,
    Discovered,
    DiscoveredToDeck,
    DiscoveredToDiscard,
    Upgraded,
    PowerPlayed,
    ExhaustedFromDeck,
}

impl CardMotion {
    pub fn label(self) -> &'static str {
        match self {
            Self::Drawn => "drawn",
            Self::Discarded => "discarded",
            Self::Exhausted => "exhausted",
            Self::Exhumed => "exhumed",
            Self::HandToDeck => "hand_to_deck",
            Self::DiscardToHand => "discard_to_hand",
            Self::DeckToDiscard => "deck_to_discard",
            Self::DiscardToDeck => "discard_to_deck",
            Self::Discovered => "discovered",
            Self::DiscoveredToDeck => "discovered_to_deck",
            Self::DiscoveredToDiscard => "discovered_to_discard",
            Self::Upgraded => "upgraded",
            Self::PowerPlayed => "power_played",
            Self::ExhaustedFromDeck => "exhausted_from_deck",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableCause {
    Died,
    HalfDead,
    Escaped,
    /// The monster record is absent from the later observation.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    Scalar {
        field: ScalarField,
        before: i64,
        after: i64,
    },
    Text {
        field: TextField,
        before: String,
        after: String,
    },
    ChoiceAdded {
        choice: String,
    },
    ChoiceRemoved {
        choice: String,
    },
    RelicGained {
        relic: String,
    },
    RelicLost {
        relic: String,
    },
    RelicCounter {
        relic: String,
        before: i32,
        after: i32,
    },
    DeckAdded {
        card: String,
        uuid: CardUuid,
    },
    DeckRemoved {
        card: String,
        uuid: CardUuid,
    },
    DeckUpgraded {
        card: String,
        uuid: CardUuid,
    },
    PotionSlot {
        slot: usize,
        before: String,
        after: String,
    },
    PlayerPower {
        power: String,
        before: i32,
        after: i32,
    },
    MonsterHp {
        monster: String,
        index: usize,
        before: i32,
        after: i32,
    },
    MonsterBlock {
        monster: String,
        index: usize,
        before: i32,
        after: i32,
    },
    MonsterPower {
        monster: String,
        index: usize,
        power: String,
        before: i32,
        after: i32,
    },
    MonsterIntent {
        monster: String,
        index: usize,
        before: Intent,
        after: Intent,
    },
    MonsterNotAvailable {
        monster: String,
        index: usize,
        cause: UnavailableCause,
    },
    MonsterReturned {
        monster: String,
        index: usize,
    },
    MonsterAppeared {
        monster: String,
        index: usize,
    },
    CardMoved {
        card: String,
        uuid: CardUuid,
        motion: CardMotion,
    },
    UnknownChange {
        card: String,
        uuid: CardUuid,
        prior: Vec<CardZone>,
        now: Vec<CardZone>,
    },
}

fn zones_label(zones: &[CardZone]) -> String {
    if zones.is_empty() {
        return "none".to_string();
    }
    zones.iter().map(|zone| zone.label()).collect::<Vec<_>>().join("+")
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { field, before, after } => {
                write!(f, "{}: {before} -> {after}", field.label())
            }
            Self::Text { field, before, after } => {
                write!(f, "{}: {before:?} -> {after:?}", field.label())
            }
            Self::ChoiceAdded { choice } => write!(f, "choice added: {choice}"),
            Self::ChoiceRemoved { choice } => write!(f, "choice removed: {choice}"),
            Self::RelicGained { relic } => write!(f, "relic gained: {relic}"),
            Self::RelicLost { relic } => write!(f, "relic lost: {relic}"),
            Self::RelicCounter { relic, before, after } => {
                write!(f, "relic {relic} counter: {before} -> {after}")
            }
            Self::DeckAdded { card, uuid } => write!(f, "deck added: {card} ({uuid})"),
            Self::DeckRemoved { card, uuid } => write!(f, "deck removed: {card} ({uuid})"),
            Self::DeckUpgraded { card, uuid } => write!(f, "deck upgraded: {card} ({uuid})"),
            Self::PotionSlot { slot, before, after } => {
                write!(f, "potion slot {slot}: {before} -> {after}")
            }
            Self::PlayerPower { power, before, after } => {
                write!(f, "player {power}: {before} -> {after}")
            }
            Self::MonsterHp { monster, index, before, after } => {
                write!(f, "{monster}#{index} hp: {before} -> {after}")
            }
            Self::MonsterBlock { monster, index, before, after } => {
                write!(f, "{monster}#{index} block: {before} -> {after}")
            }
            Self::MonsterPower { monster, index, power, before, after } => {
                write!(f, "{monster}#{index} {power}: {before} -> {after}")
            }
            Self::MonsterIntent { monster, index, before, after } => {
                write!(f, "{monster}#{index} intent: {before:?} -> {after:?}")
            }
            Self::MonsterNotAvailable { monster, index, cause } => {
                write!(f, "{monster}#{index} not available: {cause:?}")
            }
            Self::MonsterReturned { monster, index } => write!(f, "{monster}#{index} returned"),
            Self::MonsterAppeared { monster, index } => write!(f, "{monster}#{index} appeared"),
            Self::CardMoved { card, uuid, motion } => {
                write!(f, "{}: {card} ({uuid})", motion.label())
            }
            Self::UnknownChange { card, uuid, prior, now } => write!(
                f,
                "unknown_change: {card} ({uuid}) {} -> {}",
                zones_label(prior),
                zones_label(now)
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDelta {
    pub changes: Vec<Change>,
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// Classified motion of one card, if it moved.
    pub fn motion_of(&self, uuid: &CardUuid) -> Option<CardMotion> {
        self.changes.iter().find_map(|change| match change {
            Change::CardMoved { uuid: moved, motion, .. }
                if moved == uuid && *motion != CardMotion::Upgraded =>
            {
                Some(*motion)
            }
            _ => None,
        })
    }

    pub fn count_motion(&self, motion: CardMotion) -> usize {
        self.changes
            .iter()
            .filter(|change| matches!(change, Change::CardMoved { motion: m, .. } if *m == motion))
            .count()
    }

    fn scalar(&mut self, field: ScalarField, before: impl Into<i64>, after: impl Into<i64>) {
        let (before, after) = (before.into(), after.into());
        if before != after {
            self.changes.push(Change::Scalar { field, before, after });
        }
    }

    fn text(&mut self, field: TextField, before: &str, after: &str) {
        if before != after {
            self.changes.push(Change::Text {
                field,
                before: before.to_string(),
                after: after.to_string(),
            });
        }
    }
}

impl fmt::Display for StateDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for change in &self.changes {
            writeln!(f, "{change}")?;
        }
        Ok(())
    }
}

/// Compare two whole-game observations.
pub fn diff(before: &GameSnapshot, after: &GameSnapshot) -> StateDelta {
    let mut delta = StateDelta::default();
    delta.scalar(ScalarField::Floor, before.floor, after.floor);
    delta.scalar(ScalarField::Act, before.act, after.act);
    delta.text(TextField::RoomPhase, &before.room_phase, &after.room_phase);
    delta.text(TextField::RoomType, &before.room_type, &after.room_type);
    delta.text(TextField::ScreenType, &before.screen_type, &after.screen_type);
    delta.scalar(ScalarField::CurrentHp, before.current_hp, after.current_hp);
    delta.scalar(ScalarField::MaxHp, before.max_hp, after.max_hp);
    delta.scalar(ScalarField::Gold, before.gold, after.gold);
    diff_choices(&mut delta, &before.choice_list, &after.choice_list);
    diff_relics(&mut delta, &before.relics, &after.relics);
    diff_deck(&mut delta, before, after);
    diff_potions(&mut delta, &before.potions, &after.potions);
    if let (Some(a), Some(b)) = (&before.combat, &after.combat) {
        diff_combat_body(&mut delta, a, b);
    }
    delta
}

/// Compare two combat states, including the fields a game snapshot keeps outside combat.
pub fn diff_combat(before: &CombatState, after: &CombatState) -> StateDelta {
    let mut delta = StateDelta::default();
    delta.scalar(ScalarField::CurrentHp, before.player.current_hp, after.player.current_hp);
    delta.scalar(ScalarField::MaxHp, before.player.max_hp, after.player.max_hp);
    delta.scalar(ScalarField::Gold, before.gold, after.gold);
    diff_relics(&mut delta, &before.relics, &after.relics);
    diff_potions(&mut delta, &before.potions, &after.potions);
    diff_combat_body(&mut delta, before, after);
    delta
}

fn diff_combat_body(delta: &mut StateDelta, before: &CombatState, after: &CombatState) {
    delta.scalar(ScalarField::Block, before.player.block, after.player.block);
    delta.scalar(ScalarField::Energy, before.player.energy, after.player.energy);
    delta.scalar(ScalarField::Turn, before.turn, after.turn);
    for (power, old, new) in power_changes(&before.player.powers, &after.player.powers) {
        delta.changes.push(Change::PlayerPower {
            power,
            before: old,
            after: new,
        });
    }
    diff_monsters(delta, &before.monsters, &after.monsters);
    diff_cards(delta, before, after);
}

fn diff_choices(delta: &mut StateDelta, before: &[String], after: &[String]) {
    let old: BTreeSet<&String> = before.iter().collect();
    let new: BTreeSet<&String> = after.iter().collect();
    for choice in new.difference(&old) {
        delta.changes.push(Change::ChoiceAdded {
            choice: (*choice).clone(),
        });
    }
    for choice in old.difference(&new) {
        delta.changes.push(Change::ChoiceRemoved {
            choice: (*choice).clone(),
        });
    }
}

fn diff_relics(delta: &mut StateDelta, before: &[Relic], after: &[Relic]) {
    let old: BTreeMap<&str, i32> = before.iter().map(|r| (r.id.as_str(), r.counter)).collect();
    let new: BTreeMap<&str, i32> = after.iter().map(|r| (r.id.as_str(), r.counter)).collect();
    for (id, counter) in &new {
        match old.get(id) {
            None => delta.changes.push(Change::RelicGained {
                relic: id.to_string(),
            }),
            Some(prev) if prev != counter => delta.changes.push(Change::RelicCounter {
                relic: id.to_string(),
                before: *prev,
                after: *counter,
            }),
            Some(_) => {}
        }
    }
    for id in old.keys().filter(|id| !new.contains_key(*id)) {
        delta.changes.push(Change::RelicLost {
            relic: id.to_string(),
        });
    }
}

fn diff_deck(delta: &mut StateDelta, before: &GameSnapshot, after: &GameSnapshot) {
    let old: BTreeMap<&CardUuid, (&str, u32)> = before
        .deck
        .iter()
        .map(|c| (&c.uuid, (c.name.as_str(), c.upgrades)))
        .collect();
    let new: BTreeMap<&CardUuid, (&str, u32)> = after
        .deck
        .iter()
        .map(|c| (&c.uuid, (c.name.as_str(), c.upgrades)))
        .collect();
    for (uuid, (name, upgrades)) in &new {
        match old.get(uuid) {
            None => delta.changes.push(Change::DeckAdded {
                card: name.to_string(),
                uuid: (*uuid).clone(),
            }),
            Some((_, prev)) if upgrades > prev => delta.changes.push(Change::DeckUpgraded {
                card: name.to_string(),
                uuid: (*uuid).clone(),
            }),
            Some(_) => {}
        }
    }
    for (uuid, (name, _)) in old.iter().filter(|(uuid, _)| !new.contains_key(*uuid)) {
        delta.changes.push(Change::DeckRemoved {
            card: name.to_string(),
            uuid: (*uuid).clone(),
        });
    }
}

fn diff_potions(delta: &mut StateDelta, before: &[Potion], after: &[Potion]) {
    let slot_id = |potions: &[Potion], slot: usize| {
        potions
            .get(slot)
            .map(|p| p.id.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    for slot in 0..before.len().max(after.len()) {
        let (old, new) = (slot_id(before, slot), slot_id(after, slot));
        if old != new {
            delta.changes.push(Change::PotionSlot {
                slot,
                before: old,
                after: new,
            });
        }
    }
}

fn power_changes(before: &Powers, after: &Powers) -> Vec<(String, i32, i32)> {
    let names: BTreeSet<String> = before
        .iter()
        .chain(after.iter())
        .map(|power| power.id.name().to_string())
        .collect();
    names
        .into_iter()
        .filter_map(|name| {
            let id = crate::PowerId::from(name.as_str());
            let (old, new) = (before.amount(&id), after.amount(&id));
            (old != new).then_some((name, old, new))
        })
        .collect()
}

fn unavailable_cause(monster: &Monster) -> UnavailableCause {
    if monster.is_gone {
        UnavailableCause::Escaped
    } else if monster.half_dead {
        UnavailableCause::HalfDead
    } else {
        UnavailableCause::Died
    }
}

fn diff_monsters(delta: &mut StateDelta, before: &[Monster], after: &[Monster]) {
    let key = |m: &Monster| (m.id.clone(), m.monster_index);
    let new: BTreeMap<(String, usize), &Monster> = after.iter().map(|m| (key(m), m)).collect();
    for old in before {
        let (monster, index) = key(old);
        let Some(now) = new.get(&(monster.clone(), index)) else {
            if old.is_available() {
                delta.changes.push(Change::MonsterNotAvailable {
                    monster,
                    index,
                    cause: UnavailableCause::Missing,
                });
            }
            continue;
        };
        match (old.is_available(), now.is_available()) {
            (true, false) => delta.changes.push(Change::MonsterNotAvailable {
                monster: monster.clone(),
                index,
                cause: unavailable_cause(now),
            }),
            (false, true) => delta.changes.push(Change::MonsterReturned {
                monster: monster.clone(),
                index,
            }),
            _ => {}
        }
        if old.current_hp != now.current_hp {
            delta.changes.push(Change::MonsterHp {
                monster: monster.clone(),
                index,
                before: old.current_hp,
                after: now.current_hp,
            });
        }
        if old.block != now.block {
            delta.changes.push(Change::MonsterBlock {
                monster: monster.clone(),
                index,
                before: old.block,
                after: now.block,
            });
        }
        if old.intent != now.intent && now.is_available() {
            delta.changes.push(Change::MonsterIntent {
                monster: monster.clone(),
                index,
                before: old.intent,
                after: now.intent,
            });
        }
        for (power, was, is) in power_changes(&old.powers, &now.powers) {
            delta.changes.push(Change::MonsterPower {
                monster: monster.clone(),
                index,
                power,
                before: was,
                after: is,
            });
        }
    }
    let old_keys: BTreeSet<(String, usize)> = before.iter().map(key).collect();
    for now in after.iter().filter(|m| !old_keys.contains(&key(m))) {
        delta.changes.push(Change::MonsterAppeared {
            monster: now.id.clone(),
            index: now.monster_index,
        });
    }
}

struct Seen {
    name: String,
    card_type: CardType,
    upgrades: u32,
    zones: Vec<CardZone>,
}

fn card_locations(state: &CombatState) -> BTreeMap<CardUuid, Seen> {
    let mut seen: BTreeMap<CardUuid, Seen> = BTreeMap::new();
    for zone in CardZone::ALL {
        for card in state.zone(zone) {
            seen.entry(card.uuid.clone())
                .or_insert_with(|| Seen {
                    name: card.name.clone(),
                    card_type: card.card_type,
                    upgrades: card.upgrades,
                    zones: Vec::new(),
                })
                .zones
                .push(zone);
        }
    }
    seen
}

/// Classify a zone transition; `None` means the move is not in the vocabulary.
fn classify(prior: &[CardZone], now: &[CardZone], card_type: CardType) -> Option<CardMotion> {
    use CardZone::*;
    let motion = match (prior, now) {
        ([DrawPile], [Hand]) => CardMotion::Drawn,
        ([Hand], [DiscardPile]) => CardMotion::Discarded,
        ([Hand], [ExhaustPile]) => CardMotion::Exhausted,
        ([ExhaustPile], [Hand]) => CardMotion::Exhumed,
        ([Hand], [DrawPile]) => CardMotion::HandToDeck,
        ([DiscardPile], [Hand]) => CardMotion::DiscardToHand,
        ([DrawPile], [DiscardPile]) => CardMotion::DeckToDiscard,
        ([DiscardPile], [DrawPile]) => CardMotion::DiscardToDeck,
        ([], [Hand]) => CardMotion::Discovered,
        ([], [DrawPile]) => CardMotion::DiscoveredToDeck,
        ([], [DiscardPile]) => CardMotion::DiscoveredToDiscard,
        ([Hand], []) if card_type == CardType::Power => CardMotion::PowerPlayed,
        ([DrawPile], [ExhaustPile]) => CardMotion::ExhaustedFromDeck,
        _ => return None,
    };
    Some(motion)
}

fn diff_cards(delta: &mut StateDelta, before: &CombatState, after: &CombatState) {
    let old = card_locations(before);
    let new = card_locations(after);
    let uuids: BTreeSet<&CardUuid> = old.keys().chain(new.keys()).collect();
    for uuid in uuids {
        let was = old.get(uuid);
        let is = new.get(uuid);
        let Some(seen) = is.or(was) else {
            continue;
        };
        let prior = was.map(|s| s.zones.as_slice()).unwrap_or(&[]);
        let now = is.map(|s| s.zones.as_slice()).unwrap_or(&[]);
        if prior != now {
            let change = match classify(prior, now, seen.card_type) {
                Some(motion) => Change::CardMoved {
                    card: seen.name.clone(),
                    uuid: uuid.clone(),
                    motion,
                },
                None => Change::UnknownChange {
                    card: seen.name.clone(),
                    uuid: uuid.clone(),
                    prior: prior.to_vec(),
                    now: now.to_vec(),
                },
            };
            delta.changes.push(change);
        }
        if let (Some(was), Some(is)) = (was, is) {
            if is.upgrades > was.upgrades {
                delta.changes.push(Change::CardMoved {
                    card: is.name.clone(),
                    uuid: uuid.clone(),
                    motion: CardMotion::Upgraded,
                });
            }
        }
    }
}

/// Simulate `action` on the real prior state and diff the prediction against
/// the real outcome. Every discrepancy is logged as a warning and returned.
pub fn check_prediction(
    real_before: &CombatState,
    action: &Action,
    real_after: &CombatState,
) -> Result<StateDelta, SimError> {
    let predicted = apply_action(real_before, action)?;
    let delta = diff_combat(&predicted, real_after);
    if !delta.is_empty() {
        warn!(
            %action,
            turn = real_before.turn,
            hp_before = real_before.player.current_hp,
            predicted_hp = predicted.player.current_hp,
            real_hp = real_after.player.current_hp,
            discrepancies = delta.len(),
            "simulation drift"
        );
        for change in delta.iter() {
            warn!(%action, %change, "predicted vs real");
        }
    }
    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CardZone::*;

    #[test]
    fn vocabulary_covers_common_moves() {
        assert_eq!(classify(&[DrawPile], &[Hand], CardType::Skill), Some(CardMotion::Drawn));
        assert_eq!(classify(&[Hand], &[], CardType::Power), Some(CardMotion::PowerPlayed));
        assert_eq!(classify(&[Hand], &[], CardType::Attack), None);
        assert_eq!(classify(&[DiscardPile], &[ExhaustPile], CardType::Skill), None);
    }

    #[test]
    fn display_renders_one_line_per_change() {
        let delta = StateDelta {
            changes: vec![
                Change::Scalar {
                    field: ScalarField::CurrentHp,
                    before: 50,
                    after: 44,
                },
                Change::UnknownChange {
                    card: "Strike".to_string(),
                    uuid: CardUuid::from("s1"),
                    prior: vec![Hand],
                    now: vec![],
                },
            ],
        };
        let text = delta.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("current_hp: 50 -> 44"));
        assert!(text.contains("unknown_change: Strike (s1) hand -> none"));
    }
}
