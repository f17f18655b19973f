use super::*;
use crate::relics::*;
use crate::*;
use std::sync::Arc;
use tracing::{debug, warn};

impl CombatState {
    /// Draw `count` cards, reshuffling the discard pile when the draw pile runs out.
    pub fn draw_cards(&mut self, count: u32) {
        if self.player.has_power(&PowerId::NoDraw) {
            debug!(count, "draw blocked by No Draw");
            return;
        }
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.reshuffle();
            }
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            let (id, card_type) = (card.id.clone(), card.card_type);
            if self.hand.len() >= MAX_HAND_SIZE {
                // Draw triggers only fire for cards that reach the hand.
                self.discard_pile.push(card);
                continue;
            }
            self.hand.push(card);
            self.on_card_drawn(&id, card_type);
        }
    }

    fn on_card_drawn(&mut self, id: &str, card_type: CardType) {
        if id == "Void" {
            self.player.energy = (self.player.energy - 1).max(0);
        }
        if matches!(card_type, CardType::Status | CardType::Curse) {
            let breath = self.player.power(&PowerId::FireBreathing);
            if breath > 0 {
                self.damage_all_monsters(breath, DamageKind::Thorns);
            }
        }
        if card_type == CardType::Status {
            let evolve = self.player.power(&PowerId::Evolve);
            if evolve > 0 {
                self.draw_cards(evolve as u32);
            }
        }
    }

    /// Move the whole discard pile into the draw pile in random order.
    pub fn reshuffle(&mut self) {
        let mut cards = std::mem::take(&mut self.discard_pile);
        self.rng.shuffle(&mut cards);
        debug!(cards = cards.len(), "reshuffle discard into draw pile");
        cards.append(&mut self.draw_pile);
        self.draw_pile = cards;
        self.tracked.reshuffles += 1;
        if self.bump_relic(SUNDIAL, 3) {
            self.player.energy += 2;
        }
        if self.has_relic(ABACUS) {
            self.gain_block(Actor::Player, 6);
        }
    }

    /// Put a card into the hand, spilling to the discard pile when the hand is full.
    pub(crate) fn add_to_hand(&mut self, card: Card) {
        if self.hand.len() >= MAX_HAND_SIZE {
            self.discard_pile.push(card);
        } else {
            self.hand.push(card);
        }
    }

    pub(crate) fn add_to_zone(&mut self, card: Card, zone: CardZone) {
        match zone {
            CardZone::Hand => self.add_to_hand(card),
            CardZone::DrawPile => {
                let pos = self.rng.gen_index(self.draw_pile.len() + 1);
                self.draw_pile.insert(pos, card);
            }
            CardZone::DiscardPile => self.discard_pile.push(card),
            CardZone::ExhaustPile => self.exhaust_pile.push(card),
        }
    }

    /// Create `count` new cards from the library and place them.
    pub(crate) fn create_cards(&mut self, name: &str, zone: CardZone, count: u32, upgraded: bool) {
        let library = Arc::clone(self.library());
        for _ in 0..count {
            let uuid = self.next_uuid();
            match library.make_card(name, uuid, u32::from(upgraded)) {
                Some(card) => self.add_to_zone(card, zone),
                None => {
                    warn!(card = name, "cannot create card without a definition");
                    return;
                }
            }
        }
    }

    /// Copy of `card` with a fresh uuid.
    pub(crate) fn copy_card(&mut self, card: &Card) -> Card {
        let mut copy = card.clone();
        copy.uuid = self.next_uuid();
        copy.free_once = false;
        copy
    }

    /// Exhaust a card that is already out of its zone.
    pub(crate) fn exhaust(&mut self, card: Card) {
        let sentinel = card.id == "Sentinel";
        let upgraded = card.upgrades > 0;
        self.exhaust_pile.push(card);
        self.on_exhaust(sentinel, upgraded);
    }

    pub(crate) fn exhaust_from_hand(&mut self, uuid: &CardUuid) {
        if let Some(pos) = self.hand.iter().position(|card| card.uuid == *uuid) {
            let card = self.hand.remove(pos);
            self.exhaust(card);
        }
    }

    fn on_exhaust(&mut self, sentinel: bool, upgraded: bool) {
        let feel_no_pain = self.player.power(&PowerId::FeelNoPain);
        if feel_no_pain > 0 {
            self.gain_block(Actor::Player, feel_no_pain);
        }
        let dark_embrace = self.player.power(&PowerId::DarkEmbrace);
        if dark_embrace > 0 {
            self.draw_cards(dark_embrace as u32);
        }
        if sentinel {
            self.player.energy += if upgraded { 3 } else { 2 };
        }
        if self.has_relic(CHARONS_ASHES) {
            self.damage_all_monsters(3, DamageKind::Thorns);
        }
    }
}
