use super::*;
use crate::relics::*;
use crate::*;
use tracing::debug;

impl CombatState {
    /// Apply start-of-combat relics, innate cards and the opening draw. Runs once.
    pub fn begin_combat(&mut self) {
        if self.tracked.registered_start_of_combat {
            return;
        }
        self.tracked.registered_start_of_combat = true;
        self.invalidate_actions();
        self.turn = 1;
        self.phase = CombatPhase::StartingPlayerTurn;

        let mut draw = std::mem::take(&mut self.draw_pile);
        self.rng.shuffle(&mut draw);
        let (innate, rest): (Vec<Card>, Vec<Card>) = draw.into_iter().partition(|card| card.innate);
        self.draw_pile = rest;
        self.draw_pile.extend(innate);

        if self.has_relic(ANCHOR) {
            self.gain_block(Actor::Player, 10);
        }
        if self.has_relic(VAJRA) {
            self.apply_power(Actor::Player, PowerId::Strength, 1, Actor::Player);
        }
        if self.has_relic(ODDLY_SMOOTH_STONE) {
            self.apply_power(Actor::Player, PowerId::Dexterity, 1, Actor::Player);
        }
        if self.has_relic(BRONZE_SCALES) {
            self.apply_power(Actor::Player, PowerId::Thorns, 3, Actor::Player);
        }
        if self.has_relic(THREAD_AND_NEEDLE) {
            self.apply_power(Actor::Player, PowerId::PlatedArmor, 4, Actor::Player);
        }
        if self.has_relic(BLOOD_VIAL) {
            self.player.heal(2);
        }
        let monsters: Vec<usize> = self.available_monsters().collect();
        for idx in monsters {
            if self.has_relic(BAG_OF_MARBLES) {
                self.apply_power(Actor::Monster(idx), PowerId::Vulnerable, 1, Actor::Player);
            }
            if self.has_relic(RED_MASK) {
                self.apply_power(Actor::Monster(idx), PowerId::Weakened, 1, Actor::Player);
            }
            if self.monsters[idx].next_move.is_none() {
                self.roll_move(idx);
            }
        }

        self.player.energy = self.energy_per_turn();
        if self.has_relic(LANTERN) {
            self.player.energy += 1;
        }
        self.draw_cards(self.hand_draw());
        self.phase = CombatPhase::PlayerTurnActive;
        debug!(hand = self.hand.len(), energy = self.player.energy, "combat started");
    }

    /// Mark an observed state as already reflecting start-of-combat effects.
    pub fn register_start_of_combat(&mut self) {
        self.tracked.registered_start_of_combat = true;
    }

    fn energy_per_turn(&mut self) -> i32 {
        let relic_energy = self
            .relics
            .iter()
            .filter(|relic| ENERGY_RELICS.contains(&relic.id.as_str()))
            .count() as i32;
        let mut energy = BASE_ENERGY + relic_energy + self.player.power(&PowerId::Berserk);
        if self.tracked.art_of_war_ready {
            self.tracked.art_of_war_ready = false;
            energy += 1;
        }
        energy
    }

    fn hand_draw(&self) -> u32 {
        BASE_DRAW + if self.has_relic(SNECKO_EYE) { 2 } else { 0 }
    }

    /// Player ends the turn: cleanup, monster turn, end of round, next player turn.
    pub(crate) fn end_turn(&mut self) {
        self.end_player_turn();
        if self.fight_over() {
            return;
        }
        self.monsters_act();
        if self.fight_over() {
            return;
        }
        self.end_round();
        if self.fight_over() {
            return;
        }
        self.turn += 1;
        self.start_player_turn();
    }

    fn end_player_turn(&mut self) {
        self.phase = CombatPhase::EndingPlayerTurn;
        if self.has_relic(ORICHALCUM) && self.player.block == 0 {
            self.gain_block(Actor::Player, 6);
        }
        if self.has_relic(ART_OF_WAR) {
            self.tracked.art_of_war_ready = self.tracked.attacks_this_turn == 0;
        }

        let hand_size = self.hand.len() as i32;
        let hand_ids: Vec<String> = self.hand.iter().map(|card| card.id.clone()).collect();
        for id in hand_ids {
            match id.as_str() {
                "Burn" => {
                    self.receive_damage(Actor::Player, 2, DamageKind::Thorns);
                }
                "Decay" => {
                    self.receive_damage(Actor::Player, 2, DamageKind::Thorns);
                }
                "Regret" => {
                    self.receive_damage(Actor::Player, hand_size, DamageKind::HpLoss);
                }
                "Doubt" => self.apply_power(Actor::Player, PowerId::Weakened, 1, Actor::Player),
                "Shame" => self.apply_power(Actor::Player, PowerId::Frail, 1, Actor::Player),
                _ => {}
            }
        }

        let retain = self.has_relic(RUNIC_PYRAMID);
        let hand = std::mem::take(&mut self.hand);
        for card in hand {
            if card.ethereal {
                self.exhaust(card);
            } else if retain {
                self.hand.push(card);
            } else {
                self.discard_pile.push(card);
            }
        }
        for zone in CardZone::ALL {
            for card in self.zone_mut(zone) {
                card.cost_for_turn = None;
            }
        }

        let combust = self.player.power(&PowerId::Combust);
        if combust > 0 {
            self.receive_damage(Actor::Player, 1, DamageKind::HpLoss);
            self.damage_all_monsters(combust, DamageKind::Thorns);
        }
        let metallicize = self.player.power(&PowerId::Metallicize);
        if metallicize > 0 {
            self.player.add_block(metallicize);
        }
        let plated = self.player.power(&PowerId::PlatedArmor);
        if plated > 0 {
            self.player.add_block(plated);
        }
        let regen = self.player.power(&PowerId::Regeneration);
        if regen > 0 {
            self.player.heal(regen);
            self.player.powers.add(PowerId::Regeneration, -1);
        }

        let flex = self.player.power(&PowerId::LoseStrength);
        if flex > 0 {
            self.player.powers.add(PowerId::Strength, -flex);
        }
        for id in [
            PowerId::LoseStrength,
            PowerId::Rage,
            PowerId::NoDraw,
            PowerId::Entangled,
        ] {
            self.player.powers.remove(&id);
        }
    }

    /// Ritual, Metallicize, Regenerate and debuff decay for every creature.
    fn end_round(&mut self) {
        for idx in 0..self.monsters.len() {
            if !self.monster_available(idx) {
                continue;
            }
            let monster = &mut self.monsters[idx];
            tick_ritual(&mut monster.powers);
            let metallicize = monster.powers.amount(&PowerId::Metallicize);
            if metallicize > 0 {
                monster.add_block(metallicize);
            }
            let regenerate = monster.powers.amount(&PowerId::Regenerate);
            if regenerate > 0 {
                monster.heal(regenerate);
            }
            monster.powers.remove(&PowerId::Shackled);
            monster.powers.tick_round();
        }
        tick_ritual(&mut self.player.powers);
        self.player.powers.remove(&PowerId::Shackled);
        self.player.powers.tick_round();
    }

    fn start_player_turn(&mut self) {
        self.phase = CombatPhase::StartingPlayerTurn;
        if !self.player.has_power(&PowerId::Barricade) {
            let kept = if self.has_relic(CALIPERS) {
                (self.player.block - 15).max(0)
            } else {
                0
            };
            self.player.block = kept;
        }
        self.player.powers.remove(&PowerId::FlameBarrier);

        let leftover = if self.has_relic(ICE_CREAM) {
            self.player.energy
        } else {
            0
        };
        self.player.energy = leftover + self.energy_per_turn();

        let poison = self.player.power(&PowerId::Poison);
        if poison > 0 {
            self.receive_damage(Actor::Player, poison, DamageKind::HpLoss);
            self.player.powers.add(PowerId::Poison, -1);
            if self.fight_over() {
                return;
            }
        }

        if self.turn == 2 && self.has_relic(HORN_CLEAT) {
            self.gain_block(Actor::Player, 14);
        }
        if self.turn == 3 && self.has_relic(CAPTAINS_WHEEL) {
            self.gain_block(Actor::Player, 18);
        }
        if self.has_relic(MERCURY_HOURGLASS) {
            self.damage_all_monsters(3, DamageKind::Thorns);
        }
        if self.bump_relic(HAPPY_FLOWER, 3) {
            self.player.energy += 1;
        }
        let demon_form = self.player.power(&PowerId::DemonForm);
        if demon_form > 0 {
            self.player.powers.add(PowerId::Strength, demon_form);
        }

        let tracked = &mut self.tracked;
        tracked.attacks_this_turn = 0;
        tracked.skills_this_turn = 0;
        tracked.powers_this_turn = 0;
        tracked.cards_played_this_turn = 0;
        tracked.pellets_triggered = false;
        tracked.necronomicon_used = false;

        self.draw_cards(self.hand_draw());
        let brutality = self.player.power(&PowerId::Brutality);
        if brutality > 0 {
            self.receive_damage(Actor::Player, brutality, DamageKind::HpLoss);
            self.draw_cards(brutality as u32);
        }
        self.phase = CombatPhase::PlayerTurnActive;
        debug!(turn = self.turn, hand = self.hand.len(), energy = self.player.energy, "player turn");
    }
}

/// Ritual grants Strength, except in the round it was gained.
fn tick_ritual(powers: &mut Powers) {
    let Some(ritual) = powers.get_mut(&PowerId::Ritual) else {
        return;
    };
    if ritual.just_applied {
        ritual.just_applied = false;
        return;
    }
    let amount = ritual.amount;
    powers.add(PowerId::Strength, amount);
}
