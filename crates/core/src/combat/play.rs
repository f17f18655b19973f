use super::*;
use crate::relics::*;
use crate::*;
use tracing::debug;

impl CombatState {
    /// Energy the card costs right now, before X-cost handling.
    pub fn effective_cost(&self, card: &Card) -> i32 {
        if card.free_once {
            return 0;
        }
        if let Some(cost) = card.cost_for_turn {
            return cost;
        }
        if card.card_type == CardType::Skill && self.player.has_power(&PowerId::Corruption) {
            return 0;
        }
        card.cost
    }

    /// Whether `card` could be played from hand, ignoring targets.
    pub fn check_playable(&self, card: &Card) -> Result<(), SimError> {
        if card.is_unplayable() {
            return Err(SimError::Unplayable(card.name.clone()));
        }
        if card.card_type == CardType::Attack && self.player.has_power(&PowerId::Entangled) {
            return Err(SimError::Unplayable(card.name.clone()));
        }
        if card.id == "Clash" && self.hand.iter().any(|c| c.card_type != CardType::Attack) {
            return Err(SimError::Unplayable(card.name.clone()));
        }
        if card.is_x_cost() && !card.free_once {
            return Ok(());
        }
        let cost = self.effective_cost(card);
        if cost > self.player.energy {
            return Err(SimError::NotEnoughEnergy {
                cost,
                energy: self.player.energy,
            });
        }
        Ok(())
    }

    pub(crate) fn play_card(&mut self, uuid: &CardUuid, target: Option<usize>) -> Result<(), SimError> {
        let pos = self
            .hand
            .iter()
            .position(|card| card.uuid == *uuid)
            .ok_or_else(|| SimError::CardNotInHand(uuid.clone()))?;
        self.check_playable(&self.hand[pos])?;
        if self.hand[pos].has_target && !target.is_some_and(|idx| self.monster_available(idx)) {
            return Err(SimError::MissingTarget(target));
        }

        let mut card = self.hand.remove(pos);
        let energy_spent = if card.is_x_cost() && !card.free_once {
            let spent = self.player.energy;
            self.player.energy = 0;
            spent + if self.has_relic(CHEMICAL_X) { 2 } else { 0 }
        } else {
            let cost = self.effective_cost(&card).max(0);
            self.player.energy -= cost;
            cost
        };
        card.free_once = false;
        debug!(card = %card.name, ?target, energy_spent, "play card");

        let mut ctx = EffectContext::card_play(card.clone(), target, energy_spent);
        if card.card_type == CardType::Attack {
            if self.relic_counter(PEN_NIB) == Some(9) {
                ctx.double_damage = true;
            }
            if self.player.power(&PowerId::DoubleTap) > 0 {
                self.player.powers.add(PowerId::DoubleTap, -1);
                ctx.replays += 1;
            }
            if self.has_relic(NECRONOMICON) && energy_spent >= 2 && !self.tracked.necronomicon_used {
                self.tracked.necronomicon_used = true;
                ctx.replays += 1;
            }
        }

        let effects = card.effects().to_vec();
        let corrupted = card.card_type == CardType::Skill && self.player.has_power(&PowerId::Corruption);
        match card.card_type {
            CardType::Power => {}
            _ if card.exhausts || corrupted => self.exhaust(card),
            _ => self.discard_pile.push(card),
        }

        if self.resolve_effects(&effects, &ctx)? == Flow::Suspended {
            return Ok(());
        }
        self.finish_play(ctx)
    }

    fn relic_counter(&self, id: &str) -> Option<i32> {
        self.relics.iter().find(|relic| relic.id == id).map(|relic| relic.counter)
    }

    /// Post-play triggers, then any owed replays.
    pub(crate) fn finish_play(&mut self, ctx: EffectContext) -> Result<(), SimError> {
        let Some(card) = ctx.card.clone() else {
            return Ok(());
        };
        if !ctx.is_replay {
            self.after_card_played(&card);
        }
        if ctx.replays == 0 || self.fight_over() {
            return Ok(());
        }
        let target = match ctx.target {
            Some(idx) if self.monster_available(idx) => Some(idx),
            Some(_) => self.random_monster(),
            None => None,
        };
        debug!(card = %card.name, "replay");
        let replay = EffectContext {
            target,
            replays: ctx.replays - 1,
            is_replay: true,
            double_damage: false,
            ..ctx
        };
        let effects = card.effects().to_vec();
        if self.resolve_effects(&effects, &replay)? == Flow::Suspended {
            return Ok(());
        }
        self.finish_play(replay)
    }

    fn after_card_played(&mut self, card: &Card) {
        self.tracked.cards_played_this_turn += 1;
        match card.card_type {
            CardType::Attack => {
                self.tracked.attacks_this_turn += 1;
                if self.bump_relic(SHURIKEN, 3) {
                    self.apply_power(Actor::Player, PowerId::Strength, 1, Actor::Player);
                }
                if self.bump_relic(KUNAI, 3) {
                    self.apply_power(Actor::Player, PowerId::Dexterity, 1, Actor::Player);
                }
                if self.bump_relic(ORNAMENTAL_FAN, 3) {
                    self.gain_block(Actor::Player, 4);
                }
                if self.bump_relic(NUNCHAKU, 10) {
                    self.player.energy += 1;
                }
                self.bump_relic(PEN_NIB, 10);
            }
            CardType::Skill => {
                self.tracked.skills_this_turn += 1;
                if self.bump_relic(LETTER_OPENER, 3) {
                    self.damage_all_monsters(5, DamageKind::Thorns);
                }
            }
            CardType::Power => {
                self.tracked.powers_this_turn += 1;
                if self.has_relic(BIRD_FACED_URN) {
                    self.player.heal(2);
                }
            }
            CardType::Status | CardType::Curse => {}
        }
        if card.card_type == CardType::Attack {
            let rage = self.player.power(&PowerId::Rage);
            if rage > 0 {
                self.gain_block(Actor::Player, rage);
            }
            let spikes: Vec<(usize, i32)> = self
                .available_monsters()
                .map(|idx| (idx, self.monsters[idx].powers.amount(&PowerId::SharpHide)))
                .filter(|(_, amount)| *amount > 0)
                .collect();
            for (_, amount) in spikes {
                self.receive_damage(Actor::Player, amount, DamageKind::Thorns);
            }
        }
        if card.card_type == CardType::Skill {
            let enraged: Vec<(usize, i32)> = self
                .available_monsters()
                .map(|idx| (idx, self.monsters[idx].powers.amount(&PowerId::Enrage)))
                .filter(|(_, amount)| *amount > 0)
                .collect();
            for (idx, amount) in enraged {
                self.apply_power(Actor::Monster(idx), PowerId::Strength, amount, Actor::Monster(idx));
            }
        }
        let pains = self.hand.iter().filter(|c| c.id == "Pain").count() as i32;
        if pains > 0 {
            self.receive_damage(Actor::Player, pains, DamageKind::HpLoss);
        }
        let tracked = &self.tracked;
        if self.has_relic(ORANGE_PELLETS)
            && !tracked.pellets_triggered
            && tracked.attacks_this_turn > 0
            && tracked.skills_this_turn > 0
            && tracked.powers_this_turn > 0
        {
            self.tracked.pellets_triggered = true;
            self.player.powers.remove_debuffs();
        }
    }
}
