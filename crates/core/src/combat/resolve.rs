use super::*;
use crate::*;
use std::sync::Arc;
use tracing::{debug, warn};

impl CombatState {
    /// Resolve effects in order. On suspension the unresolved tail is stored
    /// on the pending choice.
    pub(crate) fn resolve_effects(
        &mut self,
        effects: &[Effect],
        ctx: &EffectContext,
    ) -> Result<Flow, SimError> {
        for (pos, effect) in effects.iter().enumerate() {
            if self.fight_over() {
                break;
            }
            if self.resolve_effect(effect, ctx)? == Flow::Suspended {
                if let Some(pending) = self.pending_choice.as_mut() {
                    pending.remaining = effects[pos + 1..].to_vec();
                }
                return Ok(Flow::Suspended);
            }
        }
        Ok(Flow::Continue)
    }

    fn resolve_targets(&mut self, mode: TargetMode, ctx: &EffectContext) -> Result<Vec<Actor>, SimError> {
        let targets = match (ctx.actor, mode) {
            (actor, TargetMode::SelfTarget) => vec![actor],
            (Actor::Player, TargetMode::One) => {
                let idx = ctx.target.ok_or(SimError::MissingTarget(None))?;
                if self.monsters.get(idx).is_none() {
                    return Err(SimError::MissingTarget(Some(idx)));
                }
                // A target killed earlier in the same card is skipped, not an error.
                if self.monster_available(idx) {
                    vec![Actor::Monster(idx)]
                } else {
                    Vec::new()
                }
            }
            (Actor::Monster(_), TargetMode::One) => vec![Actor::Player],
            (_, TargetMode::All) => self.available_monsters().map(Actor::Monster).collect(),
            (_, TargetMode::Random) => self.random_monster().map(Actor::Monster).into_iter().collect(),
        };
        Ok(targets)
    }

    pub(crate) fn resolve_effect(&mut self, effect: &Effect, ctx: &EffectContext) -> Result<Flow, SimError> {
        let actor = ctx.actor;
        let targets = self.resolve_targets(effect.target, ctx)?;
        match &effect.kind {
            EffectKind::Damage { amount, hits } => {
                self.multi_hit(actor, &targets, *amount, *hits, ctx.double_damage);
            }
            EffectKind::DirectDamage { amount } => {
                for target in targets {
                    self.receive_damage(target, *amount, DamageKind::Thorns);
                }
            }
            EffectKind::Block { amount } => {
                for target in targets {
                    self.gain_block(target, *amount);
                }
            }
            EffectKind::ApplyPower { power, amount } => {
                for target in targets {
                    self.apply_power(target, power.clone(), *amount, actor);
                }
            }
            EffectKind::RemovePower { power } => {
                for target in targets {
                    if let Some(character) = self.character_mut(target) {
                        character.powers_mut().remove(power);
                    }
                }
            }
            EffectKind::Draw { count } => self.draw_cards(*count),
            EffectKind::GainEnergy { amount } => {
                self.player.energy = (self.player.energy + amount).max(0);
            }
            EffectKind::LoseHp { amount } => {
                for target in targets {
                    let lost = self.receive_damage(target, *amount, DamageKind::HpLoss);
                    if target == Actor::Player && ctx.card.is_some() && lost > 0 {
                        let rupture = self.player.power(&PowerId::Rupture);
                        self.player.powers.add(PowerId::Strength, rupture);
                    }
                }
            }
            EffectKind::Heal { amount } => {
                for target in targets {
                    if let Some(character) = self.character_mut(target) {
                        character.heal(*amount);
                    }
                }
            }
            EffectKind::HealPercent { percent } => {
                for target in targets {
                    if let Some(character) = self.character_mut(target) {
                        let amount = character.max_hp() * percent / 100;
                        character.heal(amount);
                    }
                }
            }
            EffectKind::GainGold { amount } => self.gold = (self.gold + amount).max(0),
            EffectKind::GainMaxHp { amount } => {
                for target in targets {
                    if let Some(character) = self.character_mut(target) {
                        let max_hp = character.max_hp() + amount;
                        character.set_max_hp(max_hp);
                        character.heal(*amount);
                    }
                }
            }
            EffectKind::AddCard {
                card,
                zone,
                count,
                upgraded,
            } => self.create_cards(card, *zone, *count, *upgraded),
            EffectKind::AddCopyOfPlayed { zone } => {
                if let Some(card) = ctx.card.as_ref() {
                    let copy = self.copy_card(card);
                    self.add_to_zone(copy, *zone);
                }
            }
            EffectKind::ExhaustRandomInHand { count } => {
                for _ in 0..*count {
                    if self.hand.is_empty() {
                        break;
                    }
                    let pos = self.rng.gen_index(self.hand.len());
                    let card = self.hand.remove(pos);
                    self.exhaust(card);
                }
            }
            EffectKind::ExhaustNonAttacks { block_each } => {
                let doomed: Vec<CardUuid> = self
                    .hand
                    .iter()
                    .filter(|card| card.card_type != CardType::Attack)
                    .map(|card| card.uuid.clone())
                    .collect();
                for uuid in doomed {
                    self.exhaust_from_hand(&uuid);
                    if *block_each > 0 {
                        self.gain_block(Actor::Player, *block_each);
                    }
                }
            }
            EffectKind::FiendFire { per_card } => {
                let burned: Vec<CardUuid> = self.hand.iter().map(|card| card.uuid.clone()).collect();
                let count = burned.len() as u32;
                for uuid in burned {
                    self.exhaust_from_hand(&uuid);
                }
                self.multi_hit(actor, &targets, *per_card, count, ctx.double_damage);
            }
            EffectKind::Choose { kind } => return Ok(self.begin_choice(*kind, ctx)),
            EffectKind::UpgradeHand => {
                for card in &mut self.hand {
                    card.upgrade();
                }
            }
            EffectKind::UpgradeAll => {
                for zone in CardZone::ALL {
                    for card in self.zone_mut(zone) {
                        card.upgrade();
                    }
                }
            }
            EffectKind::BodySlam => {
                let block = self.player.block;
                self.multi_hit(actor, &targets, block, 1, ctx.double_damage);
            }
            EffectKind::HeavyBlade {
                base,
                strength_multiplier,
            } => {
                let strength = self.character(actor).map_or(0, |c| c.power(&PowerId::Strength));
                let amount = base + strength * (strength_multiplier - 1);
                self.multi_hit(actor, &targets, amount, 1, ctx.double_damage);
            }
            EffectKind::PerfectedStrike { base, per_strike } => {
                let strikes = self
                    .draw_pile
                    .iter()
                    .chain(self.hand.iter())
                    .chain(self.discard_pile.iter())
                    .filter(|card| card.name.contains("Strike"))
                    .count() as i32;
                self.multi_hit(actor, &targets, base + per_strike * strikes, 1, ctx.double_damage);
            }
            EffectKind::SearingBlow => {
                let n = ctx.card.as_ref().map_or(0, |card| card.upgrades as i32);
                self.multi_hit(actor, &targets, 12 + n * (n + 7) / 2, 1, ctx.double_damage);
            }
            EffectKind::Whirlwind { amount } => {
                let hits = ctx.energy_spent.max(0) as u32;
                self.multi_hit(actor, &targets, *amount, hits, ctx.double_damage);
            }
            EffectKind::Rampage { base, increment } => {
                let bonus = ctx.card.as_ref().map_or(0, |card| self.current_misc(card));
                self.multi_hit(actor, &targets, base + bonus, 1, ctx.double_damage);
                if let Some(card) = ctx.card.as_ref() {
                    self.bump_misc(&card.uuid, *increment);
                }
            }
            EffectKind::Feed { amount, max_hp } => {
                for target in targets {
                    if self.strike_kills(actor, target, *amount, ctx.double_damage) {
                        let grown = self.player.max_hp + max_hp;
                        self.player.set_max_hp(grown);
                        self.player.heal(*max_hp);
                    }
                }
            }
            EffectKind::Reaper { amount } => {
                let mut healed = 0;
                for target in targets {
                    healed += self.attack(actor, target, *amount, ctx.double_damage);
                }
                self.player.heal(healed);
            }
            EffectKind::Dropkick { amount } => {
                for target in targets {
                    let vulnerable = self
                        .character(target)
                        .is_some_and(|c| c.has_power(&PowerId::Vulnerable));
                    self.attack(actor, target, *amount, ctx.double_damage);
                    if vulnerable {
                        self.player.energy += 1;
                        self.draw_cards(1);
                    }
                }
            }
            EffectKind::SpotWeakness { amount } => {
                for target in targets {
                    let attacking = match target {
                        Actor::Monster(idx) => self.monsters.get(idx).is_some_and(|m| m.intent.is_attack()),
                        Actor::Player => false,
                    };
                    if attacking {
                        self.apply_power(Actor::Player, PowerId::Strength, *amount, actor);
                    }
                }
            }
            EffectKind::HandOfGreed { amount, gold } => {
                for target in targets {
                    if self.strike_kills(actor, target, *amount, ctx.double_damage) {
                        self.gold += gold;
                    }
                }
            }
            EffectKind::Havoc => self.play_top_card(),
            EffectKind::DoubleBlock => {
                let block = self.player.block;
                if block > 0 {
                    self.player.add_block(block);
                    self.on_player_block_gained();
                }
            }
            EffectKind::DoubleStrength => {
                let strength = self.player.power(&PowerId::Strength);
                if strength > 0 {
                    self.player.powers.add(PowerId::Strength, strength);
                }
            }
            EffectKind::RandomCardToHand {
                card_type,
                free_this_turn,
            } => {
                let library = Arc::clone(self.library());
                match library.random_card_of_type(*card_type, &mut self.rng) {
                    Some(def) => {
                        let uuid = self.next_uuid();
                        let mut card = Card::from_def(def, uuid, 0);
                        if *free_this_turn {
                            card.cost_for_turn = Some(0);
                        }
                        self.add_to_hand(card);
                    }
                    None => warn!(card_type = ?card_type, "no card of this type to generate"),
                }
            }
            EffectKind::StealGold { amount } => {
                if let Actor::Monster(idx) = actor {
                    let stolen = (*amount).min(self.gold).max(0);
                    self.gold -= stolen;
                    *self.tracked.stolen_gold.entry(idx).or_insert(0) += stolen;
                }
            }
            EffectKind::Escape => {
                if let Actor::Monster(idx) = actor {
                    if let Some(monster) = self.monsters.get_mut(idx) {
                        debug!(monster = %monster.id, "monster escaped");
                        monster.is_gone = true;
                        monster.powers.clear();
                    }
                }
            }
            EffectKind::ResetModeShift => {
                if let Actor::Monster(idx) = actor {
                    let threshold = self.tracked.mode_shift_threshold.get(&idx).copied().unwrap_or(30) + 10;
                    self.tracked.mode_shift_threshold.insert(idx, threshold);
                    if let Some(monster) = self.monsters.get_mut(idx) {
                        monster.powers.remove(&PowerId::SharpHide);
                        monster.powers.set(PowerId::ModeShift, threshold);
                    }
                }
            }
            EffectKind::Unmapped { name } => {
                warn!(effect = %name, "unmapped effect skipped");
            }
        }
        Ok(Flow::Continue)
    }

    /// `hits` attack hits on every target, stopping early when the attacker
    /// falls or the player dies.
    fn multi_hit(&mut self, actor: Actor, targets: &[Actor], amount: i32, hits: u32, doubled: bool) {
        for _ in 0..hits {
            for target in targets {
                self.attack(actor, *target, amount, doubled);
            }
            if self.player.is_dead() {
                break;
            }
            if let Actor::Monster(idx) = actor {
                if !self.monster_available(idx) {
                    break;
                }
            }
        }
    }

    /// Single attack hit that reports whether it landed the killing blow on a non-minion.
    fn strike_kills(&mut self, actor: Actor, target: Actor, amount: i32, doubled: bool) -> bool {
        let minion = self
            .character(target)
            .is_some_and(|c| c.has_power(&PowerId::Minion));
        let was_alive = self.character(target).is_some_and(|c| !c.is_dead());
        self.attack(actor, target, amount, doubled);
        let dead = self.character(target).is_some_and(|c| c.is_dead());
        was_alive && dead && !minion
    }

    fn current_misc(&self, card: &Card) -> i32 {
        self.locate(&card.uuid)
            .map(|(zone, pos)| self.zone(zone)[pos].misc)
            .unwrap_or(card.misc)
    }

    fn bump_misc(&mut self, uuid: &CardUuid, delta: i32) {
        if let Some((zone, pos)) = self.locate(uuid) {
            self.zone_mut(zone)[pos].misc += delta;
        }
    }

    /// Havoc: play the top card of the draw pile against a random monster and exhaust it.
    fn play_top_card(&mut self) {
        if self.draw_pile.is_empty() && !self.discard_pile.is_empty() {
            self.reshuffle();
        }
        let Some(card) = self.draw_pile.pop() else {
            return;
        };
        let playable = !card.is_unplayable();
        let effects = card.effects().to_vec();
        let target = self.random_monster();
        let mut ctx = EffectContext::card_play(card.clone(), target, self.player.energy);
        ctx.is_replay = true;
        self.exhaust(card);
        if !playable {
            return;
        }
        match self.resolve_effects(&effects, &ctx) {
            Ok(Flow::Suspended) => debug!("havoc card suspended on a choice"),
            Ok(Flow::Continue) => {}
            Err(err) => warn!(%err, "havoc card failed to resolve"),
        }
    }
}
