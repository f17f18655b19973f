use crate::relics::*;
use crate::*;
use tracing::debug;

/// How incoming damage interacts with block and triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    /// Attack damage from the given attacker.
    Attack(Actor),
    /// Non-attack damage that is still absorbed by block.
    Thorns,
    /// Direct HP loss; block is ignored.
    HpLoss,
}

/// Attack damage after Strength, Shackled, Weakened and Vulnerable.
pub fn calculate_real_damage(
    base: i32,
    attacker: &dyn Character,
    target: &dyn Character,
    relics: &[Relic],
) -> i32 {
    let has_relic = |id: &str| relics.iter().any(|relic| relic.id == id);
    let mut damage = f64::from(
        base + attacker.power(&PowerId::Strength) - attacker.power(&PowerId::Shackled),
    );
    if attacker.has_power(&PowerId::Weakened) {
        damage *= if !attacker.is_player() && has_relic(PAPER_KRANE) {
            0.60
        } else {
            0.75
        };
    }
    if target.has_power(&PowerId::Vulnerable) {
        damage *= match (target.is_player(), has_relic(PAPER_PHROG), has_relic(ODD_MUSHROOM)) {
            (false, true, _) => 1.75,
            (true, _, true) => 1.25,
            _ => 1.5,
        };
    }
    damage.floor().max(0.0) as i32
}

impl CombatState {
    fn actor_available(&self, actor: Actor) -> bool {
        match actor {
            Actor::Player => !self.player.is_dead(),
            Actor::Monster(idx) => self.monster_available(idx),
        }
    }

    /// One attack hit. Returns the HP the target lost.
    pub(crate) fn attack(&mut self, attacker: Actor, target: Actor, base: i32, doubled: bool) -> i32 {
        if !self.actor_available(attacker) || !self.actor_available(target) {
            return 0;
        }
        let damage = match (self.character(attacker), self.character(target)) {
            (Some(a), Some(t)) => calculate_real_damage(base, a, t, &self.relics),
            _ => return 0,
        };
        let damage = if doubled { damage * 2 } else { damage };
        self.receive_damage(target, damage, DamageKind::Attack(attacker))
    }

    /// Apply damage to `target`, absorbing block first. Returns HP lost.
    pub(crate) fn receive_damage(&mut self, target: Actor, amount: i32, kind: DamageKind) -> i32 {
        let has_torii = self.has_relic(TORII);
        let has_rod = self.has_relic(TUNGSTEN_ROD);
        let Some(character) = self.character_mut(target) else {
            return 0;
        };
        let was_alive = !character.is_dead();
        if !was_alive {
            return 0;
        }
        let is_player = character.is_player();
        let mut unblocked = match kind {
            DamageKind::HpLoss => amount.max(0),
            DamageKind::Attack(_) | DamageKind::Thorns => {
                let block = character.block();
                character.set_block((block - amount).max(0));
                (amount - block).max(0)
            }
        };
        if matches!(kind, DamageKind::Attack(_)) {
            if character.has_power(&PowerId::Intangible) {
                unblocked = unblocked.min(1);
            }
            if is_player && has_torii && unblocked > 1 && unblocked <= 5 {
                unblocked = 1;
            }
        }
        if is_player && has_rod {
            unblocked = (unblocked - 1).max(0);
        }
        let lost = character.lose_hp(unblocked);

        if let DamageKind::Attack(source) = kind {
            self.after_attacked(source, target, lost);
        }
        if is_player && lost > 0 {
            self.on_player_hp_lost();
        }
        let dead = self.character(target).is_some_and(|c| c.is_dead());
        if was_alive && dead {
            self.on_death(target);
        }
        lost
    }

    fn after_attacked(&mut self, source: Actor, target: Actor, lost: i32) {
        let retaliation = self.character(target).map_or(0, |c| {
            c.power(&PowerId::Thorns)
                + if c.is_player() {
                    c.power(&PowerId::FlameBarrier)
                } else {
                    0
                }
        });
        if retaliation > 0 && source != target {
            self.receive_damage(source, retaliation, DamageKind::Thorns);
        }
        if lost <= 0 {
            return;
        }
        if let Some(character) = self.character_mut(target) {
            if character.has_power(&PowerId::PlatedArmor) {
                character.powers_mut().add(PowerId::PlatedArmor, -1);
            }
        }
        let Actor::Monster(idx) = target else {
            return;
        };
        let Some(monster) = self.monsters.get_mut(idx) else {
            return;
        };
        if let Some(curl) = monster.powers.remove(&PowerId::CurlUp) {
            monster.add_block(curl.amount);
        }
        let angry = monster.powers.amount(&PowerId::Angry);
        if angry > 0 {
            monster.powers.add(PowerId::Strength, angry);
        }
        if monster.powers.has(&PowerId::ModeShift) {
            let left = monster.powers.add(PowerId::ModeShift, -lost);
            if left <= 0 && monster.is_available() {
                debug!(monster = %monster.id, "mode shift");
                monster.powers.remove(&PowerId::ModeShift);
                monster.add_block(20);
                monster.next_move = Some("Defensive Mode".to_string());
                monster.intent = Intent::Buff;
            }
        }
    }

    fn on_player_hp_lost(&mut self) {
        if let Some(puzzle) = self.relic_mut(CENTENNIAL_PUZZLE) {
            if puzzle.counter != SPENT {
                puzzle.counter = SPENT;
                self.draw_cards(3);
            }
        }
    }

    fn on_death(&mut self, target: Actor) {
        match target {
            Actor::Player => self.try_revive(),
            Actor::Monster(idx) => self.on_monster_death(idx),
        }
    }

    fn try_revive(&mut self) {
        if let Some(slot) = self.potions.iter().position(|p| p.id == "FairyPotion") {
            self.potions[slot] = Potion::empty();
            let heal = (self.player.max_hp * 30 / 100).max(1);
            debug!(heal, "fairy in a bottle revives the player");
            self.player.current_hp = heal;
            return;
        }
        let max_hp = self.player.max_hp;
        if let Some(tail) = self.relic_mut(LIZARD_TAIL) {
            if tail.counter != SPENT {
                tail.counter = SPENT;
                let heal = (max_hp / 2).max(1);
                debug!(heal, "lizard tail revives the player");
                self.player.current_hp = heal;
            }
        }
    }

    fn on_monster_death(&mut self, idx: usize) {
        let Some(monster) = self.monsters.get_mut(idx) else {
            return;
        };
        let spores = monster.powers.amount(&PowerId::SporeCloud);
        monster.powers.clear();
        monster.block = 0;
        debug!(monster = %monster.id, slot = idx, "monster died");
        if spores > 0 {
            self.apply_power(
                Actor::Player,
                PowerId::Vulnerable,
                spores,
                Actor::Monster(idx),
            );
        }
        if let Some(gold) = self.tracked.stolen_gold.remove(&idx) {
            self.gold += gold;
        }
        if self.has_relic(GREMLIN_HORN) && self.any_monster_available() {
            self.player.energy += 1;
            self.draw_cards(1);
        }
    }

    /// Apply a power, letting Artifact negate debuffs.
    pub(crate) fn apply_power(&mut self, target: Actor, id: PowerId, amount: i32, source: Actor) {
        if amount == 0 {
            return;
        }
        let Some(character) = self.character_mut(target) else {
            return;
        };
        if character.is_dead() {
            return;
        }
        let debuff = id.kind(amount) == PowerKind::Debuff;
        if debuff && character.power(&PowerId::Artifact) > 0 {
            character.powers_mut().add(PowerId::Artifact, -1);
            return;
        }
        let from_monster = matches!(source, Actor::Monster(_));
        let fresh = (debuff && from_monster && character.is_player())
            || (id == PowerId::Ritual && from_monster);
        let powers = character.powers_mut();
        powers.add(id.clone(), amount);
        if fresh {
            powers.mark_just_applied(&id);
        }
    }

    /// Gain block as the player would: Dexterity and Frail apply, Juggernaut fires.
    pub(crate) fn gain_block(&mut self, actor: Actor, amount: i32) {
        let gained = match actor {
            Actor::Player => {
                let mut block = f64::from(amount + self.player.power(&PowerId::Dexterity));
                if self.player.has_power(&PowerId::Frail) {
                    block *= 0.75;
                }
                block.floor().max(0.0) as i32
            }
            Actor::Monster(_) => amount.max(0),
        };
        if gained <= 0 {
            return;
        }
        if let Some(character) = self.character_mut(actor) {
            character.add_block(gained);
        }
        if actor == Actor::Player {
            self.on_player_block_gained();
        }
    }

    pub(crate) fn on_player_block_gained(&mut self) {
        let juggernaut = self.player.power(&PowerId::Juggernaut);
        if juggernaut > 0 {
            if let Some(idx) = self.random_monster() {
                self.receive_damage(Actor::Monster(idx), juggernaut, DamageKind::Thorns);
            }
        }
    }

    /// Uniformly random available monster.
    pub(crate) fn random_monster(&mut self) -> Option<usize> {
        let available: Vec<usize> = self.available_monsters().collect();
        if available.is_empty() {
            return None;
        }
        Some(available[self.rng.gen_index(available.len())])
    }

    pub(crate) fn damage_all_monsters(&mut self, amount: i32, kind: DamageKind) -> i32 {
        let targets: Vec<usize> = self.available_monsters().collect();
        targets
            .into_iter()
            .map(|idx| match kind {
                DamageKind::Attack(attacker) => self.attack(attacker, Actor::Monster(idx), amount, false),
                _ => self.receive_damage(Actor::Monster(idx), amount, kind),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weakened_monster_hits_softer_with_paper_krane() {
        let mut monster = Monster::new("m", "m", 0, 20);
        monster.powers.add(PowerId::Weakened, 1);
        let player = Player::new(50, 50);
        let relics = vec![Relic::new(PAPER_KRANE)];
        assert_eq!(calculate_real_damage(10, &monster, &player, &[]), 7);
        assert_eq!(calculate_real_damage(10, &monster, &player, &relics), 6);
    }

    #[test]
    fn odd_mushroom_softens_vulnerable_player() {
        let monster = Monster::new("m", "m", 0, 20);
        let mut player = Player::new(50, 50);
        player.powers.add(PowerId::Vulnerable, 1);
        let relics = vec![Relic::new(ODD_MUSHROOM)];
        assert_eq!(calculate_real_damage(10, &monster, &player, &[]), 15);
        assert_eq!(calculate_real_damage(10, &monster, &player, &relics), 12);
    }

    #[test]
    fn damage_never_negative() {
        let mut player = Player::new(50, 50);
        player.powers.add(PowerId::Strength, -20);
        let monster = Monster::new("m", "m", 0, 20);
        assert_eq!(calculate_real_damage(6, &player, &monster, &[]), 0);
    }
}
