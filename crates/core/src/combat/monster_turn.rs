use super::*;
use crate::*;
use tracing::{debug, warn};

impl CombatState {
    pub(crate) fn monsters_act(&mut self) {
        self.phase = CombatPhase::MonsterTurnActive;
        for idx in 0..self.monsters.len() {
            if !self.monster_available(idx) {
                continue;
            }
            let monster = &mut self.monsters[idx];
            if !monster.powers.has(&PowerId::Barricade) {
                monster.block = 0;
            }
            let poison = monster.powers.amount(&PowerId::Poison);
            if poison > 0 {
                self.receive_damage(Actor::Monster(idx), poison, DamageKind::HpLoss);
                if let Some(monster) = self.monsters.get_mut(idx) {
                    monster.powers.add(PowerId::Poison, -1);
                }
                if !self.monster_available(idx) {
                    continue;
                }
            }
            self.take_monster_turn(idx);
            if self.fight_over() {
                break;
            }
        }
    }

    fn take_monster_turn(&mut self, idx: usize) {
        if self.monsters[idx].next_move.is_none() {
            self.roll_move(idx);
        }
        let monster = &self.monsters[idx];
        let Some(name) = monster.next_move.clone() else {
            debug!(monster = %monster.id, "no move known; monster idles");
            return;
        };
        let Some(def) = monster.definition().cloned() else {
            warn!(monster = %monster.id, next_move = %name, "no move table; turn skipped");
            return;
        };
        let Some(effects) = def.move_named(&name).map(|m| m.effects.clone()) else {
            warn!(monster = %monster.id, next_move = %name, "unknown move; turn skipped");
            self.monsters[idx].move_history.push(name);
            self.roll_move(idx);
            return;
        };
        debug!(monster = %monster.id, slot = idx, next_move = %name, "monster move");

        let ctx = EffectContext::monster(idx);
        for effect in &effects {
            if !self.monster_available(idx) || self.fight_over() {
                break;
            }
            if let Err(err) = self.resolve_effect(effect, &ctx) {
                warn!(%err, next_move = %name, "monster effect failed");
            }
        }
        if let Some(monster) = self.monsters.get_mut(idx) {
            monster.move_history.push(name.clone());
            // Mode Shift may have queued a move mid-turn; keep it.
            if monster.next_move.as_deref() == Some(name.as_str()) {
                monster.next_move = None;
            }
        }
        if self.monster_available(idx) && self.monsters[idx].next_move.is_none() {
            self.roll_move(idx);
        }
    }

    /// Pick the monster's next move: opening move, chained successor, or a
    /// weighted draw that honours repeat limits.
    pub fn roll_move(&mut self, idx: usize) {
        let Some(monster) = self.monsters.get(idx) else {
            return;
        };
        let Some(def) = monster.definition().cloned() else {
            return;
        };
        let last = monster.move_history.last().cloned();
        let chained = match &last {
            None => def.first_move.clone(),
            Some(last) => def.move_named(last).and_then(|m| m.next.clone()),
        };
        let name = match chained {
            Some(name) => Some(name),
            None => {
                let weights: Vec<f64> = def
                    .moves
                    .iter()
                    .map(|m| match m.max_repeats {
                        Some(limit) if monster.repeat_count(&m.name) >= limit => 0.0,
                        _ => m.weight,
                    })
                    .collect();
                self.rng
                    .pick_weighted(&weights)
                    .or_else(|| def.moves.iter().position(|m| m.weight > 0.0))
                    .map(|pos| def.moves[pos].name.clone())
            }
        };
        let intent = name
            .as_deref()
            .and_then(|name| def.move_named(name))
            .map(|m| m.intent)
            .unwrap_or_default();
        let monster = &mut self.monsters[idx];
        monster.next_move = name;
        monster.intent = intent;
    }
}
