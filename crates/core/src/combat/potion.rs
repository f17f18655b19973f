use super::*;
use crate::*;
use tracing::{debug, warn};

/// Effect list of a potion, keyed by the game's potion id.
pub fn potion_effects(id: &str) -> Option<Vec<Effect>> {
    let power = |id: PowerId, amount| Effect::power(TargetMode::SelfTarget, id, amount);
    let debuff = |id: PowerId, amount| Effect::power(TargetMode::One, id, amount);
    let effects = match id {
        "Fire Potion" => vec![Effect::on_one(EffectKind::DirectDamage { amount: 20 })],
        "Explosive Potion" => vec![Effect::on_all(EffectKind::DirectDamage { amount: 10 })],
        "Block Potion" => vec![Effect::block(12)],
        "Strength Potion" => vec![power(PowerId::Strength, 2)],
        "Dexterity Potion" => vec![power(PowerId::Dexterity, 2)],
        "Energy Potion" => vec![Effect::on_self(EffectKind::GainEnergy { amount: 2 })],
        "Swift Potion" => vec![Effect::draw(3)],
        "FearPotion" => vec![debuff(PowerId::Vulnerable, 3)],
        "Weak Potion" => vec![debuff(PowerId::Weakened, 3)],
        "Poison Potion" => vec![debuff(PowerId::Poison, 6)],
        "SteroidPotion" => vec![power(PowerId::Strength, 5), power(PowerId::LoseStrength, 5)],
        "Ancient Potion" => vec![power(PowerId::Artifact, 1)],
        "Regen Potion" => vec![power(PowerId::Regeneration, 5)],
        "BloodPotion" => vec![Effect::on_self(EffectKind::HealPercent { percent: 20 })],
        "LiquidBronze" => vec![power(PowerId::Thorns, 3)],
        "CultistPotion" => vec![power(PowerId::Ritual, 1)],
        "EssenceOfSteel" => vec![power(PowerId::PlatedArmor, 4)],
        "HeartOfIron" => vec![power(PowerId::Metallicize, 6)],
        "GhostInAJar" => vec![power(PowerId::Intangible, 1)],
        "Attack Potion" | "Skill Potion" | "Power Potion" => {
            let card_type = match id {
                "Attack Potion" => CardType::Attack,
                "Skill Potion" => CardType::Skill,
                _ => CardType::Power,
            };
            vec![Effect::on_self(EffectKind::RandomCardToHand {
                card_type,
                free_this_turn: true,
            })]
        }
        _ => return None,
    };
    Some(effects)
}

impl CombatState {
    pub(crate) fn use_potion(&mut self, slot: usize, target: Option<usize>) -> Result<(), SimError> {
        let potion = self
            .potions
            .get(slot)
            .cloned()
            .ok_or(SimError::InvalidPotionSlot(slot))?;
        if potion.is_empty() || !potion.can_use {
            return Err(SimError::InvalidPotionSlot(slot));
        }
        if potion.requires_target && !target.is_some_and(|idx| self.monster_available(idx)) {
            return Err(SimError::MissingTarget(target));
        }
        self.potions[slot] = Potion::empty();
        debug!(potion = %potion.id, ?target, "use potion");
        let Some(effects) = potion_effects(&potion.id) else {
            warn!(potion = %potion.id, "unmapped potion used without effect");
            return Ok(());
        };
        self.resolve_effects(&effects, &EffectContext::player(target))?;
        Ok(())
    }
}
