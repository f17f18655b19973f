use crate::{
    CardDef, CardRarity, CardType, CardVariant, CardZone, ChoiceKind, Effect, EffectKind,
    PowerId, TargetMode, COST_UNPLAYABLE, COST_X,
};

use CardRarity::{Basic, Common, Rare, Special, Uncommon};
use CardType::{Attack, Curse, Power, Skill, Status};

fn variant(cost: i32, effects: Vec<Effect>) -> CardVariant {
    let targeted = effects.iter().any(|effect| effect.target == TargetMode::One);
    let variant = CardVariant::new(cost, effects);
    if targeted {
        variant.targeted()
    } else {
        variant
    }
}

fn card(
    id: &str,
    name: &str,
    card_type: CardType,
    rarity: CardRarity,
    base: CardVariant,
    upgraded: CardVariant,
) -> CardDef {
    CardDef {
        id: id.to_string(),
        name: name.to_string(),
        card_type,
        rarity,
        base,
        upgraded: Some(upgraded),
        multi_upgrade: false,
    }
}

/// Unplayable status or curse; never upgrades.
fn dead_card(id: &str, name: &str, card_type: CardType, base: CardVariant) -> CardDef {
    let rarity = match card_type {
        Curse => CardRarity::Curse,
        _ => Special,
    };
    CardDef {
        id: id.to_string(),
        name: name.to_string(),
        card_type,
        rarity,
        base,
        upgraded: None,
        multi_upgrade: false,
    }
}

fn dmg(amount: i32) -> Effect {
    Effect::damage(amount)
}

fn hits(amount: i32, hits: u32) -> Effect {
    Effect::on_one(EffectKind::Damage { amount, hits })
}

fn dmg_all(amount: i32) -> Effect {
    Effect::on_all(EffectKind::Damage { amount, hits: 1 })
}

fn block(amount: i32) -> Effect {
    Effect::block(amount)
}

fn buff(power: PowerId, amount: i32) -> Effect {
    Effect::power(TargetMode::SelfTarget, power, amount)
}

fn debuff(power: PowerId, amount: i32) -> Effect {
    Effect::power(TargetMode::One, power, amount)
}

fn debuff_all(power: PowerId, amount: i32) -> Effect {
    Effect::power(TargetMode::All, power, amount)
}

fn draw(count: u32) -> Effect {
    Effect::draw(count)
}

fn energy(amount: i32) -> Effect {
    Effect::on_self(EffectKind::GainEnergy { amount })
}

fn lose_hp(amount: i32) -> Effect {
    Effect::on_self(EffectKind::LoseHp { amount })
}

fn add(card: &str, zone: CardZone, count: u32) -> Effect {
    Effect::on_self(EffectKind::AddCard {
        card: card.to_string(),
        zone,
        count,
        upgraded: false,
    })
}

fn choose(kind: ChoiceKind) -> Effect {
    Effect::choose(kind)
}

fn random_hits(amount: i32, count: usize) -> Vec<Effect> {
    vec![Effect::on_random(EffectKind::Damage { amount, hits: 1 }); count]
}

/// Every card the simulator knows without data files.
pub fn cards() -> Vec<CardDef> {
    let mut defs = ironclad();
    defs.extend(colorless());
    defs.extend(statuses());
    defs.extend(curses());
    defs
}

fn ironclad() -> Vec<CardDef> {
    vec![
        card("Strike_R", "Strike", Attack, Basic, variant(1, vec![dmg(6)]), variant(1, vec![dmg(9)])),
        card("Defend_R", "Defend", Skill, Basic, variant(1, vec![block(5)]), variant(1, vec![block(8)])),
        card(
            "Bash",
            "Bash",
            Attack,
            Basic,
            variant(2, vec![dmg(8), debuff(PowerId::Vulnerable, 2)]),
            variant(2, vec![dmg(10), debuff(PowerId::Vulnerable, 3)]),
        ),
        card(
            "Anger",
            "Anger",
            Attack,
            Common,
            variant(0, vec![dmg(6), Effect::on_self(EffectKind::AddCopyOfPlayed { zone: CardZone::DiscardPile })]),
            variant(0, vec![dmg(8), Effect::on_self(EffectKind::AddCopyOfPlayed { zone: CardZone::DiscardPile })]),
        ),
        card(
            "Armaments",
            "Armaments",
            Skill,
            Common,
            variant(1, vec![block(5), choose(ChoiceKind::Armaments)]),
            variant(1, vec![block(5), Effect::on_self(EffectKind::UpgradeHand)]),
        ),
        card(
            "Body Slam",
            "Body Slam",
            Attack,
            Common,
            variant(1, vec![Effect::on_one(EffectKind::BodySlam)]),
            variant(0, vec![Effect::on_one(EffectKind::BodySlam)]),
        ),
        card("Clash", "Clash", Attack, Common, variant(0, vec![dmg(14)]), variant(0, vec![dmg(18)])),
        card("Cleave", "Cleave", Attack, Common, variant(1, vec![dmg_all(8)]), variant(1, vec![dmg_all(11)])),
        card(
            "Clothesline",
            "Clothesline",
            Attack,
            Common,
            variant(2, vec![dmg(12), debuff(PowerId::Weakened, 2)]),
            variant(2, vec![dmg(14), debuff(PowerId::Weakened, 3)]),
        ),
        card(
            "Flex",
            "Flex",
            Skill,
            Common,
            variant(0, vec![buff(PowerId::Strength, 2), buff(PowerId::LoseStrength, 2)]),
            variant(0, vec![buff(PowerId::Strength, 4), buff(PowerId::LoseStrength, 4)]),
        ),
        card(
            "Havoc",
            "Havoc",
            Skill,
            Common,
            variant(1, vec![Effect::on_self(EffectKind::Havoc)]),
            variant(0, vec![Effect::on_self(EffectKind::Havoc)]),
        ),
        card(
            "Headbutt",
            "Headbutt",
            Attack,
            Common,
            variant(1, vec![dmg(9), choose(ChoiceKind::Headbutt)]),
            variant(1, vec![dmg(12), choose(ChoiceKind::Headbutt)]),
        ),
        card(
            "Heavy Blade",
            "Heavy Blade",
            Attack,
            Common,
            variant(2, vec![Effect::on_one(EffectKind::HeavyBlade { base: 14, strength_multiplier: 3 })]),
            variant(2, vec![Effect::on_one(EffectKind::HeavyBlade { base: 14, strength_multiplier: 5 })]),
        ),
        card(
            "Iron Wave",
            "Iron Wave",
            Attack,
            Common,
            variant(1, vec![block(5), dmg(5)]),
            variant(1, vec![block(7), dmg(7)]),
        ),
        card(
            "Perfected Strike",
            "Perfected Strike",
            Attack,
            Common,
            variant(2, vec![Effect::on_one(EffectKind::PerfectedStrike { base: 6, per_strike: 2 })]),
            variant(2, vec![Effect::on_one(EffectKind::PerfectedStrike { base: 6, per_strike: 3 })]),
        ),
        card(
            "Pommel Strike",
            "Pommel Strike",
            Attack,
            Common,
            variant(1, vec![dmg(9), draw(1)]),
            variant(1, vec![dmg(10), draw(2)]),
        ),
        card(
            "Shrug It Off",
            "Shrug It Off",
            Skill,
            Common,
            variant(1, vec![block(8), draw(1)]),
            variant(1, vec![block(11), draw(1)]),
        ),
        card(
            "Sword Boomerang",
            "Sword Boomerang",
            Attack,
            Common,
            variant(1, random_hits(3, 3)),
            variant(1, random_hits(3, 4)),
        ),
        card(
            "Thunderclap",
            "Thunderclap",
            Attack,
            Common,
            variant(1, vec![dmg_all(4), debuff_all(PowerId::Vulnerable, 1)]),
            variant(1, vec![dmg_all(7), debuff_all(PowerId::Vulnerable, 1)]),
        ),
        card(
            "True Grit",
            "True Grit",
            Skill,
            Common,
            variant(1, vec![block(7), Effect::on_self(EffectKind::ExhaustRandomInHand { count: 1 })]),
            variant(1, vec![block(9), choose(ChoiceKind::ExhaustSelect)]),
        ),
        card("Twin Strike", "Twin Strike", Attack, Common, variant(1, vec![hits(5, 2)]), variant(1, vec![hits(7, 2)])),
        card(
            "Warcry",
            "Warcry",
            Skill,
            Common,
            variant(0, vec![draw(1), choose(ChoiceKind::HandToDeck)]).exhausting(),
            variant(0, vec![draw(2), choose(ChoiceKind::HandToDeck)]).exhausting(),
        ),
        card(
            "Wild Strike",
            "Wild Strike",
            Attack,
            Common,
            variant(1, vec![dmg(12), add("Wound", CardZone::DrawPile, 1)]),
            variant(1, vec![dmg(17), add("Wound", CardZone::DrawPile, 1)]),
        ),
        card(
            "Battle Trance",
            "Battle Trance",
            Skill,
            Uncommon,
            variant(0, vec![draw(3), buff(PowerId::NoDraw, 1)]),
            variant(0, vec![draw(4), buff(PowerId::NoDraw, 1)]),
        ),
        card(
            "Bloodletting",
            "Bloodletting",
            Skill,
            Uncommon,
            variant(0, vec![lose_hp(3), energy(2)]),
            variant(0, vec![lose_hp(3), energy(3)]),
        ),
        card(
            "Burning Pact",
            "Burning Pact",
            Skill,
            Uncommon,
            variant(1, vec![choose(ChoiceKind::ExhaustSelect), draw(2)]),
            variant(1, vec![choose(ChoiceKind::ExhaustSelect), draw(3)]),
        ),
        card(
            "Carnage",
            "Carnage",
            Attack,
            Uncommon,
            variant(2, vec![dmg(20)]).ethereal(),
            variant(2, vec![dmg(28)]).ethereal(),
        ),
        card(
            "Combust",
            "Combust",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::Combust, 5)]),
            variant(1, vec![buff(PowerId::Combust, 7)]),
        ),
        card(
            "Dark Embrace",
            "Dark Embrace",
            Power,
            Uncommon,
            variant(2, vec![buff(PowerId::DarkEmbrace, 1)]),
            variant(1, vec![buff(PowerId::DarkEmbrace, 1)]),
        ),
        card(
            "Disarm",
            "Disarm",
            Skill,
            Uncommon,
            variant(1, vec![debuff(PowerId::Strength, -2)]).exhausting(),
            variant(1, vec![debuff(PowerId::Strength, -3)]).exhausting(),
        ),
        card(
            "Dropkick",
            "Dropkick",
            Attack,
            Uncommon,
            variant(1, vec![Effect::on_one(EffectKind::Dropkick { amount: 5 })]),
            variant(1, vec![Effect::on_one(EffectKind::Dropkick { amount: 8 })]),
        ),
        card(
            "Dual Wield",
            "Dual Wield",
            Skill,
            Uncommon,
            variant(1, vec![choose(ChoiceKind::DualWield { copies: 1 })]),
            variant(1, vec![choose(ChoiceKind::DualWield { copies: 2 })]),
        ),
        card(
            "Entrench",
            "Entrench",
            Skill,
            Uncommon,
            variant(2, vec![Effect::on_self(EffectKind::DoubleBlock)]),
            variant(1, vec![Effect::on_self(EffectKind::DoubleBlock)]),
        ),
        card(
            "Evolve",
            "Evolve",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::Evolve, 1)]),
            variant(1, vec![buff(PowerId::Evolve, 2)]),
        ),
        card(
            "Feel No Pain",
            "Feel No Pain",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::FeelNoPain, 3)]),
            variant(1, vec![buff(PowerId::FeelNoPain, 4)]),
        ),
        card(
            "Fire Breathing",
            "Fire Breathing",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::FireBreathing, 6)]),
            variant(1, vec![buff(PowerId::FireBreathing, 10)]),
        ),
        card(
            "Flame Barrier",
            "Flame Barrier",
            Skill,
            Uncommon,
            variant(2, vec![block(12), buff(PowerId::FlameBarrier, 4)]),
            variant(2, vec![block(16), buff(PowerId::FlameBarrier, 6)]),
        ),
        card(
            "Ghostly Armor",
            "Ghostly Armor",
            Skill,
            Uncommon,
            variant(1, vec![block(10)]).ethereal(),
            variant(1, vec![block(13)]).ethereal(),
        ),
        card(
            "Hemokinesis",
            "Hemokinesis",
            Attack,
            Uncommon,
            variant(1, vec![lose_hp(2), dmg(15)]),
            variant(1, vec![lose_hp(2), dmg(20)]),
        ),
        card(
            "Infernal Blade",
            "Infernal Blade",
            Skill,
            Uncommon,
            variant(
                1,
                vec![Effect::on_self(EffectKind::RandomCardToHand { card_type: Attack, free_this_turn: true })],
            )
            .exhausting(),
            variant(
                0,
                vec![Effect::on_self(EffectKind::RandomCardToHand { card_type: Attack, free_this_turn: true })],
            )
            .exhausting(),
        ),
        card(
            "Inflame",
            "Inflame",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::Strength, 2)]),
            variant(1, vec![buff(PowerId::Strength, 3)]),
        ),
        card(
            "Intimidate",
            "Intimidate",
            Skill,
            Uncommon,
            variant(0, vec![debuff_all(PowerId::Weakened, 1)]).exhausting(),
            variant(0, vec![debuff_all(PowerId::Weakened, 2)]).exhausting(),
        ),
        card(
            "Metallicize",
            "Metallicize",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::Metallicize, 3)]),
            variant(1, vec![buff(PowerId::Metallicize, 4)]),
        ),
        card(
            "Power Through",
            "Power Through",
            Skill,
            Uncommon,
            variant(1, vec![add("Wound", CardZone::Hand, 2), block(15)]),
            variant(1, vec![add("Wound", CardZone::Hand, 2), block(20)]),
        ),
        card(
            "Pummel",
            "Pummel",
            Attack,
            Uncommon,
            variant(1, vec![hits(2, 4)]).exhausting(),
            variant(1, vec![hits(2, 5)]).exhausting(),
        ),
        card(
            "Rage",
            "Rage",
            Skill,
            Uncommon,
            variant(0, vec![buff(PowerId::Rage, 3)]),
            variant(0, vec![buff(PowerId::Rage, 5)]),
        ),
        card(
            "Rampage",
            "Rampage",
            Attack,
            Uncommon,
            variant(1, vec![Effect::on_one(EffectKind::Rampage { base: 8, increment: 5 })]),
            variant(1, vec![Effect::on_one(EffectKind::Rampage { base: 8, increment: 8 })]),
        ),
        card(
            "Reckless Charge",
            "Reckless Charge",
            Attack,
            Uncommon,
            variant(0, vec![dmg(7), add("Dazed", CardZone::DrawPile, 1)]),
            variant(0, vec![dmg(10), add("Dazed", CardZone::DrawPile, 1)]),
        ),
        card(
            "Rupture",
            "Rupture",
            Power,
            Uncommon,
            variant(1, vec![buff(PowerId::Rupture, 1)]),
            variant(1, vec![buff(PowerId::Rupture, 2)]),
        ),
        CardDef {
            multi_upgrade: true,
            ..card(
                "Searing Blow",
                "Searing Blow",
                Attack,
                Uncommon,
                variant(2, vec![Effect::on_one(EffectKind::SearingBlow)]),
                variant(2, vec![Effect::on_one(EffectKind::SearingBlow)]),
            )
        },
        card(
            "Second Wind",
            "Second Wind",
            Skill,
            Uncommon,
            variant(1, vec![Effect::on_self(EffectKind::ExhaustNonAttacks { block_each: 5 })]),
            variant(1, vec![Effect::on_self(EffectKind::ExhaustNonAttacks { block_each: 7 })]),
        ),
        card(
            "Seeing Red",
            "Seeing Red",
            Skill,
            Uncommon,
            variant(1, vec![energy(2)]).exhausting(),
            variant(0, vec![energy(2)]).exhausting(),
        ),
        card("Sentinel", "Sentinel", Skill, Uncommon, variant(1, vec![block(5)]), variant(1, vec![block(8)])),
        card(
            "Sever Soul",
            "Sever Soul",
            Attack,
            Uncommon,
            variant(2, vec![Effect::on_self(EffectKind::ExhaustNonAttacks { block_each: 0 }), dmg(16)]),
            variant(2, vec![Effect::on_self(EffectKind::ExhaustNonAttacks { block_each: 0 }), dmg(22)]),
        ),
        card(
            "Shockwave",
            "Shockwave",
            Skill,
            Uncommon,
            variant(2, vec![debuff_all(PowerId::Weakened, 3), debuff_all(PowerId::Vulnerable, 3)]).exhausting(),
            variant(2, vec![debuff_all(PowerId::Weakened, 5), debuff_all(PowerId::Vulnerable, 5)]).exhausting(),
        ),
        card(
            "Spot Weakness",
            "Spot Weakness",
            Skill,
            Uncommon,
            variant(1, vec![Effect::on_one(EffectKind::SpotWeakness { amount: 3 })]),
            variant(1, vec![Effect::on_one(EffectKind::SpotWeakness { amount: 4 })]),
        ),
        card(
            "Uppercut",
            "Uppercut",
            Attack,
            Uncommon,
            variant(2, vec![dmg(13), debuff(PowerId::Weakened, 1), debuff(PowerId::Vulnerable, 1)]),
            variant(2, vec![dmg(13), debuff(PowerId::Weakened, 2), debuff(PowerId::Vulnerable, 2)]),
        ),
        card(
            "Whirlwind",
            "Whirlwind",
            Attack,
            Uncommon,
            variant(COST_X, vec![Effect::on_all(EffectKind::Whirlwind { amount: 5 })]),
            variant(COST_X, vec![Effect::on_all(EffectKind::Whirlwind { amount: 8 })]),
        ),
        card(
            "Barricade",
            "Barricade",
            Power,
            Rare,
            variant(3, vec![buff(PowerId::Barricade, 1)]),
            variant(2, vec![buff(PowerId::Barricade, 1)]),
        ),
        card(
            "Berserk",
            "Berserk",
            Power,
            Rare,
            variant(0, vec![buff(PowerId::Vulnerable, 2), buff(PowerId::Berserk, 1)]),
            variant(0, vec![buff(PowerId::Vulnerable, 1), buff(PowerId::Berserk, 1)]),
        ),
        card("Bludgeon", "Bludgeon", Attack, Rare, variant(3, vec![dmg(32)]), variant(3, vec![dmg(42)])),
        card(
            "Brutality",
            "Brutality",
            Power,
            Rare,
            variant(0, vec![buff(PowerId::Brutality, 1)]),
            variant(0, vec![buff(PowerId::Brutality, 1)]).innate(),
        ),
        card(
            "Corruption",
            "Corruption",
            Power,
            Rare,
            variant(3, vec![buff(PowerId::Corruption, 1)]),
            variant(2, vec![buff(PowerId::Corruption, 1)]),
        ),
        card(
            "Demon Form",
            "Demon Form",
            Power,
            Rare,
            variant(3, vec![buff(PowerId::DemonForm, 2)]),
            variant(3, vec![buff(PowerId::DemonForm, 3)]),
        ),
        card(
            "Double Tap",
            "Double Tap",
            Skill,
            Rare,
            variant(1, vec![buff(PowerId::DoubleTap, 1)]),
            variant(1, vec![buff(PowerId::DoubleTap, 2)]),
        ),
        card(
            "Exhume",
            "Exhume",
            Skill,
            Rare,
            variant(1, vec![choose(ChoiceKind::Exhume)]).exhausting(),
            variant(0, vec![choose(ChoiceKind::Exhume)]).exhausting(),
        ),
        card(
            "Feed",
            "Feed",
            Attack,
            Rare,
            variant(1, vec![Effect::on_one(EffectKind::Feed { amount: 10, max_hp: 3 })]).exhausting(),
            variant(1, vec![Effect::on_one(EffectKind::Feed { amount: 12, max_hp: 4 })]).exhausting(),
        ),
        card(
            "Fiend Fire",
            "Fiend Fire",
            Attack,
            Rare,
            variant(2, vec![Effect::on_one(EffectKind::FiendFire { per_card: 7 })]).exhausting(),
            variant(2, vec![Effect::on_one(EffectKind::FiendFire { per_card: 10 })]).exhausting(),
        ),
        card(
            "Immolate",
            "Immolate",
            Attack,
            Rare,
            variant(2, vec![dmg_all(21), add("Burn", CardZone::DiscardPile, 1)]),
            variant(2, vec![dmg_all(28), add("Burn", CardZone::DiscardPile, 1)]),
        ),
        card(
            "Impervious",
            "Impervious",
            Skill,
            Rare,
            variant(2, vec![block(30)]).exhausting(),
            variant(2, vec![block(40)]).exhausting(),
        ),
        card(
            "Juggernaut",
            "Juggernaut",
            Power,
            Rare,
            variant(2, vec![buff(PowerId::Juggernaut, 5)]),
            variant(2, vec![buff(PowerId::Juggernaut, 7)]),
        ),
        card(
            "Limit Break",
            "Limit Break",
            Skill,
            Rare,
            variant(1, vec![Effect::on_self(EffectKind::DoubleStrength)]).exhausting(),
            variant(1, vec![Effect::on_self(EffectKind::DoubleStrength)]),
        ),
        card(
            "Offering",
            "Offering",
            Skill,
            Rare,
            variant(0, vec![lose_hp(6), energy(2), draw(3)]).exhausting(),
            variant(0, vec![lose_hp(6), energy(2), draw(5)]).exhausting(),
        ),
        card(
            "Reaper",
            "Reaper",
            Attack,
            Rare,
            variant(2, vec![Effect::on_all(EffectKind::Reaper { amount: 4 })]).exhausting(),
            variant(2, vec![Effect::on_all(EffectKind::Reaper { amount: 5 })]).exhausting(),
        ),
    ]
}

/// Colorless cards are marked `Special` so class card offers never include them.
fn colorless() -> Vec<CardDef> {
    vec![
        card(
            "Apotheosis",
            "Apotheosis",
            Skill,
            Special,
            variant(2, vec![Effect::on_self(EffectKind::UpgradeAll)]).exhausting(),
            variant(1, vec![Effect::on_self(EffectKind::UpgradeAll)]).exhausting(),
        ),
        card(
            "Bandage Up",
            "Bandage Up",
            Skill,
            Special,
            variant(0, vec![Effect::on_self(EffectKind::Heal { amount: 4 })]).exhausting(),
            variant(0, vec![Effect::on_self(EffectKind::Heal { amount: 6 })]).exhausting(),
        ),
        card(
            "Blind",
            "Blind",
            Skill,
            Special,
            variant(0, vec![debuff(PowerId::Weakened, 2)]),
            variant(0, vec![debuff_all(PowerId::Weakened, 2)]),
        ),
        card(
            "Dark Shackles",
            "Dark Shackles",
            Skill,
            Special,
            variant(0, vec![debuff(PowerId::Shackled, 9)]).exhausting(),
            variant(0, vec![debuff(PowerId::Shackled, 15)]).exhausting(),
        ),
        card(
            "Discovery",
            "Discovery",
            Skill,
            Special,
            variant(1, vec![choose(ChoiceKind::Discover)]).exhausting(),
            variant(1, vec![choose(ChoiceKind::Discover)]),
        ),
        card(
            "Dramatic Entrance",
            "Dramatic Entrance",
            Attack,
            Special,
            variant(0, vec![dmg_all(8)]).exhausting().innate(),
            variant(0, vec![dmg_all(12)]).exhausting().innate(),
        ),
        card(
            "Finesse",
            "Finesse",
            Skill,
            Special,
            variant(0, vec![block(2), draw(1)]),
            variant(0, vec![block(4), draw(1)]),
        ),
        card(
            "Flash of Steel",
            "Flash of Steel",
            Attack,
            Special,
            variant(0, vec![dmg(3), draw(1)]),
            variant(0, vec![dmg(6), draw(1)]),
        ),
        card(
            "Forethought",
            "Forethought",
            Skill,
            Special,
            variant(0, vec![choose(ChoiceKind::Forethought)]),
            variant(0, vec![choose(ChoiceKind::Forethought)]),
        ),
        card("Good Instincts", "Good Instincts", Skill, Special, variant(0, vec![block(6)]), variant(0, vec![block(9)])),
        card(
            "HandOfGreed",
            "Hand of Greed",
            Attack,
            Special,
            variant(2, vec![Effect::on_one(EffectKind::HandOfGreed { amount: 20, gold: 20 })]),
            variant(2, vec![Effect::on_one(EffectKind::HandOfGreed { amount: 25, gold: 25 })]),
        ),
        card("Swift Strike", "Swift Strike", Attack, Special, variant(0, vec![dmg(7)]), variant(0, vec![dmg(10)])),
        card(
            "Trip",
            "Trip",
            Skill,
            Special,
            variant(0, vec![debuff(PowerId::Vulnerable, 2)]),
            variant(0, vec![debuff_all(PowerId::Vulnerable, 2)]),
        ),
    ]
}

fn statuses() -> Vec<CardDef> {
    vec![
        dead_card("Wound", "Wound", Status, variant(COST_UNPLAYABLE, Vec::new())),
        dead_card("Dazed", "Dazed", Status, variant(COST_UNPLAYABLE, Vec::new()).ethereal()),
        dead_card("Burn", "Burn", Status, variant(COST_UNPLAYABLE, Vec::new())),
        dead_card("Slimed", "Slimed", Status, variant(1, Vec::new()).exhausting()),
        dead_card("Void", "Void", Status, variant(COST_UNPLAYABLE, Vec::new()).ethereal()),
    ]
}

fn curses() -> Vec<CardDef> {
    let curse = |id: &str, name: &str| dead_card(id, name, Curse, variant(COST_UNPLAYABLE, Vec::new()));
    vec![
        curse("Regret", "Regret"),
        curse("Doubt", "Doubt"),
        curse("Shame", "Shame"),
        curse("Decay", "Decay"),
        curse("Pain", "Pain"),
        curse("Parasite", "Parasite"),
        curse("Injury", "Injury"),
        dead_card("Clumsy", "Clumsy", Curse, variant(COST_UNPLAYABLE, Vec::new()).ethereal()),
        dead_card("Writhe", "Writhe", Curse, variant(COST_UNPLAYABLE, Vec::new()).innate()),
        dead_card("AscendersBane", "Ascender's Bane", Curse, variant(COST_UNPLAYABLE, Vec::new()).ethereal()),
    ]
}
