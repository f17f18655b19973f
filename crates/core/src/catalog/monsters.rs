use crate::{CardZone, Effect, EffectKind, Intent, MonsterDef, MoveDef, Power, PowerId, TargetMode};

fn monster(id: &str, name: &str, max_hp: i32, moves: Vec<MoveDef>) -> MonsterDef {
    MonsterDef {
        id: id.to_string(),
        name: name.to_string(),
        max_hp,
        first_move: None,
        moves,
        powers: Vec::new(),
    }
}

fn opening(mut def: MonsterDef, first: &str) -> MonsterDef {
    def.first_move = Some(first.to_string());
    def
}

fn with_power(mut def: MonsterDef, power: PowerId, amount: i32) -> MonsterDef {
    def.powers.push(Power::new(power, amount));
    def
}

fn mv(name: &str, intent: Intent, weight: f64, effects: Vec<Effect>) -> MoveDef {
    MoveDef {
        name: name.to_string(),
        intent,
        weight,
        max_repeats: None,
        next: None,
        effects,
    }
}

fn limited(mut item: MoveDef, max_repeats: u32) -> MoveDef {
    item.max_repeats = Some(max_repeats);
    item
}

/// Move reached only by chaining; always followed by `next`.
fn chain(name: &str, intent: Intent, next: &str, effects: Vec<Effect>) -> MoveDef {
    MoveDef {
        next: Some(next.to_string()),
        ..mv(name, intent, 0.0, effects)
    }
}

fn hit(amount: i32) -> Effect {
    Effect::damage(amount)
}

fn hits(amount: i32, hits: u32) -> Effect {
    Effect::on_one(EffectKind::Damage { amount, hits })
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

fn status(card: &str, zone: CardZone, count: u32) -> Effect {
    Effect::on_self(EffectKind::AddCard {
        card: card.to_string(),
        zone,
        count,
        upgraded: false,
    })
}

/// Monster move tables for the encounters the simulator ships with.
pub fn monsters() -> Vec<MonsterDef> {
    let mut defs = vec![
        opening(
            monster(
                "Cultist",
                "Cultist",
                50,
                vec![
                    chain("Incantation", Intent::Buff, "Dark Strike", vec![buff(PowerId::Ritual, 3)]),
                    mv("Dark Strike", Intent::Attack, 1.0, vec![hit(6)]),
                ],
            ),
            "Incantation",
        ),
        opening(
            monster(
                "JawWorm",
                "Jaw Worm",
                42,
                vec![
                    limited(mv("Chomp", Intent::Attack, 0.45, vec![hit(11)]), 1),
                    limited(mv("Thrash", Intent::AttackDefend, 0.30, vec![hit(7), block(5)]), 2),
                    limited(
                        mv("Bellow", Intent::DefendBuff, 0.25, vec![buff(PowerId::Strength, 3), block(6)]),
                        1,
                    ),
                ],
            ),
            "Chomp",
        ),
        with_power(
            monster(
                "FuzzyLouseNormal",
                "Louse",
                12,
                vec![
                    limited(mv("Bite", Intent::Attack, 0.75, vec![hit(6)]), 2),
                    limited(mv("Grow", Intent::Buff, 0.25, vec![buff(PowerId::Strength, 3)]), 1),
                ],
            ),
            PowerId::CurlUp,
            5,
        ),
        with_power(
            monster(
                "FuzzyLouseDefensive",
                "Louse",
                12,
                vec![
                    limited(mv("Bite", Intent::Attack, 0.75, vec![hit(6)]), 2),
                    limited(mv("Spit Web", Intent::Debuff, 0.25, vec![debuff(PowerId::Weakened, 2)]), 1),
                ],
            ),
            PowerId::CurlUp,
            5,
        ),
        monster(
            "AcidSlime_M",
            "Acid Slime (M)",
            30,
            vec![
                limited(
                    mv(
                        "Corrosive Spit",
                        Intent::AttackDebuff,
                        0.3,
                        vec![hit(7), status("Slimed", CardZone::DiscardPile, 1)],
                    ),
                    2,
                ),
                limited(mv("Tackle", Intent::Attack, 0.4, vec![hit(10)]), 1),
                limited(mv("Lick", Intent::Debuff, 0.3, vec![debuff(PowerId::Weakened, 1)]), 1),
            ],
        ),
        monster(
            "SpikeSlime_M",
            "Spike Slime (M)",
            30,
            vec![
                limited(
                    mv(
                        "Flame Tackle",
                        Intent::AttackDebuff,
                        0.3,
                        vec![hit(8), status("Slimed", CardZone::DiscardPile, 1)],
                    ),
                    2,
                ),
                limited(mv("Lick", Intent::Debuff, 0.7, vec![debuff(PowerId::Frail, 1)]), 2),
            ],
        ),
        with_power(
            monster(
                "FungiBeast",
                "Fungi Beast",
                24,
                vec![
                    limited(mv("Bite", Intent::Attack, 0.6, vec![hit(6)]), 2),
                    limited(mv("Grow", Intent::Buff, 0.4, vec![buff(PowerId::Strength, 3)]), 1),
                ],
            ),
            PowerId::SporeCloud,
            2,
        ),
        opening(
            monster(
                "GremlinNob",
                "Gremlin Nob",
                85,
                vec![
                    mv("Bellow", Intent::Buff, 0.0, vec![buff(PowerId::Enrage, 2)]),
                    limited(mv("Rush", Intent::Attack, 0.67, vec![hit(14)]), 2),
                    limited(
                        mv("Skull Bash", Intent::AttackDebuff, 0.33, vec![hit(6), debuff(PowerId::Vulnerable, 2)]),
                        1,
                    ),
                ],
            ),
            "Bellow",
        ),
        with_power(
            opening(
                monster(
                    "Sentry",
                    "Sentry",
                    38,
                    vec![
                        chain("Bolt", Intent::Debuff, "Beam", vec![status("Dazed", CardZone::DiscardPile, 2)]),
                        chain("Beam", Intent::Attack, "Bolt", vec![hit(9)]),
                    ],
                ),
                "Bolt",
            ),
            PowerId::Artifact,
            1,
        ),
        with_power(
            opening(
                monster(
                    "Looter",
                    "Looter",
                    44,
                    vec![
                        chain(
                            "Mug",
                            Intent::Attack,
                            "Mug Again",
                            vec![hit(10), Effect::on_self(EffectKind::StealGold { amount: 15 })],
                        ),
                        mv(
                            "Mug Again",
                            Intent::Attack,
                            0.0,
                            vec![hit(10), Effect::on_self(EffectKind::StealGold { amount: 15 })],
                        ),
                        MoveDef {
                            next: Some("Smoke Bomb".to_string()),
                            ..mv(
                                "Lunge",
                                Intent::Attack,
                                0.5,
                                vec![hit(12), Effect::on_self(EffectKind::StealGold { amount: 15 })],
                            )
                        },
                        MoveDef {
                            next: Some("Escape".to_string()),
                            ..mv("Smoke Bomb", Intent::Defend, 0.5, vec![block(6)])
                        },
                        mv("Escape", Intent::Escape, 0.0, vec![Effect::on_self(EffectKind::Escape)]),
                    ],
                ),
                "Mug",
            ),
            PowerId::Thievery,
            15,
        ),
        monster(
            "SlaverBlue",
            "Blue Slaver",
            46,
            vec![
                limited(mv("Stab", Intent::Attack, 0.6, vec![hit(12)]), 2),
                limited(
                    mv("Rake", Intent::AttackDebuff, 0.4, vec![hit(7), debuff(PowerId::Weakened, 1)]),
                    1,
                ),
            ],
        ),
        opening(
            monster(
                "SlaverRed",
                "Red Slaver",
                46,
                vec![
                    limited(mv("Stab", Intent::Attack, 0.2, vec![hit(13)]), 2),
                    limited(
                        mv("Scrape", Intent::AttackDebuff, 0.55, vec![hit(8), debuff(PowerId::Vulnerable, 1)]),
                        2,
                    ),
                    limited(mv("Entangle", Intent::StrongDebuff, 0.25, vec![debuff(PowerId::Entangled, 1)]), 1),
                ],
            ),
            "Stab",
        ),
        monster(
            "GremlinFat",
            "Fat Gremlin",
            14,
            vec![mv("Smash", Intent::AttackDebuff, 1.0, vec![hit(4), debuff(PowerId::Weakened, 1)])],
        ),
        monster(
            "GremlinThief",
            "Sneaky Gremlin",
            11,
            vec![mv("Puncture", Intent::Attack, 1.0, vec![hit(9)])],
        ),
        with_power(
            monster(
                "GremlinWarrior",
                "Mad Gremlin",
                21,
                vec![mv("Scratch", Intent::Attack, 1.0, vec![hit(4)])],
            ),
            PowerId::Angry,
            1,
        ),
        opening(
            monster(
                "GremlinWizard",
                "Gremlin Wizard",
                23,
                vec![
                    chain("Charging", Intent::Unknown, "Charging Again", Vec::new()),
                    chain("Charging Again", Intent::Unknown, "Ultimate Blast", Vec::new()),
                    chain("Ultimate Blast", Intent::Attack, "Charging", vec![hit(25)]),
                ],
            ),
            "Charging",
        ),
        monster(
            "GremlinTsundere",
            "Shield Gremlin",
            13,
            vec![
                limited(mv("Protect", Intent::Defend, 0.5, vec![block(7)]), 1),
                mv("Shield Bash", Intent::Attack, 0.5, vec![hit(6)]),
            ],
        ),
    ];
    defs.push(guardian());
    defs
}

/// The Guardian cycles offensive moves until Mode Shift breaks, then runs its
/// defensive sequence and returns to Whirlwind.
fn guardian() -> MonsterDef {
    let def = monster(
        "TheGuardian",
        "The Guardian",
        240,
        vec![
            chain("Charging Up", Intent::Defend, "Fierce Bash", vec![block(9)]),
            chain("Fierce Bash", Intent::Attack, "Vent Steam", vec![hit(32)]),
            chain(
                "Vent Steam",
                Intent::StrongDebuff,
                "Whirlwind",
                vec![debuff(PowerId::Weakened, 2), debuff(PowerId::Vulnerable, 2)],
            ),
            chain("Whirlwind", Intent::Attack, "Charging Up", vec![hits(5, 4)]),
            chain("Defensive Mode", Intent::Buff, "Roll Attack", vec![buff(PowerId::SharpHide, 3)]),
            chain("Roll Attack", Intent::Attack, "Twin Slam", vec![hit(9)]),
            chain(
                "Twin Slam",
                Intent::Attack,
                "Whirlwind",
                vec![hits(8, 2), Effect::on_self(EffectKind::ResetModeShift)],
            ),
        ],
    );
    with_power(opening(def, "Charging Up"), PowerId::ModeShift, 30)
}
