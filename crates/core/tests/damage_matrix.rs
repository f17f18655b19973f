use spirebot_core::{calculate_real_damage, Monster, Player, PowerId, Relic};

fn player_with(powers: &[(PowerId, i32)]) -> Player {
    let mut player = Player::new(80, 80);
    for (id, amount) in powers {
        player.powers.add(id.clone(), *amount);
    }
    player
}

fn monster_with(powers: &[(PowerId, i32)]) -> Monster {
    let mut monster = Monster::new("Dummy", "Dummy", 0, 100);
    for (id, amount) in powers {
        monster.powers.add(id.clone(), *amount);
    }
    monster
}

fn relics(ids: &[&str]) -> Vec<Relic> {
    ids.iter().map(|id| Relic::new(*id)).collect()
}

macro_rules! player_attack_case {
    ($name:ident, $base:expr, $attacker:expr, $target:expr, $relics:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let attacker = player_with($attacker);
            let target = monster_with($target);
            assert_eq!(
                calculate_real_damage($base, &attacker, &target, &relics($relics)),
                $expected
            );
        }
    };
}

macro_rules! monster_attack_case {
    ($name:ident, $base:expr, $attacker:expr, $target:expr, $relics:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let attacker = monster_with($attacker);
            let target = player_with($target);
            assert_eq!(
                calculate_real_damage($base, &attacker, &target, &relics($relics)),
                $expected
            );
        }
    };
}

player_attack_case!(plain_strike, 6, &[], &[], &[], 6);
player_attack_case!(strength_adds, 6, &[(PowerId::Strength, 3)], &[], &[], 9);
player_attack_case!(negative_strength_subtracts, 6, &[(PowerId::Strength, -2)], &[], &[], 4);
player_attack_case!(never_below_zero, 2, &[(PowerId::Strength, -5)], &[], &[], 0);
player_attack_case!(weak_floors, 6, &[(PowerId::Weakened, 1)], &[], &[], 4);
player_attack_case!(vulnerable_target, 6, &[], &[(PowerId::Vulnerable, 1)], &[], 9);
player_attack_case!(vulnerable_floors, 7, &[], &[(PowerId::Vulnerable, 1)], &[], 10);
player_attack_case!(
    weak_and_vulnerable_floor_once,
    6,
    &[(PowerId::Strength, 2), (PowerId::Weakened, 1)],
    &[(PowerId::Vulnerable, 1)],
    &[],
    9
);
player_attack_case!(
    strength_then_vulnerable,
    6,
    &[(PowerId::Strength, 3)],
    &[(PowerId::Vulnerable, 2)],
    &[],
    13
);
player_attack_case!(shackled_reduces, 6, &[(PowerId::Shackled, 3)], &[], &[], 3);
player_attack_case!(
    paper_phrog_boosts_vulnerable_monsters,
    10,
    &[],
    &[(PowerId::Vulnerable, 1)],
    &["Paper Frog"],
    17
);
player_attack_case!(
    paper_krane_ignores_weak_player,
    10,
    &[(PowerId::Weakened, 1)],
    &[],
    &["Paper Crane"],
    7
);
player_attack_case!(
    odd_mushroom_ignores_monster_targets,
    10,
    &[],
    &[(PowerId::Vulnerable, 1)],
    &["Odd Mushroom"],
    15
);

monster_attack_case!(monster_plain, 11, &[], &[], &[], 11);
monster_attack_case!(monster_weak, 11, &[(PowerId::Weakened, 1)], &[], &[], 8);
monster_attack_case!(
    paper_krane_weakens_monsters_more,
    10,
    &[(PowerId::Weakened, 1)],
    &[],
    &["Paper Crane"],
    6
);
monster_attack_case!(
    odd_mushroom_softens_vulnerable,
    10,
    &[],
    &[(PowerId::Vulnerable, 1)],
    &["Odd Mushroom"],
    12
);
monster_attack_case!(
    paper_phrog_ignores_player_targets,
    10,
    &[],
    &[(PowerId::Vulnerable, 1)],
    &["Paper Frog"],
    15
);
monster_attack_case!(
    ritual_strength_counts,
    6,
    &[(PowerId::Strength, 3), (PowerId::Ritual, 3)],
    &[],
    &[],
    9
);

#[test]
fn damage_is_monotonic_in_base() {
    let attacker = player_with(&[(PowerId::Weakened, 1)]);
    let target = monster_with(&[(PowerId::Vulnerable, 1)]);
    let relics = relics(&["Paper Frog"]);
    let mut last = 0;
    for base in 0..60 {
        let damage = calculate_real_damage(base, &attacker, &target, &relics);
        assert!(damage >= last, "base {base}: {damage} < {last}");
        assert!(damage >= 0);
        last = damage;
    }
}

#[test]
fn strength_never_lowers_damage() {
    let target = monster_with(&[(PowerId::Vulnerable, 1)]);
    for base in [0, 3, 6, 14, 32] {
        let mut last = calculate_real_damage(base, &player_with(&[]), &target, &[]);
        for strength in 1..10 {
            let attacker = player_with(&[(PowerId::Strength, strength)]);
            let damage = calculate_real_damage(base, &attacker, &target, &[]);
            assert!(damage >= last);
            last = damage;
        }
    }
}
