use spirebot_core::{
    apply_action, check_prediction, diff, diff_combat, Action, Card, CardLibrary, CardMotion,
    CardUuid, Change, CombatState, GameSnapshot, Player, Relic, ScalarField, UnavailableCause,
};
use std::sync::Arc;

fn make_cards(library: &CardLibrary, prefix: &str, names: &[&str]) -> Vec<Card> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            library
                .make_card(name, CardUuid::new(format!("{prefix}{idx}")), 0)
                .expect("card definition")
        })
        .collect()
}

fn new_combat(monsters: &[&str], hand: &[&str], draw: &[&str]) -> CombatState {
    let library = Arc::new(CardLibrary::builtin());
    let monsters = monsters
        .iter()
        .enumerate()
        .map(|(idx, name)| library.spawn_monster(name, idx).expect("monster definition"))
        .collect();
    let mut player = Player::new(50, 50);
    player.energy = 3;
    let mut state = CombatState::new(player, monsters, Arc::clone(&library), 3);
    state.hand = make_cards(&library, "h", hand);
    state.draw_pile = make_cards(&library, "d", draw);
    state.register_start_of_combat();
    for idx in 0..state.monsters.len() {
        state.roll_move(idx);
    }
    state
}

fn uuid(value: &str) -> CardUuid {
    CardUuid::from(value)
}

#[test]
fn identical_states_have_no_delta() {
    let state = new_combat(&["Cultist"], &["Strike"], &["Defend"]);
    assert!(diff_combat(&state, &state.fork()).is_empty());
}

#[test]
fn played_attack_is_discarded_and_damages() {
    let before = new_combat(&["Cultist"], &["Strike"], &[]);
    let after = apply_action(&before, &Action::play("h0", Some(0))).expect("strike");
    let delta = diff_combat(&before, &after);
    assert_eq!(delta.motion_of(&uuid("h0")), Some(CardMotion::Discarded));
    assert!(delta.changes.contains(&Change::Scalar {
        field: ScalarField::Energy,
        before: 3,
        after: 2,
    }));
    assert!(delta.changes.contains(&Change::MonsterHp {
        monster: "Cultist".to_string(),
        index: 0,
        before: 50,
        after: 44,
    }));
}

#[test]
fn end_turn_reports_draws_and_discards() {
    let before = new_combat(&["Cultist"], &["Defend"], &["Strike"; 5]);
    let after = apply_action(&before, &Action::EndTurn).expect("end turn");
    let delta = diff_combat(&before, &after);
    assert_eq!(delta.count_motion(CardMotion::Drawn), 5);
    assert_eq!(delta.motion_of(&uuid("h0")), Some(CardMotion::Discarded));
    assert!(delta.changes.contains(&Change::Scalar {
        field: ScalarField::Turn,
        before: 1,
        after: 2,
    }));
}

#[test]
fn power_cards_leave_every_zone() {
    let before = new_combat(&["Cultist"], &["Inflame"], &[]);
    let after = apply_action(&before, &Action::play("h0", None)).expect("inflame");
    let delta = diff_combat(&before, &after);
    assert_eq!(delta.motion_of(&uuid("h0")), Some(CardMotion::PowerPlayed));
    assert!(delta.changes.contains(&Change::PlayerPower {
        power: "Strength".to_string(),
        before: 0,
        after: 2,
    }));
}

#[test]
fn exhausted_and_generated_cards_are_classified() {
    let before = new_combat(&["Cultist"], &["Power Through", "True Grit"], &[]);
    let after = apply_action(&before, &Action::play("h0", None)).expect("power through");
    let delta = diff_combat(&before, &after);
    assert_eq!(delta.count_motion(CardMotion::Discovered), 2);
    assert_eq!(delta.motion_of(&uuid("h0")), Some(CardMotion::Discarded));
}

#[test]
fn upgrade_in_place_is_reported() {
    let before = new_combat(&["Cultist"], &["Armaments", "Strike"], &[]);
    let after = apply_action(&before, &Action::play("h0", None)).expect("armaments");
    let delta = diff_combat(&before, &after);
    assert!(delta.changes.contains(&Change::CardMoved {
        card: "Strike+".to_string(),
        uuid: uuid("h1"),
        motion: CardMotion::Upgraded,
    }));
}

#[test]
fn vanished_cards_are_unknown_changes() {
    let before = new_combat(&["Cultist"], &["Strike"], &[]);
    let mut after = before.fork();
    after.hand.clear();
    let delta = diff_combat(&before, &after);
    assert!(matches!(
        delta.changes.as_slice(),
        [Change::UnknownChange { .. }]
    ));
    assert!(delta.to_string().starts_with("unknown_change: Strike (h0) hand -> none"));
}

#[test]
fn monster_availability_changes_name_the_cause() {
    let before = new_combat(&["Cultist", "JawWorm", "Looter"], &[], &[]);
    let mut after = before.fork();
    after.monsters[0].current_hp = 0;
    after.monsters[1].half_dead = true;
    after.monsters[2].is_gone = true;
    let delta = diff_combat(&before, &after);
    let causes: Vec<UnavailableCause> = delta
        .iter()
        .filter_map(|change| match change {
            Change::MonsterNotAvailable { cause, .. } => Some(*cause),
            _ => None,
        })
        .collect();
    assert_eq!(
        causes,
        vec![
            UnavailableCause::Died,
            UnavailableCause::HalfDead,
            UnavailableCause::Escaped
        ]
    );

    let mut revived = after.fork();
    revived.monsters[1].half_dead = false;
    let delta = diff_combat(&after, &revived);
    assert!(delta.changes.contains(&Change::MonsterReturned {
        monster: "JawWorm".to_string(),
        index: 1,
    }));
}

#[test]
fn new_and_missing_monsters_are_reported() {
    let library = Arc::new(CardLibrary::builtin());
    let before = new_combat(&["GremlinWizard"], &[], &[]);
    let mut after = before.fork();
    after.monsters.clear();
    after
        .monsters
        .push(library.spawn_monster("GremlinFat", 1).expect("gremlin"));
    let delta = diff_combat(&before, &after);
    assert!(delta.changes.contains(&Change::MonsterNotAvailable {
        monster: "GremlinWizard".to_string(),
        index: 0,
        cause: UnavailableCause::Missing,
    }));
    assert!(delta.changes.contains(&Change::MonsterAppeared {
        monster: "GremlinFat".to_string(),
        index: 1,
    }));
}

#[test]
fn check_prediction_is_silent_when_the_simulation_agrees() {
    let before = new_combat(&["JawWorm"], &["Strike", "Defend"], &["Bash"; 5]);
    let action = Action::EndTurn;
    let real_after = apply_action(&before, &action).expect("end turn");
    let delta = check_prediction(&before, &action, &real_after).expect("prediction");
    assert!(delta.is_empty(), "{delta}");
}

#[test]
fn check_prediction_reports_drift() {
    let before = new_combat(&["JawWorm"], &["Strike"], &[]);
    let action = Action::play("h0", Some(0));
    let mut real_after = apply_action(&before, &action).expect("strike");
    real_after.player.current_hp -= 3;
    let delta = check_prediction(&before, &action, &real_after).expect("prediction");
    assert_eq!(
        delta.changes,
        vec![Change::Scalar {
            field: ScalarField::CurrentHp,
            before: 50,
            after: 47,
        }]
    );
}

#[test]
fn check_prediction_propagates_illegal_actions() {
    let before = new_combat(&["JawWorm"], &[], &[]);
    let action = Action::play("h0", Some(0));
    assert!(check_prediction(&before, &action, &before).is_err());
}

#[test]
fn game_snapshot_diff_covers_run_fields() {
    let library = CardLibrary::builtin();
    let before = GameSnapshot {
        floor: 3,
        screen_type: "MAP".to_string(),
        choice_list: vec!["x=0".to_string(), "x=3".to_string()],
        current_hp: 60,
        max_hp: 80,
        gold: 99,
        deck: make_cards(&library, "k", &["Strike", "Defend"]),
        relics: vec![Relic::new("Burning Blood")],
        ..GameSnapshot::default()
    };
    let mut after = before.clone();
    after.floor = 4;
    after.screen_type = "NONE".to_string();
    after.choice_list = vec!["x=3".to_string()];
    after.deck[0].upgrade();
    after.deck.extend(make_cards(&library, "n", &["Anger"]));
    after.relics.push(Relic::new("Vajra"));

    let delta = diff(&before, &after);
    assert!(delta.changes.contains(&Change::Scalar {
        field: ScalarField::Floor,
        before: 3,
        after: 4,
    }));
    assert!(delta.changes.contains(&Change::ChoiceRemoved {
        choice: "x=0".to_string(),
    }));
    assert!(delta.changes.contains(&Change::DeckUpgraded {
        card: "Strike+".to_string(),
        uuid: uuid("k0"),
    }));
    assert!(delta.changes.contains(&Change::DeckAdded {
        card: "Anger".to_string(),
        uuid: uuid("n0"),
    }));
    assert!(delta.changes.contains(&Change::RelicGained {
        relic: "Vajra".to_string(),
    }));
    assert_eq!(delta.to_string().lines().count(), delta.len());
}
