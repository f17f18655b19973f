use serde_json::json;
use spirebot_core::{
    apply_action, Action, Card, CardDef, CardLibrary, CardRarity, CardType, CardUuid,
    CardVariant, ChoiceRef, CombatPhase, CombatSnapshot, CombatState, Effect, EffectKind, Intent,
    Player, Potion, PowerId, Relic, SimError,
};
use std::sync::Arc;

fn library() -> Arc<CardLibrary> {
    Arc::new(CardLibrary::builtin())
}

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

/// Mid-combat state on turn 1: start-of-combat effects already applied.
fn new_combat(monsters: &[&str], hand: &[&str], draw: &[&str]) -> CombatState {
    new_combat_in(library(), monsters, hand, draw)
}

fn new_combat_in(
    library: Arc<CardLibrary>,
    monsters: &[&str],
    hand: &[&str],
    draw: &[&str],
) -> CombatState {
    let monsters = monsters
        .iter()
        .enumerate()
        .map(|(idx, name)| library.spawn_monster(name, idx).expect("monster definition"))
        .collect();
    let mut player = Player::new(50, 50);
    player.energy = 3;
    let mut state = CombatState::new(player, monsters, Arc::clone(&library), 7);
    state.hand = make_cards(&library, "h", hand);
    state.draw_pile = make_cards(&library, "d", draw);
    state.register_start_of_combat();
    for idx in 0..state.monsters.len() {
        state.roll_move(idx);
    }
    state
}

fn play(state: &mut CombatState, uuid: &str, target: Option<usize>) {
    state
        .step(&Action::play(uuid, target))
        .expect("card plays");
}

fn end_turn(state: &mut CombatState) {
    state.step(&Action::EndTurn).expect("turn ends");
}

fn uuids(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|card| card.uuid.as_str()).collect()
}

fn hp_lost(state: &CombatState) -> Vec<i32> {
    state
        .monsters
        .iter()
        .map(|monster| monster.max_hp - monster.current_hp)
        .collect()
}

#[test]
fn strike_hits_for_six() {
    let mut state = new_combat(&["Cultist"], &["Strike"], &[]);
    play(&mut state, "h0", Some(0));
    assert_eq!(state.monsters[0].current_hp, 44);
    assert_eq!(state.player.energy, 2);
    assert_eq!(uuids(&state.discard_pile), vec!["h0"]);
    assert!(state.hand.is_empty());
}

#[test]
fn strength_and_vulnerable_floor_once() {
    let mut state = new_combat(&["Cultist"], &["Strike"], &[]);
    state.player.powers.add(PowerId::Strength, 3);
    state.monsters[0].powers.add(PowerId::Vulnerable, 2);
    play(&mut state, "h0", Some(0));
    assert_eq!(state.monsters[0].current_hp, 37);
}

#[test]
fn bash_makes_the_follow_up_strike_land_harder() {
    let mut state = new_combat(&["Cultist"], &["Bash", "Strike"], &[]);
    play(&mut state, "h0", Some(0));
    play(&mut state, "h1", Some(0));
    assert_eq!(state.monsters[0].current_hp, 33);
    assert_eq!(state.player.energy, 0);
}

#[test]
fn block_absorbs_the_monster_attack_and_resets() {
    let mut state = new_combat(&["JawWorm"], &["Defend"], &[]);
    assert_eq!(state.monsters[0].next_move.as_deref(), Some("Chomp"));
    play(&mut state, "h0", None);
    assert_eq!(state.player.block, 5);
    end_turn(&mut state);
    assert_eq!(state.player.current_hp, 44);
    assert_eq!(state.player.block, 0);
    assert_eq!(state.turn, 2);
    assert_eq!(state.player.energy, 3);
}

#[test]
fn ethereal_cards_exhaust_and_the_discard_reshuffles() {
    let mut state = new_combat(&["Cultist"], &["Carnage", "Strike"], &[]);
    end_turn(&mut state);
    assert_eq!(uuids(&state.exhaust_pile), vec!["h0"]);
    assert_eq!(uuids(&state.hand), vec!["h1"]);
    assert!(state.discard_pile.is_empty());
    assert_eq!(state.tracked.reshuffles, 1);
    assert_eq!(state.phase, CombatPhase::PlayerTurnActive);
}

#[test]
fn cultist_ritual_skips_the_round_it_was_cast() {
    let mut state = new_combat(&["Cultist"], &[], &[]);
    end_turn(&mut state);
    assert_eq!(state.monsters[0].powers.amount(&PowerId::Ritual), 3);
    assert_eq!(state.monsters[0].powers.amount(&PowerId::Strength), 0);
    assert_eq!(state.monsters[0].intent, Intent::Attack);
    end_turn(&mut state);
    assert_eq!(state.player.current_hp, 44);
    assert_eq!(state.monsters[0].powers.amount(&PowerId::Strength), 3);
    end_turn(&mut state);
    assert_eq!(state.player.current_hp, 35);
    assert_eq!(state.monsters[0].powers.amount(&PowerId::Strength), 6);
}

#[test]
fn fire_potion_empties_its_slot() {
    let mut state = new_combat(&["Cultist"], &[], &[]);
    state.potions = vec![Potion::new("Fire Potion"), Potion::empty()];
    state
        .step(&Action::UsePotion {
            slot: 0,
            target: Some(0),
        })
        .expect("potion use");
    assert_eq!(state.monsters[0].current_hp, 30);
    assert!(state.potions[0].is_empty());
    assert_eq!(state.potion_count(), 0);
}

#[test]
fn empty_potion_slot_is_rejected() {
    let mut state = new_combat(&["Cultist"], &[], &[]);
    state.potions = vec![Potion::empty()];
    let err = state
        .step(&Action::UsePotion {
            slot: 0,
            target: None,
        })
        .expect_err("empty slot");
    assert_eq!(err, SimError::InvalidPotionSlot(0));
}

#[test]
fn guardian_shifts_into_defensive_mode() {
    let mut state = new_combat(&["TheGuardian"], &["Bludgeon"], &[]);
    play(&mut state, "h0", Some(0));
    let guardian = &state.monsters[0];
    assert_eq!(guardian.current_hp, 208);
    assert_eq!(guardian.block, 20);
    assert!(!guardian.powers.has(&PowerId::ModeShift));
    assert_eq!(guardian.next_move.as_deref(), Some("Defensive Mode"));
    assert_eq!(guardian.intent, Intent::Buff);

    end_turn(&mut state);
    let guardian = &state.monsters[0];
    assert_eq!(guardian.powers.amount(&PowerId::SharpHide), 3);
    assert_eq!(guardian.next_move.as_deref(), Some("Roll Attack"));
    assert_eq!(state.player.current_hp, 50);

    play(&mut state, "h0", Some(0));
    assert_eq!(state.player.current_hp, 47);
}

#[test]
fn spore_cloud_leaves_the_player_vulnerable() {
    let mut state = new_combat(&["FungiBeast"], &["Strike"], &[]);
    state.monsters[0].current_hp = 5;
    play(&mut state, "h0", Some(0));
    assert_eq!(state.player.powers.amount(&PowerId::Vulnerable), 2);
    assert_eq!(state.phase, CombatPhase::Victory);
    assert!(state.legal_actions().is_empty());
    assert_eq!(state.step(&Action::EndTurn), Err(SimError::CombatOver));
}

#[test]
fn looter_returns_stolen_gold_on_death() {
    let mut state = new_combat(&["Looter"], &[], &["Strike"; 5]);
    state.gold = 100;
    end_turn(&mut state);
    assert_eq!(state.player.current_hp, 40);
    assert_eq!(state.gold, 85);
    assert_eq!(state.tracked.stolen_gold.get(&0), Some(&15));
    assert_eq!(state.monsters[0].next_move.as_deref(), Some("Mug Again"));

    state.monsters[0].current_hp = 1;
    let strike = state.hand[0].uuid.clone();
    state
        .step(&Action::PlayCard {
            card: strike,
            target: Some(0),
        })
        .expect("strike");
    assert_eq!(state.gold, 100);
    assert_eq!(state.phase, CombatPhase::Victory);
}

#[test]
fn double_tap_replays_the_next_attack() {
    let mut state = new_combat(&["Cultist"], &["Double Tap", "Strike"], &[]);
    play(&mut state, "h0", None);
    play(&mut state, "h1", Some(0));
    assert_eq!(state.monsters[0].current_hp, 38);
    assert!(!state.player.powers.has(&PowerId::DoubleTap));
    assert_eq!(state.tracked.attacks_this_turn, 1);
}

#[test]
fn corruption_makes_skills_free_and_exhausts_them() {
    let mut state = new_combat(&["Cultist"], &["Defend"], &[]);
    state.player.powers.add(PowerId::Corruption, 1);
    play(&mut state, "h0", None);
    assert_eq!(state.player.energy, 3);
    assert_eq!(state.player.block, 5);
    assert_eq!(uuids(&state.exhaust_pile), vec!["h0"]);
}

#[test]
fn orange_pellets_clear_debuffs_after_all_three_types() {
    let mut state = new_combat(&["Cultist"], &["Inflame", "Defend", "Strike"], &[]);
    state.relics.push(Relic::new("OrangePellets"));
    state.player.powers.add(PowerId::Weakened, 2);
    state.player.powers.add(PowerId::Frail, 1);
    play(&mut state, "h0", None);
    play(&mut state, "h1", None);
    assert!(state.player.powers.has(&PowerId::Weakened));
    play(&mut state, "h2", Some(0));
    assert!(!state.player.powers.has(&PowerId::Weakened));
    assert!(!state.player.powers.has(&PowerId::Frail));
    assert_eq!(state.player.powers.amount(&PowerId::Strength), 2);
    assert!(state.tracked.pellets_triggered);
}

#[test]
fn unknown_card_plays_without_effect() {
    let mut state = new_combat(&["Cultist"], &[], &[]);
    let card: Card = serde_json::from_value(json!({
        "uuid": "x1",
        "id": "Mystery",
        "name": "Mystery",
        "card_type": "Skill",
        "cost": 1
    }))
    .expect("card json");
    state.hand.push(card);
    play(&mut state, "x1", None);
    assert_eq!(state.player.energy, 2);
    assert_eq!(uuids(&state.discard_pile), vec!["x1"]);
    assert_eq!(state.monsters[0].current_hp, 50);
}

#[test]
fn invalid_plays_report_the_reason() {
    let mut state = new_combat(&["Cultist"], &["Strike", "Bash"], &[]);
    assert_eq!(
        state.step(&Action::play("missing", None)),
        Err(SimError::CardNotInHand(CardUuid::from("missing")))
    );
    assert_eq!(
        state.step(&Action::play("h0", None)),
        Err(SimError::MissingTarget(None))
    );
    assert_eq!(
        state.step(&Action::play("h0", Some(5))),
        Err(SimError::MissingTarget(Some(5)))
    );
    state.player.energy = 1;
    assert_eq!(
        state.step(&Action::play("h1", Some(0))),
        Err(SimError::NotEnoughEnergy { cost: 2, energy: 1 })
    );
}

#[test]
fn armaments_waits_for_a_choice() {
    let mut state = new_combat(&["Cultist"], &["Armaments", "Strike", "Defend"], &[]);
    play(&mut state, "h0", None);
    assert_eq!(state.player.block, 5);
    let pending = state.pending_choice.as_ref().expect("pending choice");
    assert_eq!(pending.candidates.len(), 2);
    assert_eq!(pending.current_action(), "ArmamentsAction");
    assert_eq!(
        state.legal_actions().to_vec(),
        vec![Action::choose(0), Action::choose(1)]
    );
    assert!(matches!(
        state.step(&Action::EndTurn),
        Err(SimError::InvalidAction { .. })
    ));
    assert!(matches!(
        state.step(&Action::choose(9)),
        Err(SimError::InvalidChoice(_))
    ));
    assert!(state.awaiting_choice());

    state.step(&Action::choose(0)).expect("choice");
    assert!(!state.awaiting_choice());
    let strike = state.hand.iter().find(|card| card.uuid.as_str() == "h1").expect("strike");
    assert_eq!(strike.name, "Strike+");
    assert_eq!(strike.upgrades, 1);
    assert_eq!(state.tracked.skills_this_turn, 1);
}

#[test]
fn single_candidate_resolves_without_asking() {
    let mut state = new_combat(&["Cultist"], &["Armaments", "Strike"], &[]);
    play(&mut state, "h0", None);
    assert!(!state.awaiting_choice());
    assert_eq!(state.hand[0].upgrades, 1);
}

#[test]
fn choose_without_pending_is_an_error() {
    let mut state = new_combat(&["Cultist"], &[], &[]);
    assert_eq!(state.step(&Action::choose(0)), Err(SimError::NoPendingChoice));
}

#[test]
fn dual_wield_copies_the_only_attack() {
    let mut state = new_combat(&["Cultist"], &["Dual Wield", "Strike", "Defend"], &[]);
    play(&mut state, "h0", None);
    assert!(!state.awaiting_choice());
    let strikes = state.hand.iter().filter(|card| card.id == "Strike_R").count();
    assert_eq!(strikes, 2);
    assert_eq!(state.hand.len(), 3);
}

#[test]
fn headbutt_puts_a_discarded_card_on_top() {
    let library = library();
    let mut state = new_combat(&["Cultist"], &["Headbutt"], &[]);
    state.discard_pile = make_cards(&library, "x", &["Defend"]);
    play(&mut state, "h0", Some(0));
    assert_eq!(state.monsters[0].current_hp, 41);
    assert!(state.awaiting_choice());
    state
        .step(&Action::Choose {
            choice: ChoiceRef::Name("defend".to_string()),
        })
        .expect("choice by name");
    assert_eq!(state.draw_pile.last().map(|card| card.uuid.as_str()), Some("x0"));
    assert_eq!(uuids(&state.discard_pile), vec!["h0"]);
}

#[test]
fn discovery_offers_three_free_cards() {
    let mut state = new_combat(&["Cultist"], &["Discovery"], &[]);
    play(&mut state, "h0", None);
    let pending = state.pending_choice.as_ref().expect("pending choice");
    assert_eq!(pending.candidates.len(), 3);
    assert_eq!(pending.screen_type(), "CARD_REWARD");
    state.step(&Action::choose(1)).expect("choice");
    assert_eq!(state.hand.len(), 1);
    assert_eq!(state.hand[0].cost_for_turn, Some(0));
    assert_eq!(uuids(&state.exhaust_pile), vec!["h0"]);
}

#[test]
fn apply_action_leaves_the_source_untouched() {
    let state = new_combat(&["Cultist"], &["Strike"], &[]);
    let next = apply_action(&state, &Action::EndTurn).expect("end turn");
    assert_eq!(state.turn, 1);
    assert_eq!(next.turn, 2);
    assert!(!state.is_fork());
    assert!(next.is_fork());
    let after = apply_action(&next, &Action::EndTurn).expect("end turn");
    assert_eq!(after.origin().turn, 1);
}

#[test]
fn snapshot_without_player_is_rejected() {
    assert!(matches!(
        CombatState::try_from(CombatSnapshot::default()),
        Err(SimError::MissingActor("player"))
    ));
    assert!(serde_json::from_str::<CombatState>("{}").is_err());
}

#[test]
fn serialized_state_relinks_to_the_library() {
    let state = new_combat(&["JawWorm"], &["Strike", "Defend"], &["Bash"]);
    let text = serde_json::to_string(&state).expect("serialize");
    let restored: CombatState = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(restored.player.current_hp, 50);
    assert_eq!(uuids(&restored.hand), vec!["h0", "h1"]);
    assert!(restored.hand[0].effects().is_empty());

    let mut linked = restored;
    linked.attach_library(library());
    assert!(!linked.hand[0].effects().is_empty());
    assert!(linked.monsters[0].definition().is_some());
    linked.step(&Action::play("h0", Some(0))).expect("strike");
    assert_eq!(linked.monsters[0].current_hp, 36);
}

#[test]
fn random_walk_conserves_cards() {
    let library = library();
    let monster = library.spawn_monster("JawWorm", 0).expect("monster");
    let mut state = CombatState::new(Player::new(80, 80), vec![monster], Arc::clone(&library), 99);
    state.draw_pile = make_cards(
        &library,
        "d",
        &["Strike", "Strike", "Strike", "Strike", "Strike", "Defend", "Defend", "Defend", "Defend", "Bash"],
    );
    state.begin_combat();
    assert_eq!(state.hand.len(), 5);
    assert_eq!(state.player.energy, 3);
    let total = state.total_cards();
    for step in 0..60 {
        let actions = state.legal_actions();
        if actions.is_empty() {
            break;
        }
        let action = actions[step % actions.len()].clone();
        state.step(&action).expect("legal action applies");
        assert_eq!(state.total_cards(), total);
        assert!(state.hand.len() <= 10);
        assert!(state.player.energy >= 0);
        assert!(state.player.current_hp <= state.player.max_hp);
        if state.is_terminal() {
            assert!(state.phase.is_terminal());
        }
    }
}

#[test]
fn intangible_caps_attacks_but_not_hp_loss() {
    let mut state = new_combat(&["Cultist"], &["Strike", "Bloodletting"], &[]);
    state.monsters[0].powers.add(PowerId::Intangible, 1);
    play(&mut state, "h0", Some(0));
    assert_eq!(state.monsters[0].current_hp, 49);

    state.player.powers.add(PowerId::Intangible, 1);
    play(&mut state, "h1", None);
    assert_eq!(state.player.current_hp, 47);
}

#[test]
fn monster_block_absorbs_a_smaller_hit() {
    let mut state = new_combat(&["Cultist"], &["Strike"], &[]);
    state.monsters[0].block = 8;
    play(&mut state, "h0", Some(0));
    assert_eq!(state.monsters[0].current_hp, 50);
    assert_eq!(state.monsters[0].block, 2);
}

#[test]
fn player_block_covers_a_smaller_attack() {
    let mut state = new_combat(&["JawWorm"], &[], &[]);
    assert_eq!(state.monsters[0].next_move.as_deref(), Some("Chomp"));
    state.player.block = 12;
    end_turn(&mut state);
    assert_eq!(state.player.current_hp, 50);
}

#[test]
fn empty_draw_pile_reshuffles_the_whole_discard_once() {
    let mut state = new_combat(&["Cultist"], &[], &[]);
    let discard = make_cards(
        state.library(),
        "x",
        &["Strike", "Strike", "Defend", "Bash", "Anger"],
    );
    let mut before: Vec<String> = discard.iter().map(|card| card.uuid.as_str().to_string()).collect();
    state.discard_pile = discard;
    let reshuffles = state.tracked.reshuffles;

    state.draw_cards(1);
    assert_eq!(state.hand.len(), 1);
    assert_eq!(state.draw_pile.len(), 4);
    assert!(state.discard_pile.is_empty());
    assert_eq!(state.tracked.reshuffles, reshuffles + 1);

    let mut after: Vec<String> = state
        .hand
        .iter()
        .chain(state.draw_pile.iter())
        .map(|card| card.uuid.as_str().to_string())
        .collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn random_target_is_rolled_per_effect() {
    let state = new_combat(&["Cultist", "Cultist"], &["Sword Boomerang"], &[]);
    let first = apply_action(&state, &Action::play("h0", None)).expect("boomerang");
    let lost = hp_lost(&first);
    assert_eq!(lost.iter().sum::<i32>(), 9);
    assert!(lost.iter().all(|hp| hp % 3 == 0));

    let second = apply_action(&state, &Action::play("h0", None)).expect("boomerang");
    assert_eq!(hp_lost(&second), lost);
}

#[test]
fn multi_hit_random_effect_keeps_one_target() {
    let mut library = CardLibrary::builtin();
    library.insert_card(CardDef {
        id: "Flurry".to_string(),
        name: "Flurry".to_string(),
        card_type: CardType::Attack,
        rarity: CardRarity::Special,
        base: CardVariant::new(
            1,
            vec![Effect::on_random(EffectKind::Damage { amount: 2, hits: 4 })],
        ),
        upgraded: None,
        multi_upgrade: false,
    });
    let state = new_combat_in(Arc::new(library), &["Cultist", "Cultist"], &["Flurry"], &[]);
    for seed in 0..8 {
        let next = apply_action(&state.fork_with_seed(seed), &Action::play("h0", None))
            .expect("flurry");
        let mut lost = hp_lost(&next);
        lost.sort();
        assert_eq!(lost, vec![0, 8], "seed {seed}");
    }
}
