use spirebot_core::{
    apply_action, Action, Card, CardLibrary, CardUuid, CombatPhase, CombatState, Player,
};
use spirebot_search::{
    reward, run_combat, search_best_action, write_json, CombatRun, RewardWeights, RunStatus,
    SearchBudget, SearchConfig, SearchError,
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
    let mut player = Player::new(80, 80);
    player.energy = 3;
    let mut state = CombatState::new(player, monsters, Arc::clone(&library), 5);
    state.hand = make_cards(&library, "h", hand);
    state.draw_pile = make_cards(&library, "d", draw);
    state.register_start_of_combat();
    for idx in 0..state.monsters.len() {
        state.roll_move(idx);
    }
    state
}

fn iterations(count: u32) -> SearchConfig {
    SearchConfig::default().with_budget(SearchBudget::Iterations(count))
}

macro_rules! default_case {
    ($name:ident, $field:ident, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(SearchConfig::default().$field, $expected);
        }
    };
}

default_case!(default_exploration, exploration_c, std::f64::consts::FRAC_1_SQRT_2);
default_case!(default_end_turn_weight, end_turn_weight, 0.15);
default_case!(default_budget, budget, SearchBudget::Iterations(1000));
default_case!(
    default_weights,
    weights,
    RewardWeights {
        hp: 1.0,
        max_hp: 7.0,
        potion: 7.0,
        round_cost: 0.5,
    }
);

#[test]
fn terminal_root_is_an_error() {
    let mut state = new_combat(&["Cultist"], &["Strike"], &[]);
    state.monsters[0].current_hp = 0;
    let err = search_best_action(&state, &iterations(10)).expect_err("terminal");
    assert!(matches!(err, SearchError::TerminalRoot));
}

#[test]
fn root_outside_the_player_turn_has_no_actions() {
    let mut state = new_combat(&["Cultist"], &["Strike"], &[]);
    state.phase = CombatPhase::MonsterTurnActive;
    let err = search_best_action(&state, &iterations(10)).expect_err("no actions");
    assert!(matches!(err, SearchError::NoLegalAction));
}

#[test]
fn iteration_budget_is_exact() {
    let state = new_combat(&["JawWorm"], &["Strike", "Defend", "Bash"], &["Strike"; 5]);
    let outcome = search_best_action(&state, &iterations(64)).expect("search");
    assert_eq!(outcome.stats.iterations, 64);
    let visits: u32 = outcome.stats.children.iter().map(|child| child.visits).sum();
    assert_eq!(visits, 64);
    assert_eq!(outcome.stats.children.len(), state.legal_actions().len());
    assert!(outcome.stats.child(&outcome.action).is_some());
}

#[test]
fn zero_iterations_still_return_an_action() {
    let state = new_combat(&["Cultist"], &["Strike"], &[]);
    let outcome = search_best_action(&state, &iterations(0)).expect("search");
    assert_eq!(outcome.stats.iterations, 1);
    assert!(state.legal_actions().contains(&outcome.action));
}

#[test]
fn time_budget_runs_at_least_once() {
    let state = new_combat(&["Cultist"], &["Strike", "Defend"], &["Strike"; 5]);
    let config = SearchConfig::default().with_budget(SearchBudget::Millis(5));
    let outcome = search_best_action(&state, &config).expect("search");
    assert!(outcome.stats.iterations >= 1);
    assert!(state.legal_actions().contains(&outcome.action));
}

#[test]
fn same_seed_builds_the_same_tree() {
    let state = new_combat(&["Cultist", "JawWorm"], &["Strike", "Bash", "Defend"], &["Strike"; 5]);
    let config = iterations(150).with_seed(77);
    let first = search_best_action(&state, &config).expect("first");
    let second = search_best_action(&state, &config).expect("second");
    assert_eq!(first.action, second.action);
    assert_eq!(first.stats.children, second.stats.children);
    assert_eq!(first.stats.nodes, second.stats.nodes);
}

#[test]
fn search_does_not_touch_the_root() {
    let state = new_combat(&["Cultist"], &["Strike"], &["Defend"; 5]);
    let hand_before: Vec<CardUuid> = state.hand.iter().map(|card| card.uuid.clone()).collect();
    search_best_action(&state, &iterations(40)).expect("search");
    let hand_after: Vec<CardUuid> = state.hand.iter().map(|card| card.uuid.clone()).collect();
    assert_eq!(hand_before, hand_after);
    assert_eq!(state.monsters[0].current_hp, 50);
    assert_eq!(state.player.current_hp, 80);
}

#[test]
fn lethal_is_preferred_over_passing() {
    let mut state = new_combat(&["Cultist"], &["Strike"], &["Defend"; 5]);
    state.monsters[0].current_hp = 6;
    let outcome = search_best_action(&state, &iterations(200)).expect("search");
    assert_eq!(outcome.action, Action::play("h0", Some(0)));
    assert_eq!(outcome.value, -0.5);
}

#[test]
fn pending_choice_roots_pick_a_candidate() {
    let state = new_combat(&["Cultist"], &["Armaments", "Strike", "Defend"], &[]);
    let pending = apply_action(&state, &Action::play("h0", None)).expect("armaments");
    let outcome = search_best_action(&pending, &iterations(30)).expect("search");
    assert!(matches!(outcome.action, Action::Choose { .. }));
}

#[test]
fn outcome_value_is_relative_to_the_real_state() {
    let state = new_combat(&["Cultist"], &["Strike"], &[]);
    let forked = apply_action(&state, &Action::EndTurn).expect("end turn");
    let value = reward(&forked, &RewardWeights::default());
    let lost = (state.player.current_hp - forked.player.current_hp) as f64;
    assert_eq!(value, -lost - 0.5 * forked.turn as f64);
}

#[test]
fn run_combat_plays_to_victory() {
    let state = new_combat(
        &["Cultist"],
        &["Strike", "Strike", "Bash", "Defend", "Defend"],
        &[
            "Strike", "Strike", "Strike", "Defend", "Defend", "Defend", "Strike", "Defend",
        ],
    );
    let run = run_combat(&state, &iterations(60)).expect("run");
    assert_eq!(run.status, RunStatus::Victory);
    assert!(run.final_hp > 0);
    assert_eq!(run.summary.steps as usize, run.steps.len());
    assert!(run.steps.iter().all(|step| step.search.iterations == 60));
    assert!(run
        .steps
        .iter()
        .any(|step| step.changes.iter().any(|line| line.starts_with("Cultist#0 hp:"))));
}

#[test]
fn run_combat_respects_max_steps() {
    let state = new_combat(&["TheGuardian"], &["Defend"], &["Defend"; 5]);
    let mut config = iterations(5);
    config.max_steps = 3;
    let run = run_combat(&state, &config).expect("run");
    assert_eq!(run.status, RunStatus::MaxSteps);
    assert_eq!(run.steps.len(), 3);
}

#[test]
fn run_reports_are_written_as_json() {
    let state = new_combat(&["Cultist"], &["Strike"], &["Strike"; 5]);
    let mut config = iterations(8);
    config.max_steps = 2;
    let run = run_combat(&state, &config).expect("run");
    let dir = std::env::temp_dir().join(format!("spirebot-search-{}", std::process::id()));
    let path = dir.join("run.json");
    write_json(&path, &run).expect("write");
    let body = std::fs::read_to_string(&path).expect("read");
    let back: CombatRun = serde_json::from_str(&body).expect("parse");
    assert_eq!(back.steps.len(), run.steps.len());
    assert!(run.to_text_report().starts_with("status: "));
    let _ = std::fs::remove_dir_all(dir);
}
