use crate::{
    reward, ChildStats, CombatRun, RunStatus, SearchBudget, SearchConfig, SearchError,
    SearchOutcome, SearchStats, StepRecord, SummaryStats,
};
use spirebot_core::{diff_combat, Action, CombatState, RngState, SimError};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    action: Option<Action>,
    state: CombatState,
    visits: u32,
    value_sum: f64,
    children: Vec<usize>,
    unexpanded: Vec<Action>,
    terminal: bool,
    depth: u32,
}

impl Node {
    fn new_root(state: CombatState) -> Self {
        Self::build(None, None, state, 0)
    }

    fn new_child(parent: usize, action: Action, state: CombatState, depth: u32) -> Self {
        Self::build(Some(parent), Some(action), state, depth)
    }

    fn build(parent: Option<usize>, action: Option<Action>, state: CombatState, depth: u32) -> Self {
        let unexpanded = state.legal_actions().to_vec();
        let terminal = state.is_terminal() || unexpanded.is_empty();
        Self {
            parent,
            action,
            state,
            visits: 0,
            value_sum: 0.0,
            children: Vec::new(),
            unexpanded,
            terminal,
            depth,
        }
    }

    fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f64
        }
    }
}

/// Search from `root` within the configured budget and return the root
/// child with the best raw mean reward.
pub fn search_best_action(
    root: &CombatState,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    if root.is_terminal() {
        return Err(SearchError::TerminalRoot);
    }
    if root.legal_actions().is_empty() {
        return Err(SearchError::NoLegalAction);
    }

    let started_at = Instant::now();
    let mut rng = RngState::from_seed(config.seed);
    let mut nodes = vec![Node::new_root(root.fork())];
    let mut iterations = 0u32;

    while !budget_spent(config.budget, iterations, started_at) {
        let leaf = select_and_expand(&mut nodes, config.exploration_c, &mut rng);
        let value = rollout(&nodes[leaf].state, config, &mut rng);
        let mut walk = Some(leaf);
        while let Some(idx) = walk {
            nodes[idx].visits = nodes[idx].visits.saturating_add(1);
            nodes[idx].value_sum += value;
            walk = nodes[idx].parent;
        }
        iterations = iterations.saturating_add(1);
    }

    let mut children: Vec<ChildStats> = nodes[0]
        .children
        .iter()
        .filter_map(|&idx| {
            let node = &nodes[idx];
            node.action.clone().map(|action| ChildStats {
                action,
                visits: node.visits,
                mean: node.mean(),
            })
        })
        .collect();
    children.sort_by_key(|child| child.action.stable_key());

    let (action, value) = pick_final(&children).unwrap_or_else(|| {
        let fallback = root.legal_actions()[0].clone();
        (fallback, reward(root, &config.weights))
    });
    let stats = SearchStats {
        iterations,
        elapsed_ms: started_at.elapsed().as_millis() as u64,
        nodes: nodes.len(),
        max_depth: nodes.iter().map(|node| node.depth).max().unwrap_or(0),
        children,
    };
    debug!(
        action = %action,
        value,
        iterations = stats.iterations,
        nodes = stats.nodes,
        elapsed_ms = stats.elapsed_ms,
        "search finished"
    );
    Ok(SearchOutcome {
        action,
        value,
        stats,
    })
}

/// Play `start` to the end, searching before every decision.
pub fn run_combat(start: &CombatState, config: &SearchConfig) -> Result<CombatRun, SearchError> {
    let started_at = Instant::now();
    let mut state = start.clone();
    let mut steps: Vec<StepRecord> = Vec::new();
    let mut total_iterations = 0u64;
    let mut status = None;

    for step in 0..config.max_steps {
        if state.is_terminal() {
            break;
        }
        let step_config = config
            .clone()
            .with_seed(config.seed ^ (step as u64).wrapping_mul(0x9E3779B9));
        let outcome = match search_best_action(&state, &step_config) {
            Ok(outcome) => outcome,
            Err(SearchError::NoLegalAction) => {
                status = Some(RunStatus::NoLegalAction);
                break;
            }
            Err(err) => return Err(err),
        };
        total_iterations += u64::from(outcome.stats.iterations);

        let before = state.clone();
        state.step(&outcome.action)?;
        let changes = diff_combat(&before, &state)
            .iter()
            .map(ToString::to_string)
            .collect();
        steps.push(StepRecord {
            step,
            turn_before: before.turn,
            hp_before: before.player.current_hp,
            energy_before: before.player.energy,
            action: outcome.action,
            search: outcome.stats,
            value: outcome.value,
            turn_after: state.turn,
            hp_after: state.player.current_hp,
            monster_hp_after: state.monsters.iter().map(|m| m.current_hp).collect(),
            changes,
        });
    }

    let status = status.unwrap_or_else(|| {
        if !state.is_terminal() {
            RunStatus::MaxSteps
        } else if state.player.current_hp <= 0 {
            RunStatus::Defeat
        } else {
            RunStatus::Victory
        }
    });
    info!(
        status = ?status,
        steps = steps.len(),
        hp = state.player.current_hp,
        turn = state.turn,
        "combat run finished"
    );
    Ok(CombatRun {
        status,
        final_hp: state.player.current_hp,
        final_turn: state.turn,
        summary: SummaryStats {
            steps: steps.len() as u32,
            total_iterations,
            wall_time_ms: started_at.elapsed().as_millis() as u64,
        },
        steps,
    })
}

fn budget_spent(budget: SearchBudget, iterations: u32, started_at: Instant) -> bool {
    match budget {
        SearchBudget::Iterations(limit) => iterations >= limit.max(1),
        SearchBudget::Millis(limit) => {
            iterations > 0 && started_at.elapsed().as_millis() as u64 >= limit
        }
    }
}

/// Descend through fully expanded nodes, then expand one untried action.
/// Returns the node the rollout starts from.
fn select_and_expand(nodes: &mut Vec<Node>, exploration_c: f64, rng: &mut RngState) -> usize {
    let mut idx = 0usize;
    loop {
        if nodes[idx].terminal {
            return idx;
        }
        if !nodes[idx].unexpanded.is_empty() {
            let pick = rng.gen_index(nodes[idx].unexpanded.len());
            let action = nodes[idx].unexpanded.remove(pick);
            match advance(&nodes[idx].state, &action, rng) {
                Ok(state) => {
                    let child = nodes.len();
                    let depth = nodes[idx].depth + 1;
                    nodes.push(Node::new_child(idx, action, state, depth));
                    nodes[idx].children.push(child);
                    return child;
                }
                Err(err) => {
                    warn!(action = %action, error = %err, "enumerated action failed to apply");
                    if nodes[idx].unexpanded.is_empty() && nodes[idx].children.is_empty() {
                        nodes[idx].terminal = true;
                        return idx;
                    }
                    continue;
                }
            }
        }
        idx = select_child(nodes, idx, exploration_c, rng);
    }
}

fn select_child(nodes: &[Node], parent: usize, exploration_c: f64, rng: &mut RngState) -> usize {
    let ln_parent = (nodes[parent].visits.max(1) as f64).ln();
    let mut best: Vec<usize> = Vec::new();
    let mut best_score = f64::NEG_INFINITY;
    for &child in &nodes[parent].children {
        let score = uct_score(&nodes[child], ln_parent, exploration_c);
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(child);
        } else if score == best_score {
            best.push(child);
        }
    }
    match best.len() {
        0 => nodes[parent].children[0],
        len => best[rng.gen_index(len)],
    }
}

fn uct_score(node: &Node, ln_parent: f64, exploration_c: f64) -> f64 {
    if node.visits == 0 {
        return f64::INFINITY;
    }
    node.mean() + exploration_c * (2.0 * ln_parent / node.visits as f64).sqrt()
}

/// Fork with a fresh seed drawn from the search RNG, then apply `action`.
fn advance(state: &CombatState, action: &Action, rng: &mut RngState) -> Result<CombatState, SimError> {
    let mut next = state.fork_with_seed(rng.next_u64());
    next.step(action)?;
    Ok(next)
}

fn rollout(start: &CombatState, config: &SearchConfig, rng: &mut RngState) -> f64 {
    if start.is_terminal() {
        return reward(start, &config.weights);
    }
    let mut state = start.fork_with_seed(rng.next_u64());
    let round_cap = start.turn.saturating_add(config.rollout_round_cap);
    while !state.is_terminal() && state.turn < round_cap {
        let legal = state.legal_actions();
        if legal.is_empty() {
            break;
        }
        let action = pick_rollout_action(&legal, config.end_turn_weight, rng);
        if let Err(err) = state.step(&action) {
            warn!(action = %action, error = %err, "rollout action failed to apply");
            return reward(start, &config.weights);
        }
    }
    reward(&state, &config.weights)
}

fn pick_rollout_action(legal: &[Action], end_turn_weight: f64, rng: &mut RngState) -> Action {
    let weights: Vec<f64> = legal
        .iter()
        .map(|action| if action.is_end_turn() { end_turn_weight } else { 1.0 })
        .collect();
    let idx = rng
        .pick_weighted(&weights)
        .unwrap_or_else(|| rng.gen_index(legal.len()));
    legal[idx].clone()
}

/// Best raw mean, ties broken by visits and then by stable key.
fn pick_final(children: &[ChildStats]) -> Option<(Action, f64)> {
    let mut best: Option<&ChildStats> = None;
    for child in children.iter().filter(|child| child.visits > 0) {
        let better = match best {
            None => true,
            Some(current) => {
                child.mean > current.mean
                    || (child.mean == current.mean && child.visits > current.visits)
            }
        };
        if better {
            best = Some(child);
        }
    }
    best.map(|child| (child.action.clone(), child.mean))
}
