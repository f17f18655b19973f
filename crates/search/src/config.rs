use crate::RewardWeights;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

/// How long one decision may search. The two limits never combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBudget {
    Iterations(u32),
    Millis(u64),
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::Iterations(1000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub seed: u64,
    pub budget: SearchBudget,
    pub exploration_c: f64,
    /// Rollout weight of `EndTurn` relative to every other action.
    pub end_turn_weight: f64,
    /// Rounds a rollout may advance past its start before it is scored.
    pub rollout_round_cap: u32,
    /// Decisions `run_combat` makes before giving up.
    pub max_steps: u32,
    pub weights: RewardWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            budget: SearchBudget::default(),
            exploration_c: FRAC_1_SQRT_2,
            end_turn_weight: 0.15,
            rollout_round_cap: 20,
            max_steps: 500,
            weights: RewardWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
