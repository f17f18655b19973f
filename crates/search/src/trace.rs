use crate::SearchError;
use serde::{Deserialize, Serialize};
use spirebot_core::Action;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildStats {
    pub action: Action,
    pub visits: u32,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchStats {
    pub iterations: u32,
    pub elapsed_ms: u64,
    pub nodes: usize,
    pub max_depth: u32,
    /// Root children in stable-key order.
    pub children: Vec<ChildStats>,
}

impl SearchStats {
    pub fn child(&self, action: &Action) -> Option<&ChildStats> {
        self.children.iter().find(|child| &child.action == action)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchOutcome {
    pub action: Action,
    /// Raw mean reward of the chosen root child.
    pub value: f64,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Victory,
    Defeat,
    MaxSteps,
    NoLegalAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    pub turn_before: u32,
    pub hp_before: i32,
    pub energy_before: i32,
    pub action: Action,
    pub search: SearchStats,
    pub value: f64,
    pub turn_after: u32,
    pub hp_after: i32,
    pub monster_hp_after: Vec<i32>,
    #[serde(default)]
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub steps: u32,
    pub total_iterations: u64,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatRun {
    pub status: RunStatus,
    pub final_hp: i32,
    pub final_turn: u32,
    pub steps: Vec<StepRecord>,
    pub summary: SummaryStats,
}

impl CombatRun {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status: {}", run_status_label(self.status)),
            format!("final: hp={} turn={}", self.final_hp, self.final_turn),
            format!(
                "summary: steps={} iterations={} wall_ms={}",
                self.summary.steps, self.summary.total_iterations, self.summary.wall_time_ms
            ),
            String::new(),
            "steps:".to_string(),
        ];
        for step in &self.steps {
            lines.push(format!("  step {:>4} | {}", step.step, step.action));
            lines.push(format!(
                "    state: turn {} hp {} energy {}",
                step.turn_before, step.hp_before, step.energy_before
            ));
            lines.push(format!(
                "      -> turn {} hp {} monsters {:?}",
                step.turn_after, step.hp_after, step.monster_hp_after
            ));
            lines.push(format!(
                "    search: iterations={} elapsed={}ms nodes={} depth={} value={:.2}",
                step.search.iterations,
                step.search.elapsed_ms,
                step.search.nodes,
                step.search.max_depth,
                step.value
            ));
            for change in &step.changes {
                lines.push(format!("    change: {change}"));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

fn run_status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Victory => "Victory",
        RunStatus::Defeat => "Defeat",
        RunStatus::MaxSteps => "MaxSteps",
        RunStatus::NoLegalAction => "NoLegalAction",
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SearchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, run: &CombatRun) -> Result<(), SearchError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, run.to_text_report())?;
    Ok(())
}
