use crate::load::load_json;
use anyhow::Context;
use spirebot_core::{CardLibrary, CombatSnapshot, CombatState, GameSnapshot};
use std::path::Path;
use std::sync::Arc;

pub fn load_combat_snapshot(path: &Path) -> anyhow::Result<CombatSnapshot> {
    load_json(path)
}

/// Read a combat observation and link it against `library`.
pub fn load_combat(
    path: &Path,
    library: &Arc<CardLibrary>,
    seed: u64,
) -> anyhow::Result<CombatState> {
    let snapshot = load_combat_snapshot(path)?;
    library
        .link_snapshot(snapshot, seed)
        .with_context(|| format!("link {}", path.display()))
}

/// Read a whole-game observation; an embedded combat is linked against `library`.
pub fn load_game_snapshot(path: &Path, library: &Arc<CardLibrary>) -> anyhow::Result<GameSnapshot> {
    let mut snapshot: GameSnapshot = load_json(path)?;
    if let Some(combat) = snapshot.combat.as_mut() {
        combat.attach_library(Arc::clone(library));
    }
    Ok(snapshot)
}
