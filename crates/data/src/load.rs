use crate::schema::{CardRecord, MonsterRecord, MoveRecord, VariantRecord};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use spirebot_core::{
    catalog, CardDef, CardLibrary, CardVariant, Effect, EffectKind, MonsterDef, MoveDef,
    TargetMode,
};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CARDS_FILE: &str = "cards.json";
pub const MONSTERS_FILE: &str = "monsters.json";

/// Definitions read from a data directory, with everything that degraded on the way.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub library: CardLibrary,
    pub cards: usize,
    pub monsters: usize,
    /// Records dropped because they did not parse.
    pub skipped: usize,
    /// Effects kept as `Unmapped`.
    pub unmapped: usize,
    pub warnings: Vec<String>,
}

impl LoadReport {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// Load `cards.json` and `monsters.json` from `dir`. A missing file is a
/// warning; an unreadable file or a file that is not a JSON array is an error.
pub fn load_library(dir: &Path) -> anyhow::Result<LoadReport> {
    let mut report = LoadReport::default();
    let cards_path = dir.join(CARDS_FILE);
    if cards_path.exists() {
        let raw = read(&cards_path)?;
        parse_cards(&raw, &cards_path.display().to_string(), &mut report)?;
    } else {
        report.warn(format!("missing {}", cards_path.display()));
    }
    let monsters_path = dir.join(MONSTERS_FILE);
    if monsters_path.exists() {
        let raw = read(&monsters_path)?;
        parse_monsters(&raw, &monsters_path.display().to_string(), &mut report)?;
    } else {
        report.warn(format!("missing {}", monsters_path.display()));
    }
    info!(
        cards = report.cards,
        monsters = report.monsters,
        skipped = report.skipped,
        unmapped = report.unmapped,
        "loaded definitions from {}",
        dir.display()
    );
    Ok(report)
}

/// Built-in catalog overlaid with the definitions in `dir`.
pub fn load_library_over_builtin(dir: &Path) -> anyhow::Result<LoadReport> {
    let mut report = load_library(dir)?;
    let mut library = CardLibrary::builtin();
    library.extend(std::mem::take(&mut report.library));
    report.library = library;
    Ok(report)
}

pub fn parse_cards(raw: &str, source: &str, report: &mut LoadReport) -> anyhow::Result<()> {
    for (idx, value) in parse_records(raw, source)?.into_iter().enumerate() {
        let record: CardRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                report.skipped += 1;
                report.warn(format!("{source}[{idx}]: skipped card record: {err}"));
                continue;
            }
        };
        let def = card_def(record, report);
        report.library.insert_card(def);
        report.cards += 1;
    }
    Ok(())
}

pub fn parse_monsters(raw: &str, source: &str, report: &mut LoadReport) -> anyhow::Result<()> {
    for (idx, value) in parse_records(raw, source)?.into_iter().enumerate() {
        let record: MonsterRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                report.skipped += 1;
                report.warn(format!("{source}[{idx}]: skipped monster record: {err}"));
                continue;
            }
        };
        if record.moves.is_empty() {
            report.skipped += 1;
            report.warn(format!("{source}[{idx}]: monster {} has no moves", record.id));
            continue;
        }
        let def = monster_def(record, report);
        report.library.insert_monster(def);
        report.monsters += 1;
    }
    Ok(())
}

/// Write the built-in catalog in the format `load_library` reads.
pub fn export_builtin(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    write_json(&dir.join(CARDS_FILE), &catalog::cards())?;
    write_json(&dir.join(MONSTERS_FILE), &catalog::monsters())?;
    Ok(())
}

fn card_def(record: CardRecord, report: &mut LoadReport) -> CardDef {
    let name = record.name.unwrap_or_else(|| record.id.clone());
    let base = variant(record.base, &name, report);
    let upgraded = record
        .upgraded
        .map(|item| variant(item, &format!("{name}+"), report));
    CardDef {
        id: record.id,
        name,
        card_type: record.card_type,
        rarity: record.rarity,
        base,
        upgraded,
        multi_upgrade: record.multi_upgrade,
    }
}

fn variant(record: VariantRecord, owner: &str, report: &mut LoadReport) -> CardVariant {
    let effects = effects(&record.effects, owner, report);
    let has_target = record.has_target.unwrap_or_else(|| {
        effects
            .iter()
            .any(|effect| effect.target == TargetMode::One)
    });
    CardVariant {
        cost: record.cost,
        has_target,
        exhausts: record.exhausts,
        ethereal: record.ethereal,
        innate: record.innate,
        effects,
    }
}

fn monster_def(record: MonsterRecord, report: &mut LoadReport) -> MonsterDef {
    let name = record.name.unwrap_or_else(|| record.id.clone());
    let moves: Vec<MoveDef> = record
        .moves
        .into_iter()
        .map(|item| move_def(item, &name, report))
        .collect();
    if let Some(first) = record.first_move.as_deref() {
        check_move_exists(&moves, first, &name, report);
    }
    MonsterDef {
        id: record.id,
        name,
        max_hp: record.max_hp,
        first_move: record.first_move,
        moves,
        powers: record.powers,
    }
}

fn move_def(record: MoveRecord, monster: &str, report: &mut LoadReport) -> MoveDef {
    let owner = format!("{monster}/{}", record.name);
    MoveDef {
        effects: effects(&record.effects, &owner, report),
        name: record.name,
        intent: record.intent,
        weight: record.weight,
        max_repeats: record.max_repeats,
        next: record.next,
    }
}

fn check_move_exists(moves: &[MoveDef], name: &str, monster: &str, report: &mut LoadReport) {
    if !moves.iter().any(|item| item.name == name) {
        report.warn(format!("{monster}: first move {name} is not in its move list"));
    }
}

fn effects(raw: &[Value], owner: &str, report: &mut LoadReport) -> Vec<Effect> {
    raw.iter().map(|value| effect(value, owner, report)).collect()
}

/// Parse one effect. Names may be written as `ApplyPower` or `apply_power`;
/// an effect without a target applies to its owner.
fn effect(value: &Value, owner: &str, report: &mut LoadReport) -> Effect {
    let mut object = match value {
        Value::String(name) => {
            let mut object = serde_json::Map::new();
            object.insert("effect".to_string(), Value::String(name.clone()));
            object
        }
        Value::Object(object) => object.clone(),
        other => {
            report.unmapped += 1;
            report.warn(format!("{owner}: effect is not an object: {other}"));
            return Effect::unmapped(other.to_string());
        }
    };
    let name = object
        .get("effect")
        .and_then(Value::as_str)
        .map(snake_case)
        .unwrap_or_default();
    object.insert("effect".to_string(), Value::String(name.clone()));
    object
        .entry("target")
        .or_insert_with(|| Value::String("self".to_string()));

    match serde_json::from_value::<Effect>(Value::Object(object)) {
        Ok(effect) => {
            if let EffectKind::Unmapped { name } = &effect.kind {
                report.unmapped += 1;
                report.warn(format!("{owner}: effect {name} is declared unmapped"));
            }
            effect
        }
        Err(err) => {
            report.unmapped += 1;
            report.warn(format!("{owner}: unmapped effect {name:?}: {err}"));
            Effect::unmapped(if name.is_empty() { "<unnamed>".to_string() } else { name })
        }
    }
}

/// `ApplyPower`, `apply power` and `apply-power` all become `apply_power`.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else if ch == ' ' || ch == '-' || ch == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

fn parse_records(raw: &str, source: &str) -> anyhow::Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw).with_context(|| format!("parse {source}"))?;
    match value {
        Value::Array(items) => Ok(items),
        _ => bail!("{source}: expected a JSON array of records"),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub(crate) fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = read(path)?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_normalizes_effect_names() {
        assert_eq!(snake_case("ApplyPower"), "apply_power");
        assert_eq!(snake_case("apply_power"), "apply_power");
        assert_eq!(snake_case("Gain Energy"), "gain_energy");
        assert_eq!(snake_case("lose-hp"), "lose_hp");
        assert_eq!(snake_case("Damage"), "damage");
    }

    #[test]
    fn string_effects_and_missing_targets_default_to_self() {
        let mut report = LoadReport::default();
        let parsed = effect(&Value::String("Escape".to_string()), "x", &mut report);
        assert_eq!(parsed.kind, EffectKind::Escape);
        assert_eq!(parsed.target, TargetMode::SelfTarget);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn bad_fields_degrade_to_unmapped() {
        let mut report = LoadReport::default();
        let value = serde_json::json!({ "effect": "Damage", "amount": "lots" });
        let parsed = effect(&value, "Card", &mut report);
        assert_eq!(
            parsed.kind,
            EffectKind::Unmapped {
                name: "damage".to_string()
            }
        );
        assert_eq!(report.unmapped, 1);
    }
}
