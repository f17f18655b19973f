use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use spirebot_core::{
    check_prediction, diff, diff_combat, Action, CardLibrary, ChoiceRef, CombatState,
};
use spirebot_data::{
    export_builtin, load_combat, load_game_snapshot, load_library_over_builtin,
};
use spirebot_search::{
    run_combat, search_best_action, write_json, write_text, SearchBudget, SearchConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 0xC0FFEE;

const USAGE: &str = "usage: spirebot-cli [--cards DIR] [--seed N] <command> ...

commands:
  actions <combat.json>                     list legal actions
  step <combat.json> <action> [--out FILE]  apply one action and print the delta
  search <combat.json> [budget] [--out FILE]
  play <combat.json> [budget] [--out FILE] [--report FILE]
  diff <before.json> <after.json> [--game]  compare two snapshots
  check <before.json> <action> <after.json> compare a prediction with reality
  export <DIR>                              write the built-in catalog as JSON

budget: --iterations N | --millis N
action: end | play <uuid> [target] | potion <slot> [target] | choose <index|name> | JSON";

#[derive(Debug, Clone, Default)]
struct CliOptions {
    cards: Option<PathBuf>,
    seed: Option<u64>,
    iterations: Option<u32>,
    millis: Option<u64>,
    out: Option<PathBuf>,
    report: Option<PathBuf>,
    game: bool,
    help: bool,
    positional: Vec<String>,
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        let mut value = || -> anyhow::Result<String> {
            idx += 1;
            args.get(idx)
                .cloned()
                .ok_or_else(|| anyhow!("{arg} needs a value"))
        };
        match arg {
            "--cards" => options.cards = Some(PathBuf::from(value()?)),
            "--seed" => options.seed = Some(parse_number(&value()?, "--seed")?),
            "--iterations" => options.iterations = Some(parse_number(&value()?, "--iterations")?),
            "--millis" => options.millis = Some(parse_number(&value()?, "--millis")?),
            "--out" | "-o" => options.out = Some(PathBuf::from(value()?)),
            "--report" => options.report = Some(PathBuf::from(value()?)),
            "--game" => options.game = true,
            "--help" | "-h" => options.help = true,
            _ => options.positional.push(arg.to_string()),
        }
        idx += 1;
    }
    if options.iterations.is_some() && options.millis.is_some() {
        bail!("--iterations and --millis cannot be combined");
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> anyhow::Result<T> {
    raw.parse::<T>()
        .map_err(|_| anyhow!("{flag}: {raw:?} is not a number"))
}

/// Parse an action from the command line, either as JSON or as words.
fn parse_action(words: &[String]) -> anyhow::Result<Action> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed).with_context(|| format!("parse action {trimmed}"));
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let target = |raw: Option<&&str>| -> anyhow::Result<Option<usize>> {
        raw.map(|value| parse_number(value, "target")).transpose()
    };
    match parts.as_slice() {
        ["end" | "end_turn" | "e"] => Ok(Action::EndTurn),
        ["play" | "p", card, rest @ ..] if rest.len() <= 1 => {
            Ok(Action::play(*card, target(rest.first())?))
        }
        ["potion" | "u", slot, rest @ ..] if rest.len() <= 1 => Ok(Action::UsePotion {
            slot: parse_number(slot, "potion slot")?,
            target: target(rest.first())?,
        }),
        ["choose" | "c", rest @ ..] if !rest.is_empty() => {
            let raw = rest.join(" ");
            let choice = match raw.parse::<usize>() {
                Ok(index) => ChoiceRef::Index(index),
                Err(_) => ChoiceRef::Name(raw),
            };
            Ok(Action::Choose { choice })
        }
        _ => bail!("unrecognized action {trimmed:?}"),
    }
}

struct Session {
    library: Arc<CardLibrary>,
    seed: u64,
}

impl Session {
    fn load(options: &CliOptions) -> anyhow::Result<Self> {
        let library = match options.cards.as_deref() {
            Some(dir) => {
                let report = load_library_over_builtin(dir)?;
                for warning in &report.warnings {
                    eprintln!("data warning: {warning}");
                }
                report.library
            }
            None => CardLibrary::builtin(),
        };
        Ok(Self {
            library: Arc::new(library),
            seed: options.seed.unwrap_or(DEFAULT_SEED),
        })
    }

    fn combat(&self, path: &str) -> anyhow::Result<CombatState> {
        load_combat(Path::new(path), &self.library, self.seed)
    }
}

fn search_config(options: &CliOptions, seed: u64) -> SearchConfig {
    let budget = match (options.iterations, options.millis) {
        (_, Some(millis)) => SearchBudget::Millis(millis),
        (Some(iterations), None) => SearchBudget::Iterations(iterations),
        (None, None) => SearchBudget::default(),
    };
    SearchConfig::default().with_budget(budget).with_seed(seed)
}

fn write_output<T: Serialize>(path: Option<&Path>, value: &T) -> anyhow::Result<()> {
    if let Some(path) = path {
        write_json(path, value).with_context(|| format!("write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn need<'a>(positional: &'a [String], idx: usize, what: &str) -> anyhow::Result<&'a str> {
    positional
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing {what}\n\n{USAGE}"))
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let options = parse_cli_options(args)?;
    if options.help || options.positional.is_empty() {
        println!("{USAGE}");
        return Ok(());
    }
    let ctx = Session::load(&options)?;
    let positional = &options.positional;
    match positional[0].as_str() {
        "actions" => {
            let state = ctx.combat(need(positional, 1, "combat snapshot")?)?;
            for action in state.legal_actions().iter() {
                println!("{:<24} {action}", action.stable_key());
            }
        }
        "step" => {
            let state = ctx.combat(need(positional, 1, "combat snapshot")?)?;
            let action = parse_action(&positional[2..])?;
            let mut next = state.clone();
            next.step(&action)
                .with_context(|| format!("apply {action}"))?;
            print!("{}", diff_combat(&state, &next));
            write_output(options.out.as_deref(), &next)?;
        }
        "search" => {
            let state = ctx.combat(need(positional, 1, "combat snapshot")?)?;
            let outcome = search_best_action(&state, &search_config(&options, ctx.seed))?;
            println!("best: {} (mean {:.2})", outcome.action, outcome.value);
            for child in &outcome.stats.children {
                println!(
                    "  {:<24} visits={:<6} mean={:.2}",
                    child.action.stable_key(),
                    child.visits,
                    child.mean
                );
            }
            info!(
                iterations = outcome.stats.iterations,
                elapsed_ms = outcome.stats.elapsed_ms,
                "search done"
            );
            write_output(options.out.as_deref(), &outcome)?;
        }
        "play" => {
            let state = ctx.combat(need(positional, 1, "combat snapshot")?)?;
            let run = run_combat(&state, &search_config(&options, ctx.seed))?;
            println!("{}", run.to_text_report());
            write_output(options.out.as_deref(), &run)?;
            if let Some(path) = options.report.as_deref() {
                write_text(path, &run)?;
                println!("wrote {}", path.display());
            }
        }
        "diff" => {
            let before = need(positional, 1, "before snapshot")?;
            let after = need(positional, 2, "after snapshot")?;
            let delta = if options.game {
                let before = load_game_snapshot(Path::new(before), &ctx.library)?;
                let after = load_game_snapshot(Path::new(after), &ctx.library)?;
                diff(&before, &after)
            } else {
                diff_combat(&ctx.combat(before)?, &ctx.combat(after)?)
            };
            if delta.is_empty() {
                println!("no changes");
            } else {
                print!("{delta}");
            }
        }
        "check" => {
            if positional.len() < 4 {
                bail!("check needs a before snapshot, an action and an after snapshot\n\n{USAGE}");
            }
            let before = ctx.combat(&positional[1])?;
            let last = positional.len() - 1;
            let action = parse_action(&positional[2..last])?;
            let after = ctx.combat(&positional[last])?;
            let delta = check_prediction(&before, &action, &after)?;
            if delta.is_empty() {
                println!("prediction matches");
            } else {
                println!("prediction drifted in {} place(s):", delta.len());
                print!("{delta}");
            }
        }
        "export" => {
            let dir = need(positional, 1, "output directory")?;
            export_builtin(Path::new(dir))?;
            let count = fs::read_dir(dir).map(|items| items.count()).unwrap_or(0);
            println!("wrote {count} file(s) to {dir}");
        }
        other => bail!("unknown command {other:?}\n\n{USAGE}"),
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn actions_parse_from_words() {
        assert_eq!(parse_action(&words("end")).expect("end"), Action::EndTurn);
        assert_eq!(
            parse_action(&words("play a1 0")).expect("play"),
            Action::play("a1", Some(0))
        );
        assert_eq!(
            parse_action(&words("play a3")).expect("play"),
            Action::play("a3", None)
        );
        assert_eq!(
            parse_action(&words("potion 1 2")).expect("potion"),
            Action::UsePotion {
                slot: 1,
                target: Some(2)
            }
        );
        assert_eq!(
            parse_action(&words("choose 2")).expect("choose"),
            Action::choose(2)
        );
        assert_eq!(
            parse_action(&words("choose Perfected Strike")).expect("choose"),
            Action::Choose {
                choice: ChoiceRef::Name("Perfected Strike".to_string())
            }
        );
    }

    #[test]
    fn actions_parse_from_json() {
        let action = parse_action(&words(r#"{"type":"play_card","card":"x9","target":1}"#))
            .expect("json");
        assert_eq!(action, Action::play("x9", Some(1)));
    }

    #[test]
    fn bad_actions_are_rejected() {
        assert!(parse_action(&words("dance")).is_err());
        assert!(parse_action(&words("play a1 zero")).is_err());
        assert!(parse_action(&words("play a1 0 1")).is_err());
        assert!(parse_action(&words("choose")).is_err());
    }

    #[test]
    fn options_split_flags_from_positionals() {
        let options = parse_cli_options(&words("--seed 9 search state.json --iterations 50"))
            .expect("options");
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.iterations, Some(50));
        assert_eq!(options.positional, vec!["search", "state.json"]);
        let config = search_config(&options, 9);
        assert_eq!(config.budget, SearchBudget::Iterations(50));
    }

    #[test]
    fn budgets_are_mutually_exclusive() {
        assert!(parse_cli_options(&words("--iterations 5 --millis 5")).is_err());
        assert!(parse_cli_options(&words("--seed")).is_err());
    }
}
