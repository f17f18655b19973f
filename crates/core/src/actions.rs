use crate::{CardUuid, CombatPhase, CombatState, SimError};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::fmt;
use std::sync::Arc;

/// Reference to one candidate of a pending choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceRef {
    Index(usize),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    EndTurn,
    PlayCard {
        card: CardUuid,
        #[serde(default)]
        target: Option<usize>,
    },
    UsePotion {
        slot: usize,
        #[serde(default)]
        target: Option<usize>,
    },
    Choose {
        choice: ChoiceRef,
    },
}

impl Action {
    pub fn play(card: impl Into<CardUuid>, target: Option<usize>) -> Self {
        Self::PlayCard {
            card: card.into(),
            target,
        }
    }

    pub fn choose(index: usize) -> Self {
        Self::Choose {
            choice: ChoiceRef::Index(index),
        }
    }

    pub fn is_end_turn(&self) -> bool {
        matches!(self, Self::EndTurn)
    }

    /// Deterministic ordering key, independent of hashing.
    pub fn stable_key(&self) -> String {
        match self {
            Self::EndTurn => "end_turn".to_string(),
            Self::PlayCard { card, target } => format!("play:{card}:{}", target_key(*target)),
            Self::UsePotion { slot, target } => format!("potion:{slot}:{}", target_key(*target)),
            Self::Choose {
                choice: ChoiceRef::Index(index),
            } => format!("choose:{index:04}"),
            Self::Choose {
                choice: ChoiceRef::Name(name),
            } => format!("choose:{name}"),
        }
    }
}

fn target_key(target: Option<usize>) -> String {
    target.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndTurn => f.write_str("end turn"),
            Self::PlayCard { card, target: None } => write!(f, "play {card}"),
            Self::PlayCard {
                card,
                target: Some(target),
            } => write!(f, "play {card} -> monster {target}"),
            Self::UsePotion { slot, target: None } => write!(f, "potion {slot}"),
            Self::UsePotion {
                slot,
                target: Some(target),
            } => write!(f, "potion {slot} -> monster {target}"),
            Self::Choose {
                choice: ChoiceRef::Index(index),
            } => write!(f, "choose #{index}"),
            Self::Choose {
                choice: ChoiceRef::Name(name),
            } => write!(f, "choose {name}"),
        }
    }
}

/// Per-state memo of the legal action list. Cloning yields an empty cache.
#[derive(Default)]
pub(crate) struct ActionCache(OnceCell<Arc<[Action]>>);

impl ActionCache {
    pub(crate) fn get_or_init(&self, init: impl FnOnce() -> Vec<Action>) -> Arc<[Action]> {
        Arc::clone(self.0.get_or_init(|| Arc::from(init())))
    }

    pub(crate) fn invalidate(&mut self) {
        self.0.take();
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.0.get().is_some()
    }
}

impl Clone for ActionCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl fmt::Debug for ActionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(actions) => write!(f, "ActionCache({} actions)", actions.len()),
            None => f.write_str("ActionCache(empty)"),
        }
    }
}

impl CombatState {
    /// Legal actions for this state, computed once and memoized.
    pub fn legal_actions(&self) -> Arc<[Action]> {
        self.actions.get_or_init(|| self.compute_actions())
    }

    pub fn actions_cached(&self) -> bool {
        self.actions.is_cached()
    }

    fn compute_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        if let Some(pending) = &self.pending_choice {
            return (0..pending.candidates.len()).map(Action::choose).collect();
        }
        if self.phase != CombatPhase::PlayerTurnActive {
            return Vec::new();
        }
        let available: Vec<usize> = self.available_monsters().collect();
        let mut actions = vec![Action::EndTurn];
        for (slot, potion) in self.potions.iter().enumerate() {
            if potion.is_empty() || !potion.can_use {
                continue;
            }
            if potion.requires_target {
                actions.extend(available.iter().map(|&target| Action::UsePotion {
                    slot,
                    target: Some(target),
                }));
            } else {
                actions.push(Action::UsePotion { slot, target: None });
            }
        }
        for card in &self.hand {
            if self.check_playable(card).is_err() {
                continue;
            }
            if card.has_target {
                actions.extend(available.iter().map(|&target| Action::PlayCard {
                    card: card.uuid.clone(),
                    target: Some(target),
                }));
            } else {
                actions.push(Action::PlayCard {
                    card: card.uuid.clone(),
                    target: None,
                });
            }
        }
        actions
    }
}

/// Every legal action of `state`, memoized on the state.
pub fn enumerate_actions(state: &CombatState) -> Arc<[Action]> {
    state.legal_actions()
}

/// Fork `state` and apply `action` to the fork.
pub fn apply_action(state: &CombatState, action: &Action) -> Result<CombatState, SimError> {
    let mut next = state.fork();
    next.step(action)?;
    Ok(next)
}
