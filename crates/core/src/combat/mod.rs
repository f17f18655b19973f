//! Turn structure and effect resolution over a [`CombatState`].

use crate::{Action, Actor, Card, CombatPhase, CombatState, SimError};
use serde::{Deserialize, Serialize};
use tracing::debug;

mod choice;
mod damage;
mod monster_turn;
mod play;
mod potion;
mod resolve;
mod turn;
mod zones;

pub use damage::{calculate_real_damage, DamageKind};
pub use potion::potion_effects;

/// What is resolving: who acts, against whom, and on behalf of which card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectContext {
    pub actor: Actor,
    #[serde(default)]
    pub target: Option<usize>,
    /// The card being played, when effects come from a card.
    #[serde(default)]
    pub card: Option<Card>,
    /// Energy paid for an X-cost card.
    #[serde(default)]
    pub energy_spent: i32,
    /// Zero-cost replays still owed after this resolution.
    #[serde(default)]
    pub replays: u32,
    #[serde(default)]
    pub is_replay: bool,
    /// Pen Nib doubles this play's attack damage.
    #[serde(default)]
    pub double_damage: bool,
}

impl EffectContext {
    pub fn player(target: Option<usize>) -> Self {
        Self {
            actor: Actor::Player,
            target,
            card: None,
            energy_spent: 0,
            replays: 0,
            is_replay: false,
            double_damage: false,
        }
    }

    pub fn monster(idx: usize) -> Self {
        Self {
            actor: Actor::Monster(idx),
            ..Self::player(None)
        }
    }

    pub(crate) fn card_play(card: Card, target: Option<usize>, energy_spent: i32) -> Self {
        Self {
            card: Some(card),
            energy_spent,
            ..Self::player(target)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Suspended,
}

impl CombatState {
    /// Apply `action` in place. On error the state must be discarded.
    pub fn step(&mut self, action: &Action) -> Result<(), SimError> {
        if self.is_terminal() {
            return Err(SimError::CombatOver);
        }
        self.invalidate_actions();
        match action {
            Action::Choose { choice } => self.choose(choice)?,
            _ if self.pending_choice.is_some() || self.phase != CombatPhase::PlayerTurnActive => {
                return Err(SimError::InvalidAction {
                    action: action.to_string(),
                    phase: self.phase,
                });
            }
            Action::EndTurn => self.end_turn(),
            Action::PlayCard { card, target } => self.play_card(card, *target)?,
            Action::UsePotion { slot, target } => self.use_potion(*slot, *target)?,
        }
        self.update_outcome();
        Ok(())
    }

    pub(crate) fn update_outcome(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        if self.player.current_hp <= 0 {
            debug!(turn = self.turn, "defeat");
            self.phase = CombatPhase::Defeat;
            self.pending_choice = None;
        } else if !self.any_monster_available() {
            debug!(turn = self.turn, "victory");
            self.phase = CombatPhase::Victory;
            self.pending_choice = None;
        }
    }

    /// Player dead or every monster down, ignoring the recorded phase.
    pub(crate) fn fight_over(&self) -> bool {
        self.player.current_hp <= 0 || !self.any_monster_available()
    }
}
