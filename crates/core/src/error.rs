use crate::{CardUuid, CombatPhase};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("{action} is not valid in phase {phase:?}")]
    InvalidAction { action: String, phase: CombatPhase },
    #[error("card {0} is not in hand")]
    CardNotInHand(CardUuid),
    #[error("not enough energy: cost {cost}, have {energy}")]
    NotEnoughEnergy { cost: i32, energy: i32 },
    #[error("card {0} cannot be played")]
    Unplayable(String),
    #[error("missing or unavailable target {0:?}")]
    MissingTarget(Option<usize>),
    #[error("invalid potion slot {0}")]
    InvalidPotionSlot(usize),
    #[error("no choice is pending")]
    NoPendingChoice,
    #[error("invalid choice {0}")]
    InvalidChoice(String),
    #[error("combat is already over")]
    CombatOver,
    #[error("snapshot is missing the {0}")]
    MissingActor(&'static str),
}
