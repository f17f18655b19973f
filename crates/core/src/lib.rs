//! Core combat simulation. Keep this crate free of IO and platform concerns.

pub mod actions;
pub mod cards;
pub mod catalog;
pub mod character;
pub mod combat;
pub mod diff;
pub mod effects;
pub mod error;
pub mod library;
pub mod monsters;
pub mod potions;
pub mod powers;
pub mod relics;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use actions::{apply_action, enumerate_actions, Action, ChoiceRef};
pub use cards::*;
pub use character::*;
pub use combat::{calculate_real_damage, potion_effects, DamageKind, EffectContext};
pub use diff::*;
pub use effects::*;
pub use error::*;
pub use library::*;
pub use monsters::*;
pub use potions::*;
pub use powers::*;
pub use relics::Relic;
pub use rng::*;
pub use snapshot::*;
pub use state::*;
