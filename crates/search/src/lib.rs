//! Seeded Monte Carlo tree search over the combat simulator.

mod config;
mod error;
mod mcts;
mod reward;
mod trace;

pub use config::*;
pub use error::*;
pub use mcts::*;
pub use reward::*;
pub use trace::*;
