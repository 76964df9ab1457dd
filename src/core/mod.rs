//! Core types: dice, RNG, configuration, errors.
//!
//! Everything here is independent of the scoring rules and the round state
//! machine; both build on these.

pub mod dice;
pub mod rng;
pub mod config;
pub mod error;

pub use dice::{Die, DiceSet, DICE_COUNT, DIE_MAX, DIE_MIN};
pub use rng::{GameRng, GameRngState};
pub use config::{ScoringConfig, ScoringMode, ThirtyConfig, ROLLS_PER_ROUND, ROUNDS_PER_GAME};
pub use error::{IllegalTransition, InvalidInput, Result, ThirtyError};
