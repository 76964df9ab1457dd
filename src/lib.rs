//! # thirty
//!
//! Rules engine for the dice game Thirty.
//!
//! Six dice, up to three rolls per round, holds between rolls. At the end of
//! each round the player scores the dice against one of ten options
//! (`Low`, `4` .. `12`), each usable once. Ten rounds make a game.
//!
//! ## Design Principles
//!
//! 1. **Plain values in, plain values out**: No rendering, no storage. The
//!    host passes dice, indices and options; it gets scores, events and state
//!    copies back.
//!
//! 2. **All-or-nothing transitions**: Every action validates first and
//!    mutates second. A rejected action never leaves partial updates.
//!
//! 3. **Reproducible**: Seeded ChaCha RNG; the same seed and the same actions
//!    replay the same game.
//!
//! ## Modules
//!
//! - `core`: Dice, RNG, configuration, errors
//! - `scoring`: Option catalog and the combination search
//! - `rules`: Game/round state, actions, events, the `ThirtyGame` state machine
//! - `persistence`: Flat key/value snapshots
//!
//! ## Example
//!
//! ```
//! use thirty::{ScoringOption, ThirtyConfig, ThirtyGame};
//!
//! let mut game = ThirtyGame::new(ThirtyConfig::default().with_seed(7));
//! for _ in 0..3 {
//!     game.roll().unwrap();
//! }
//! game.select_option(ScoringOption::Low).unwrap();
//! game.commit_round().unwrap();
//!
//! assert_eq!(game.state().round_count, 2);
//! ```

pub mod core;
pub mod scoring;
pub mod rules;
pub mod persistence;

// Re-export commonly used types
pub use crate::core::{
    Die, DiceSet, GameRng, GameRngState,
    ScoringConfig, ScoringMode, ThirtyConfig,
    ThirtyError, InvalidInput, IllegalTransition, Result,
};

pub use crate::scoring::{score, ScoreBreakdown, ScoringEngine, ScoringOption};

pub use crate::rules::{
    Action, GameEvent, GameState, GameSummary, RoundPhase, RoundState, ThirtyGame,
};

pub use crate::persistence::{from_snapshot, to_snapshot, Snapshot, SnapshotValue};
