//! Game configuration.
//!
//! The rules themselves (ten rounds, three rolls, six dice) are fixed. What a
//! host can choose is the RNG seed and how the scoring search behaves.

use serde::{Deserialize, Serialize};

/// Rounds in a game; one per scoring option.
pub const ROUNDS_PER_GAME: u32 = 10;

/// Roll attempts per round.
pub const ROLLS_PER_ROUND: u8 = 3;

/// How combinations of five or six dice are evaluated.
///
/// The historical scorer read the fourth die's slot again when it added the
/// fifth and sixth dice. `Reference` reproduces that bit-for-bit for parity
/// with recorded games; `Corrected` reads each die's own slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Each die in a combination is read from its own index.
    #[default]
    Corrected,
    /// Dice 5 and 6 of a combination reuse the 4th die's index.
    Reference,
}

/// Scoring search parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Defect-parity switch for deep combinations.
    pub mode: ScoringMode,

    /// Largest combination the search will build (1..=6, default 6).
    pub max_combination_size: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::Corrected,
            max_combination_size: crate::core::DICE_COUNT,
        }
    }
}

impl ScoringConfig {
    /// Set the scoring mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the maximum combination size, clamped to `1..=6`.
    #[must_use]
    pub fn with_max_combination_size(mut self, size: usize) -> Self {
        self.max_combination_size = size.clamp(1, crate::core::DICE_COUNT);
        self
    }
}

/// Top-level configuration for a [`ThirtyGame`](crate::rules::ThirtyGame).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirtyConfig {
    /// Seed for the dice RNG. Same seed and same actions give the same game.
    /// The default draws a fresh seed from the OS.
    pub seed: u64,

    /// Scoring search parameters.
    pub scoring: ScoringConfig,
}

impl Default for ThirtyConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl ThirtyConfig {
    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the scoring mode.
    #[must_use]
    pub fn with_scoring_mode(mut self, mode: ScoringMode) -> Self {
        self.scoring.mode = mode;
        self
    }

    /// Replace the scoring parameters.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }
}
