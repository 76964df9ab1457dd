//! Combination search for the scoring options.
//!
//! ## Low
//!
//! Every die showing 3 or less counts once.
//!
//! ## Sum targets (4..=12)
//!
//! Dice are sorted descending and then grouped greedily into disjoint
//! combinations that sum to the target:
//!
//! 1. Walk the sorted indices in order, skipping consumed ones.
//! 2. A die equal to the target matches on its own.
//! 3. Otherwise grow a combination from that die by depth-first search over
//!    strictly increasing indices. The sum is tested each time a die is added,
//!    before going deeper. The first combination that hits the target is
//!    consumed and the walk moves on; no better partition is looked for.
//!
//! The search order is observable in the score (a greedy pair can block a
//! triple that would have used more dice), so it is kept exactly as is.
//!
//! ## Scoring modes
//!
//! Under [`ScoringMode::Reference`] the fifth and sixth dice of a combination
//! are read (and checked for consumption) through the fourth die's index.
//! That reproduces recorded scores from the historical scorer. The loop
//! bounds and the dice marked consumed on a match still follow each die's own
//! index.

use log::trace;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::option::ScoringOption;
use crate::core::dice::validate_values;
use crate::core::{Result, ScoringConfig, ScoringMode, DICE_COUNT};

/// Position (0-based) in a combination whose index later positions reuse in
/// reference mode.
const REFERENCE_ANCHOR: usize = 3;

/// Result of scoring one hand, with the combinations that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// The option scored.
    pub option: ScoringOption,

    /// Total score.
    pub total: u32,

    /// Face values of each matched combination, in match order.
    /// For `Low` this is a single group holding every qualifying die.
    pub combinations: Vec<SmallVec<[u8; DICE_COUNT]>>,
}

/// Scores a hand against a scoring option.
///
/// Stateless apart from its configuration; a single engine can be shared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

/// A combination under construction.
///
/// `indices` are the loop positions in sorted order; `values` are the faces
/// actually summed, which differ from `sorted[indices]` only in reference
/// mode.
#[derive(Default)]
struct Combination {
    indices: SmallVec<[usize; DICE_COUNT]>,
    values: SmallVec<[u8; DICE_COUNT]>,
    sum: u32,
}

impl Combination {
    fn start(index: usize, value: u8) -> Self {
        let mut combination = Self::default();
        combination.push(index, value);
        combination
    }

    fn push(&mut self, index: usize, value: u8) {
        self.indices.push(index);
        self.values.push(value);
        self.sum += u32::from(value);
    }

    fn pop(&mut self) {
        self.indices.pop();
        if let Some(value) = self.values.pop() {
            self.sum -= u32::from(value);
        }
    }

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn last_index(&self) -> usize {
        self.indices.last().copied().unwrap_or(0)
    }
}

impl ScoringEngine {
    /// Create an engine with the given search parameters.
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `dice` (six values in `1..=6`, any order) for `option`.
    pub fn score(&self, option: ScoringOption, dice: &[u8]) -> Result<u32> {
        self.score_breakdown(option, dice).map(|b| b.total)
    }

    /// Score using the option's label (`"Low"`, `"4"` .. `"12"`).
    pub fn score_label(&self, label: &str, dice: &[u8]) -> Result<u32> {
        let option: ScoringOption = label.parse()?;
        self.score(option, dice)
    }

    /// Score and report which dice formed each matched combination.
    pub fn score_breakdown(&self, option: ScoringOption, dice: &[u8]) -> Result<ScoreBreakdown> {
        let values = validate_values(dice)?;

        let combinations = match option.target() {
            None => score_low(&values),
            Some(target) => {
                let mut sorted = values;
                sorted.sort_unstable_by(|a, b| b.cmp(a));
                self.match_target(&sorted, target)
            }
        };

        let total = combinations
            .iter()
            .flat_map(|c| c.iter())
            .map(|&v| u32::from(v))
            .sum();

        trace!("scored {} on {:?}: {} via {:?}", option, values, total, combinations);

        Ok(ScoreBreakdown {
            option,
            total,
            combinations,
        })
    }

    /// Greedy walk over the descending-sorted hand.
    fn match_target(
        &self,
        sorted: &[u8; DICE_COUNT],
        target: u32,
    ) -> Vec<SmallVec<[u8; DICE_COUNT]>> {
        let mut consumed = [false; DICE_COUNT];
        let mut matched = Vec::new();

        for i in 0..DICE_COUNT {
            if consumed[i] {
                continue;
            }

            if u32::from(sorted[i]) == target {
                consumed[i] = true;
                matched.push(SmallVec::from_slice(&[sorted[i]]));
                continue;
            }

            let mut combination = Combination::start(i, sorted[i]);
            if self.extend(sorted, &consumed, &mut combination, target) {
                for &index in &combination.indices {
                    consumed[index] = true;
                }
                trace!("target {}: matched indices {:?}", target, combination.indices);
                matched.push(combination.values);
            }
        }

        matched
    }

    /// Depth-first extension of `combination` with higher indices.
    ///
    /// Returns true with `combination` holding the match, or false with it
    /// restored to its input.
    fn extend(
        &self,
        sorted: &[u8; DICE_COUNT],
        consumed: &[bool; DICE_COUNT],
        combination: &mut Combination,
        target: u32,
    ) -> bool {
        if combination.len() >= self.config.max_combination_size {
            return false;
        }

        for next in combination.last_index() + 1..DICE_COUNT {
            let read = self.read_index(combination, next);
            if consumed[read] {
                continue;
            }

            combination.push(next, sorted[read]);
            if combination.sum == target || self.extend(sorted, consumed, combination, target) {
                return true;
            }
            combination.pop();
        }

        false
    }

    /// Index whose face the die at `next` contributes.
    fn read_index(&self, combination: &Combination, next: usize) -> usize {
        match self.config.mode {
            ScoringMode::Reference if combination.len() > REFERENCE_ANCHOR => {
                combination.indices[REFERENCE_ANCHOR]
            }
            _ => next,
        }
    }
}

fn score_low(values: &[u8; DICE_COUNT]) -> Vec<SmallVec<[u8; DICE_COUNT]>> {
    let low: SmallVec<[u8; DICE_COUNT]> = values
        .iter()
        .copied()
        .filter(|&v| v <= ScoringOption::LOW_THRESHOLD)
        .collect();

    if low.is_empty() {
        Vec::new()
    } else {
        vec![low]
    }
}

/// Score with the default engine.
pub fn score(option: ScoringOption, dice: &[u8]) -> Result<u32> {
    ScoringEngine::default().score(option, dice)
}
