//! Dice and the fixed six-die set.
//!
//! ## Die
//!
//! A face value in `1..=6` plus a hold flag. Held dice are skipped by rolls.
//!
//! ## DiceSet
//!
//! Exactly [`DICE_COUNT`] dice in a stable order, addressable by index
//! `0..=5`. Indexing with `usize` mirrors how the UI lays the dice out.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{InvalidInput, Result};
use super::rng::GameRng;

/// Number of dice in play.
pub const DICE_COUNT: usize = 6;

/// Lowest face value.
pub const DIE_MIN: u8 = 1;

/// Highest face value.
pub const DIE_MAX: u8 = 6;

/// A single die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    /// Face value, always in `1..=6`.
    pub value: u8,
    /// Excluded from the next roll when set.
    pub held: bool,
}

impl Die {
    /// Create an unheld die showing `value`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self { value, held: false }
    }
}

/// The six dice of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSet {
    dice: [Die; DICE_COUNT],
}

impl Default for DiceSet {
    /// Faces `1..=6` in order, none held. This is what a fresh round shows.
    fn default() -> Self {
        Self {
            dice: [
                Die::new(1),
                Die::new(2),
                Die::new(3),
                Die::new(4),
                Die::new(5),
                Die::new(6),
            ],
        }
    }
}

impl DiceSet {
    /// Build a set from six face values, none held.
    ///
    /// Rejects anything other than exactly six values in `1..=6`.
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let values = validate_values(values)?;
        Ok(Self {
            dice: values.map(Die::new),
        })
    }

    /// Build a set from already-validated dice.
    #[must_use]
    pub(crate) fn from_dice(dice: [Die; DICE_COUNT]) -> Self {
        Self { dice }
    }

    /// Current face values in index order.
    #[must_use]
    pub fn values(&self) -> [u8; DICE_COUNT] {
        self.dice.map(|d| d.value)
    }

    /// Current hold flags in index order.
    #[must_use]
    pub fn held(&self) -> [bool; DICE_COUNT] {
        self.dice.map(|d| d.held)
    }

    /// Number of held dice.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.dice.iter().filter(|d| d.held).count()
    }

    /// Iterate over the dice in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Get a die by index, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Flip the hold flag of one die. Returns the new flag.
    pub fn toggle_hold(&mut self, index: usize) -> Result<bool> {
        let die = self
            .dice
            .get_mut(index)
            .ok_or(InvalidInput::DieIndex(index))?;
        die.held = !die.held;
        Ok(die.held)
    }

    /// Clear every hold flag.
    pub fn release_all(&mut self) {
        for die in &mut self.dice {
            die.held = false;
        }
    }

    /// Re-roll every unheld die. Held dice keep their value.
    pub fn roll_unheld(&mut self, rng: &mut GameRng) {
        for die in self.dice.iter_mut().filter(|d| !d.held) {
            die.value = rng.roll_die();
        }
    }
}

impl Index<usize> for DiceSet {
    type Output = Die;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dice[index]
    }
}

impl IndexMut<usize> for DiceSet {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.dice[index]
    }
}

/// Check that `values` is exactly six faces in `1..=6`.
pub fn validate_values(values: &[u8]) -> Result<[u8; DICE_COUNT]> {
    let array: [u8; DICE_COUNT] = values
        .try_into()
        .map_err(|_| InvalidInput::DiceCount(values.len()))?;

    if let Some((index, &value)) = array
        .iter()
        .enumerate()
        .find(|(_, v)| !(DIE_MIN..=DIE_MAX).contains(*v))
    {
        return Err(InvalidInput::DieValue { index, value }.into());
    }

    Ok(array)
}
