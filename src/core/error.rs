//! Error types.
//!
//! Two kinds of rejection exist:
//!
//! - [`InvalidInput`]: the caller passed a malformed value (dice array, option
//!   label, die index).
//! - [`IllegalTransition`]: the value is fine but the game is not in a state
//!   where the action is allowed.
//!
//! Both are rejected before any state is touched.

use thiserror::Error;

use crate::scoring::ScoringOption;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ThirtyError>;

/// Top-level error returned by every fallible operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ThirtyError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("illegal transition: {0}")]
    IllegalTransition(#[from] IllegalTransition),

    #[error("snapshot could not be decoded: {0}")]
    Snapshot(String),
}

impl ThirtyError {
    /// True for malformed-argument errors.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ThirtyError::InvalidInput(_))
    }

    /// True for wrong-state errors.
    #[must_use]
    pub fn is_illegal_transition(&self) -> bool {
        matches!(self, ThirtyError::IllegalTransition(_))
    }
}

/// Malformed arguments.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("unknown scoring option {0:?}")]
    UnknownOption(String),

    #[error("invalid dice input: expected 6 dice, got {0}")]
    DiceCount(usize),

    #[error("invalid dice input: die {index} has value {value}, expected 1..=6")]
    DieValue { index: usize, value: u8 },

    #[error("die index {0} is out of range 0..=5")]
    DieIndex(usize),
}

/// Preconditions of the round/game state machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalTransition {
    #[error("no rolls left this round")]
    NoRollsLeft,

    #[error("dice can only be held after the first roll")]
    HoldBeforeFirstRoll,

    #[error("scoring option {0} has already been used")]
    OptionAlreadyUsed(ScoringOption),

    #[error("cannot commit with {0} roll(s) remaining")]
    RollsRemaining(u8),

    #[error("no scoring option selected")]
    NoOptionSelected,

    #[error("adding {0} would overflow the total score")]
    ScoreOverflow(u32),

    #[error("the game is over; restart to play again")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: ThirtyError = InvalidInput::DiceCount(5).into();
        assert!(err.is_invalid_input());
        assert!(!err.is_illegal_transition());

        let err: ThirtyError = IllegalTransition::NoRollsLeft.into();
        assert!(err.is_illegal_transition());
    }

    #[test]
    fn test_messages() {
        let err = ThirtyError::from(InvalidInput::UnknownOption("13".to_string()));
        assert_eq!(err.to_string(), "invalid input: unknown scoring option \"13\"");

        let err = ThirtyError::from(IllegalTransition::OptionAlreadyUsed(ScoringOption::Low));
        assert_eq!(
            err.to_string(),
            "illegal transition: scoring option Low has already been used"
        );

        let err = ThirtyError::from(IllegalTransition::RollsRemaining(2));
        assert_eq!(err.to_string(), "illegal transition: cannot commit with 2 roll(s) remaining");
    }
}
