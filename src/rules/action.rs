//! Player actions.
//!
//! Each UI control maps to one [`Action`]. Automated players enumerate
//! [`ThirtyGame::legal_actions`](super::ThirtyGame::legal_actions) and feed
//! one back through [`ThirtyGame::apply`](super::ThirtyGame::apply).

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringOption;

/// A game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Re-roll every unheld die.
    Roll,
    /// Flip the hold flag of the die at this index.
    ToggleHold(usize),
    /// Choose the option to score this round.
    Select(ScoringOption),
    /// Score the round with the selected option.
    Commit,
    /// Throw the game away and start over.
    Restart,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Roll => write!(f, "Roll"),
            Action::ToggleHold(index) => write!(f, "ToggleHold({})", index),
            Action::Select(option) => write!(f, "Select({})", option),
            Action::Commit => write!(f, "Commit"),
            Action::Restart => write!(f, "Restart"),
        }
    }
}
