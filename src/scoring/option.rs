//! The ten scoring options.
//!
//! The catalog is closed: `Low` plus the sum targets 4 through 12. Each is
//! used at most once per game, so a full game is exactly ten rounds.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{InvalidInput, ThirtyError};

/// One entry of the scoring catalog.
///
/// Ordering follows the catalog: `Low < Four < ... < Twelve`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScoringOption {
    /// Sum of every die showing 3 or less.
    Low,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
}

impl ScoringOption {
    /// The full catalog in display order.
    pub const ALL: [ScoringOption; 10] = [
        ScoringOption::Low,
        ScoringOption::Four,
        ScoringOption::Five,
        ScoringOption::Six,
        ScoringOption::Seven,
        ScoringOption::Eight,
        ScoringOption::Nine,
        ScoringOption::Ten,
        ScoringOption::Eleven,
        ScoringOption::Twelve,
    ];

    /// Highest face value that counts towards `Low`.
    pub const LOW_THRESHOLD: u8 = 3;

    /// The label used in menus and in persisted state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ScoringOption::Low => "Low",
            ScoringOption::Four => "4",
            ScoringOption::Five => "5",
            ScoringOption::Six => "6",
            ScoringOption::Seven => "7",
            ScoringOption::Eight => "8",
            ScoringOption::Nine => "9",
            ScoringOption::Ten => "10",
            ScoringOption::Eleven => "11",
            ScoringOption::Twelve => "12",
        }
    }

    /// Sum target for numeric options, `None` for `Low`.
    #[must_use]
    pub const fn target(self) -> Option<u32> {
        match self {
            ScoringOption::Low => None,
            ScoringOption::Four => Some(4),
            ScoringOption::Five => Some(5),
            ScoringOption::Six => Some(6),
            ScoringOption::Seven => Some(7),
            ScoringOption::Eight => Some(8),
            ScoringOption::Nine => Some(9),
            ScoringOption::Ten => Some(10),
            ScoringOption::Eleven => Some(11),
            ScoringOption::Twelve => Some(12),
        }
    }

    /// Position in [`ScoringOption::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up an option by its label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.label() == label)
    }
}

impl std::fmt::Display for ScoringOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScoringOption {
    type Err = ThirtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| InvalidInput::UnknownOption(s.to_string()).into())
    }
}

impl TryFrom<String> for ScoringOption {
    type Error = ThirtyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScoringOption> for String {
    fn from(option: ScoringOption) -> Self {
        option.label().to_string()
    }
}
