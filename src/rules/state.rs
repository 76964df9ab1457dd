//! Round and game state.
//!
//! ## RoundState
//!
//! What changes inside one round: dice, rolls left, the pending option.
//! Replaced wholesale when a round is committed.
//!
//! ## GameState
//!
//! Everything that survives across rounds: round counter, totals, scores per
//! option, used options. Uses `im` persistent collections so handing a copy to
//! the display layer is O(1).

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use crate::core::{DiceSet, ROLLS_PER_ROUND, ROUNDS_PER_GAME};
use crate::scoring::ScoringOption;

/// Per-round state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Rolls remaining, `0..=3`. Only decreases within a round.
    pub rolls_left: u8,

    /// The six dice.
    pub dice: DiceSet,

    /// Option chosen for this round, not yet committed.
    pub selected: Option<ScoringOption>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl RoundState {
    /// A round before its first roll: dice `1..=6`, nothing held.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            rolls_left: ROLLS_PER_ROUND,
            dice: DiceSet::default(),
            selected: None,
        }
    }

    /// True once at least one roll has been made this round.
    #[must_use]
    pub fn has_rolled(&self) -> bool {
        self.rolls_left < ROLLS_PER_ROUND
    }
}

/// Where the current round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No roll made yet this round.
    Idle,
    /// At least one roll made, some left.
    Rolling { rolls_left: u8 },
    /// Out of rolls; waiting for a commit.
    AwaitingScore,
    /// All ten rounds played.
    GameOver,
}

/// Whole-game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current round, `1..=10` while playing; 11 once the game is over.
    pub round_count: u32,

    /// Sum of all committed round scores.
    pub total_score: u32,

    /// Score recorded for each committed option.
    pub round_scores: OrdMap<ScoringOption, u32>,

    /// Options already committed. Never shrinks within a game.
    pub used_options: OrdSet<ScoringOption>,

    /// Score of the most recent commit (0 before the first).
    pub last_round_score: u32,

    /// UI pass-through: whether the option menu is showing.
    pub scoring_menu_open: bool,

    /// The round in progress.
    pub round: RoundState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// State at the start of a new game.
    #[must_use]
    pub fn new() -> Self {
        Self {
            round_count: 1,
            total_score: 0,
            round_scores: OrdMap::new(),
            used_options: OrdSet::new(),
            last_round_score: 0,
            scoring_menu_open: false,
            round: RoundState::fresh(),
        }
    }

    /// True once every round has been committed.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.round_count > ROUNDS_PER_GAME
    }

    /// Phase of the current round.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        if self.is_over() {
            RoundPhase::GameOver
        } else if !self.round.has_rolled() {
            RoundPhase::Idle
        } else if self.round.rolls_left > 0 {
            RoundPhase::Rolling {
                rolls_left: self.round.rolls_left,
            }
        } else {
            RoundPhase::AwaitingScore
        }
    }

    /// True if `option` has not been committed yet.
    #[must_use]
    pub fn is_available(&self, option: ScoringOption) -> bool {
        !self.used_options.contains(&option)
    }

    /// Unused options in catalog order.
    #[must_use]
    pub fn remaining_options(&self) -> Vec<ScoringOption> {
        ScoringOption::ALL
            .into_iter()
            .filter(|o| self.is_available(*o))
            .collect()
    }

    /// Text for the roll control: "Play" before the first roll of a round,
    /// then "Roll (n)".
    #[must_use]
    pub fn roll_label(&self) -> String {
        if self.round.has_rolled() {
            format!("Roll ({})", self.round.rolls_left)
        } else {
            "Play".to_string()
        }
    }

    /// Final results, once the game is over.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        if !self.is_over() {
            return None;
        }

        Some(GameSummary {
            round_scores: self.round_scores.iter().map(|(o, s)| (*o, *s)).collect(),
            total_score: self.total_score,
        })
    }

    /// Replace the round with a fresh one.
    pub(crate) fn start_round(&mut self) {
        self.round = RoundState::fresh();
        self.scoring_menu_open = false;
    }
}

/// End-of-game results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Score per option, in catalog order.
    pub round_scores: Vec<(ScoringOption, u32)>,

    /// Total across all rounds.
    pub total_score: u32,
}
