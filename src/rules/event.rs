//! Events emitted by state transitions.
//!
//! Every successful transition on [`ThirtyGame`](super::ThirtyGame) returns
//! one event and hands it to the registered observer, if any. The display
//! layer redraws from these; the rules code does not know who listens.

use serde::{Deserialize, Serialize};

use crate::core::DICE_COUNT;
use crate::scoring::ScoringOption;

/// Something that happened to the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Unheld dice were re-rolled.
    Rolled {
        values: [u8; DICE_COUNT],
        rolls_left: u8,
    },

    /// A die's hold flag flipped.
    HoldToggled { index: usize, held: bool },

    /// An option was chosen for the current round.
    OptionSelected(ScoringOption),

    /// A round was scored. `game_over` is set on the tenth commit.
    RoundCommitted {
        round: u32,
        option: ScoringOption,
        score: u32,
        total_score: u32,
        game_over: bool,
    },

    /// The option menu was opened or closed.
    ScoringMenuToggled { open: bool },

    /// All state was reset to a new game.
    Restarted,
}

impl GameEvent {
    /// True for the commit that ends the game.
    #[must_use]
    pub fn ends_game(&self) -> bool {
        matches!(self, GameEvent::RoundCommitted { game_over: true, .. })
    }
}
