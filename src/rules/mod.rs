//! Game rules: state, actions, events and the state machine that ties them.
//!
//! - `state`: `GameState` / `RoundState` plain data
//! - `action`: The closed set of player actions
//! - `event`: What each successful transition reports
//! - `game`: `ThirtyGame`, the state machine

pub mod state;
pub mod action;
pub mod event;
pub mod game;

pub use state::{GameState, GameSummary, RoundPhase, RoundState};
pub use action::Action;
pub use event::GameEvent;
pub use game::{Observer, ThirtyGame};
