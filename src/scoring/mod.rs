//! Scoring: the option catalog and the combination search.
//!
//! - `option`: The closed set of ten scoring options
//! - `engine`: Pure `(option, dice) -> score` evaluation

pub mod option;
pub mod engine;

pub use option::ScoringOption;
pub use engine::{score, ScoreBreakdown, ScoringEngine};
