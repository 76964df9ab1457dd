//! Flat key/value snapshot of a game.
//!
//! The persistence layer stores games as a flat map of named values. This
//! module is the only place that knows the key names:
//!
//! | key | value |
//! | --- | --- |
//! | `roundCount` | int |
//! | `totalScore` | int |
//! | `rollsLeft` | int, `0..=3` |
//! | `isScoringMenuOpen` | bool |
//! | `selectedScoringOption` | option label or `"none selected"` |
//! | `usedScoringOptions` | set of option labels |
//! | `roundScore_<label>` | int, one per committed option |
//! | `dice<N>Value` (N = 1..=6) | int, `1..=6` |
//! | `dice<N>Held` (N = 1..=6) | bool |
//! | `lastRoundScore` | int |
//!
//! Decoding never fails. A missing or malformed field takes its new-game
//! value and is logged at `warn`.

use im::{OrdMap, OrdSet};
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::{Die, DiceSet, Result, ThirtyError, DICE_COUNT, DIE_MAX, DIE_MIN, ROLLS_PER_ROUND, ROUNDS_PER_GAME};
use crate::rules::{GameState, RoundState};
use crate::scoring::ScoringOption;

/// Key names.
pub mod keys {
    pub const ROUND_COUNT: &str = "roundCount";
    pub const TOTAL_SCORE: &str = "totalScore";
    pub const ROLLS_LEFT: &str = "rollsLeft";
    pub const SCORING_MENU_OPEN: &str = "isScoringMenuOpen";
    pub const SELECTED_OPTION: &str = "selectedScoringOption";
    pub const USED_OPTIONS: &str = "usedScoringOptions";
    pub const LAST_ROUND_SCORE: &str = "lastRoundScore";
    pub const ROUND_SCORE_PREFIX: &str = "roundScore_";

    /// Sentinel stored in `selectedScoringOption` when nothing is selected.
    pub const NONE_SELECTED: &str = "none selected";

    /// `roundScore_<label>`.
    #[must_use]
    pub fn round_score(label: &str) -> String {
        format!("{}{}", ROUND_SCORE_PREFIX, label)
    }

    /// `dice<N>Value` for a 0-based die index.
    #[must_use]
    pub fn die_value(index: usize) -> String {
        format!("dice{}Value", index + 1)
    }

    /// `dice<N>Held` for a 0-based die index.
    #[must_use]
    pub fn die_held(index: usize) -> String {
        format!("dice{}Held", index + 1)
    }
}

/// One stored value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotValue {
    Int(i64),
    Bool(bool),
    Text(String),
    TextSet(BTreeSet<String>),
}

/// A flat key/value map describing one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    entries: FxHashMap<String, SnapshotValue>,
}

impl Snapshot {
    /// Empty snapshot. Decodes to a new game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: SnapshotValue) {
        self.entries.insert(key.into(), value);
    }

    /// Remove a value.
    pub fn remove(&mut self, key: &str) -> Option<SnapshotValue> {
        self.entries.remove(key)
    }

    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.entries.get(key)
    }

    /// Integer value, if present and an integer.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            SnapshotValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean value, if present and a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.entries.get(key)? {
            SnapshotValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Text value, if present and text.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            SnapshotValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Text-set value, if present and a set.
    #[must_use]
    pub fn get_text_set(&self, key: &str) -> Option<&BTreeSet<String>> {
        match self.entries.get(key)? {
            SnapshotValue::TextSet(v) => Some(v),
            _ => None,
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries sorted by key.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&str, &SnapshotValue)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Compact binary encoding for storing the snapshot as one blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ThirtyError::Snapshot(e.to_string()))
    }

    /// Decode a blob written by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| ThirtyError::Snapshot(e.to_string()))
    }
}

/// Encode a game state.
#[must_use]
pub fn to_snapshot(state: &GameState) -> Snapshot {
    let mut snapshot = Snapshot::new();

    snapshot.insert(keys::ROUND_COUNT, SnapshotValue::Int(i64::from(state.round_count)));
    snapshot.insert(keys::TOTAL_SCORE, SnapshotValue::Int(i64::from(state.total_score)));
    snapshot.insert(keys::ROLLS_LEFT, SnapshotValue::Int(i64::from(state.round.rolls_left)));
    snapshot.insert(keys::SCORING_MENU_OPEN, SnapshotValue::Bool(state.scoring_menu_open));
    snapshot.insert(keys::LAST_ROUND_SCORE, SnapshotValue::Int(i64::from(state.last_round_score)));

    let selected = state
        .round
        .selected
        .map_or(keys::NONE_SELECTED, ScoringOption::label);
    snapshot.insert(keys::SELECTED_OPTION, SnapshotValue::Text(selected.to_string()));

    let used = state.used_options.iter().map(|o| o.label().to_string()).collect();
    snapshot.insert(keys::USED_OPTIONS, SnapshotValue::TextSet(used));

    for (option, score) in &state.round_scores {
        snapshot.insert(keys::round_score(option.label()), SnapshotValue::Int(i64::from(*score)));
    }

    for (index, die) in state.round.dice.iter().enumerate() {
        snapshot.insert(keys::die_value(index), SnapshotValue::Int(i64::from(die.value)));
        snapshot.insert(keys::die_held(index), SnapshotValue::Bool(die.held));
    }

    snapshot
}

/// Highest score one round can produce: every die counted at its top face.
const MAX_ROUND_SCORE: u32 = DICE_COUNT as u32 * DIE_MAX as u32;

/// Decode a game state, defaulting anything missing or malformed.
///
/// After the fields are read one by one they are reconciled with each other:
/// the used options decide the round count, round scores exist exactly for
/// the used options, the total is their sum, and no die is held before the
/// first roll of a round.
#[must_use]
pub fn from_snapshot(snapshot: &Snapshot) -> GameState {
    let fresh = GameState::new();
    let fresh_dice = DiceSet::default();

    let stored_round_count = read_ranged(snapshot, keys::ROUND_COUNT, 1..=i64::from(ROUNDS_PER_GAME) + 1)
        .map_or(fresh.round_count, |v| v as u32);
    let stored_total = read_ranged(snapshot, keys::TOTAL_SCORE, 0..=i64::from(MAX_ROUND_SCORE * ROUNDS_PER_GAME))
        .map_or(fresh.total_score, |v| v as u32);
    let last_round_score = read_ranged(snapshot, keys::LAST_ROUND_SCORE, 0..=i64::from(MAX_ROUND_SCORE))
        .map_or(fresh.last_round_score, |v| v as u32);
    let rolls_left = read_ranged(snapshot, keys::ROLLS_LEFT, 0..=i64::from(ROLLS_PER_ROUND))
        .map_or(fresh.round.rolls_left, |v| v as u8);
    let scoring_menu_open = read_bool(snapshot, keys::SCORING_MENU_OPEN, fresh.scoring_menu_open);

    let mut used_options = OrdSet::new();
    if let Some(labels) = read_text_set(snapshot, keys::USED_OPTIONS) {
        for label in labels {
            match ScoringOption::from_label(label) {
                Some(option) => {
                    used_options.insert(option);
                }
                None => warn!("snapshot: dropping unknown used option {:?}", label),
            }
        }
    }

    let mut round_scores = OrdMap::new();
    for (key, value) in snapshot.iter() {
        let Some(label) = key.strip_prefix(keys::ROUND_SCORE_PREFIX) else {
            continue;
        };
        let option = ScoringOption::from_label(label);
        let score = match value {
            SnapshotValue::Int(v) => u32::try_from(*v).ok().filter(|s| *s <= MAX_ROUND_SCORE),
            _ => None,
        };
        match (option, score) {
            (Some(option), Some(_)) if !used_options.contains(&option) => {
                warn!("snapshot: dropping {} for an option that was never used", key);
            }
            (Some(option), Some(score)) => {
                round_scores.insert(option, score);
            }
            _ => warn!("snapshot: dropping malformed {} = {:?}", key, value),
        }
    }
    for option in &used_options {
        if !round_scores.contains_key(option) {
            warn!("snapshot: used option {} has no round score, recording 0", option);
            round_scores.insert(*option, 0);
        }
    }

    let round_count = used_options.len() as u32 + 1;
    if round_count != stored_round_count {
        warn!(
            "snapshot: roundCount {} disagrees with {} used option(s), using {}",
            stored_round_count,
            used_options.len(),
            round_count
        );
    }

    let total_score: u32 = round_scores.values().sum();
    if total_score != stored_total {
        warn!(
            "snapshot: totalScore {} disagrees with round scores, using {}",
            stored_total, total_score
        );
    }

    let last_round_score = if used_options.is_empty() { 0 } else { last_round_score };

    let selected = match read_text(snapshot, keys::SELECTED_OPTION) {
        None => None,
        Some(keys::NONE_SELECTED) => None,
        Some(label) => match ScoringOption::from_label(label) {
            Some(option) if used_options.contains(&option) => {
                warn!("snapshot: selected option {} is already used, clearing", option);
                None
            }
            Some(option) if round_count > ROUNDS_PER_GAME => {
                warn!("snapshot: selected option {} after game end, clearing", option);
                None
            }
            Some(option) => Some(option),
            None => {
                warn!("snapshot: unknown selected option {:?}, clearing", label);
                None
            }
        },
    };

    let holds_allowed = rolls_left < ROLLS_PER_ROUND;
    let dice: [Die; DICE_COUNT] = std::array::from_fn(|index| {
        let value = read_ranged(snapshot, &keys::die_value(index), i64::from(DIE_MIN)..=i64::from(DIE_MAX))
            .map_or(fresh_dice[index].value, |v| v as u8);
        let held = read_bool(snapshot, &keys::die_held(index), false);
        if held && !holds_allowed {
            warn!("snapshot: die {} held before the first roll, releasing", index + 1);
        }
        Die {
            value,
            held: held && holds_allowed,
        }
    });

    GameState {
        round_count,
        total_score,
        round_scores,
        used_options,
        last_round_score,
        scoring_menu_open,
        round: RoundState {
            rolls_left,
            dice: DiceSet::from_dice(dice),
            selected,
        },
    }
}

/// Integer in `range`, or `None` (with a warning if present but unusable).
fn read_ranged(snapshot: &Snapshot, key: &str, range: std::ops::RangeInclusive<i64>) -> Option<i64> {
    let value = snapshot.get(key)?;
    match value {
        SnapshotValue::Int(v) if range.contains(v) => Some(*v),
        _ => {
            warn!("snapshot: {} = {:?} is not an integer in {:?}, using default", key, value, range);
            None
        }
    }
}

fn read_bool(snapshot: &Snapshot, key: &str, default: bool) -> bool {
    match snapshot.get(key) {
        None => default,
        Some(SnapshotValue::Bool(v)) => *v,
        Some(other) => {
            warn!("snapshot: {} = {:?} is not a bool, using default", key, other);
            default
        }
    }
}

fn read_text<'a>(snapshot: &'a Snapshot, key: &str) -> Option<&'a str> {
    let value = snapshot.get(key)?;
    match value {
        SnapshotValue::Text(v) => Some(v.as_str()),
        _ => {
            warn!("snapshot: {} = {:?} is not text, using default", key, value);
            None
        }
    }
}

fn read_text_set<'a>(snapshot: &'a Snapshot, key: &str) -> Option<&'a BTreeSet<String>> {
    let value = snapshot.get(key)?;
    match value {
        SnapshotValue::TextSet(v) => Some(v),
        _ => {
            warn!("snapshot: {} = {:?} is not a text set, using default", key, value);
            None
        }
    }
}
