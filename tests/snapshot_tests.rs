//! Persistence boundary tests.
//!
//! These tests save a game mid-round, restore it into a new `ThirtyGame`
//! and keep playing.

use thirty::persistence::keys;
use thirty::{
    Action, GameEvent, GameState, ScoringOption, Snapshot, SnapshotValue, ThirtyConfig, ThirtyGame,
};

/// Test saving mid-round and resuming play from the snapshot.
#[test]
fn test_resume_mid_round() {
    let mut game = ThirtyGame::new(ThirtyConfig::default().with_seed(31));
    for _ in 0..3 {
        game.roll().unwrap();
    }
    game.select_option(ScoringOption::Low).unwrap();
    game.commit_round().unwrap();
    game.roll().unwrap();
    game.toggle_hold(4).unwrap();
    game.select_option(ScoringOption::Eight).unwrap();

    let blob = game.to_snapshot().to_bytes().unwrap();

    let snapshot = Snapshot::from_bytes(&blob).unwrap();
    let mut resumed = ThirtyGame::from_snapshot(ThirtyConfig::default().with_seed(99), &snapshot);
    assert_eq!(resumed.state(), game.state());

    let held_value = resumed.state().round.dice[4].value;
    resumed.roll().unwrap();
    resumed.roll().unwrap();
    assert_eq!(resumed.state().round.dice[4].value, held_value);

    resumed.commit_round().unwrap();
    assert_eq!(resumed.state().round_count, 3);
    assert!(resumed.state().used_options.contains(&ScoringOption::Eight));
}

/// Test that a partially written store still loads.
#[test]
fn test_partial_store_defaults_missing_keys() {
    let mut snapshot = Snapshot::new();
    snapshot.insert(keys::ROUND_COUNT, SnapshotValue::Int(3));
    snapshot.insert(keys::TOTAL_SCORE, SnapshotValue::Int(30));
    snapshot.insert(
        keys::USED_OPTIONS,
        SnapshotValue::TextSet(["11", "Low"].iter().map(|s| s.to_string()).collect()),
    );
    snapshot.insert(keys::round_score("11"), SnapshotValue::Int(22));
    snapshot.insert(keys::round_score("Low"), SnapshotValue::Int(8));
    snapshot.insert("dice3Value", SnapshotValue::Int(6));

    let game = ThirtyGame::from_snapshot(ThirtyConfig::default(), &snapshot);
    let state = game.state();

    assert_eq!(state.round_count, 3);
    assert_eq!(state.total_score, 30);
    assert_eq!(state.round.rolls_left, 3);
    assert_eq!(state.round.dice.values(), [1, 2, 6, 4, 5, 6]);
    assert_eq!(state.round_scores.get(&ScoringOption::Eleven), Some(&22));
    assert_eq!(state.round.selected, None);
}

/// Test that contradicting fields are reconciled into a playable state.
#[test]
fn test_contradicting_store_is_reconciled() {
    let mut snapshot = Snapshot::new();
    snapshot.insert(keys::ROUND_COUNT, SnapshotValue::Int(6));
    snapshot.insert(keys::TOTAL_SCORE, SnapshotValue::Int(57));
    snapshot.insert(keys::round_score("11"), SnapshotValue::Int(22));
    snapshot.insert("dice2Held", SnapshotValue::Bool(true));

    let mut game = ThirtyGame::from_snapshot(ThirtyConfig::default().with_seed(8), &snapshot);
    let state = game.state();

    assert_eq!(state.round_count, 1);
    assert_eq!(state.total_score, 0);
    assert!(state.round_scores.is_empty());
    assert!(state.used_options.is_empty());
    assert_eq!(state.round.dice.held(), [false; 6]);

    game.roll().unwrap();
    assert_eq!(game.toggle_hold(1).unwrap(), GameEvent::HoldToggled { index: 1, held: true });
}

/// Test that a store with every option used loads as a finished game.
#[test]
fn test_all_options_used_without_round_count() {
    let mut snapshot = Snapshot::new();
    let all = ScoringOption::ALL.iter().map(|o| o.label().to_string()).collect();
    snapshot.insert(keys::USED_OPTIONS, SnapshotValue::TextSet(all));
    snapshot.insert(keys::ROLLS_LEFT, SnapshotValue::Int(3));

    let mut game = ThirtyGame::from_snapshot(ThirtyConfig::default(), &snapshot);

    assert!(game.state().is_over());
    assert_eq!(game.legal_actions(), vec![Action::Restart]);
    assert!(game.state().summary().is_some());
    assert_eq!(game.apply(&Action::Restart), Ok(GameEvent::Restarted));
}

/// Test that a commit on a reloaded game cannot overflow the total.
#[test]
fn test_reloaded_total_is_bounded() {
    let mut snapshot = Snapshot::new();
    snapshot.insert(keys::TOTAL_SCORE, SnapshotValue::Int(i64::from(u32::MAX)));
    snapshot.insert(keys::ROLLS_LEFT, SnapshotValue::Int(0));

    let mut game = ThirtyGame::from_snapshot(ThirtyConfig::default(), &snapshot);
    game.select_option(ScoringOption::Low).unwrap();
    game.commit_round().unwrap();

    // Default dice 1..=6: Low counts 1 + 2 + 3.
    assert_eq!(game.state().total_score, 6);
}

/// Test that the sentinel and the key layout match the stored contract.
#[test]
fn test_key_layout() {
    let mut state = GameState::new();
    state.round_scores.insert(ScoringOption::Low, 7);
    state.used_options.insert(ScoringOption::Low);

    let snapshot = thirty::to_snapshot(&state);
    let names: Vec<_> = snapshot.sorted_entries().into_iter().map(|(k, _)| k).collect();

    assert_eq!(
        names,
        vec![
            "dice1Held", "dice1Value", "dice2Held", "dice2Value", "dice3Held", "dice3Value",
            "dice4Held", "dice4Value", "dice5Held", "dice5Value", "dice6Held", "dice6Value",
            "isScoringMenuOpen", "lastRoundScore", "rollsLeft", "roundCount", "roundScore_Low",
            "selectedScoringOption", "totalScore", "usedScoringOptions",
        ]
    );
    assert_eq!(
        snapshot.get_text(keys::SELECTED_OPTION),
        Some("none selected")
    );
}
