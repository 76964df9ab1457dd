//! Property tests for scoring and game invariants.

use proptest::prelude::*;

use std::collections::BTreeSet;

use thirty::persistence::keys;
use thirty::{
    from_snapshot, score, Action, ScoringConfig, ScoringEngine, ScoringMode, ScoringOption,
    Snapshot, SnapshotValue, ThirtyConfig, ThirtyGame,
};

fn dice_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=6, 6)
}

fn option_strategy() -> impl Strategy<Value = ScoringOption> {
    prop::sample::select(ScoringOption::ALL.to_vec())
}

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        option_strategy().prop_map(|o| o.label().to_string()),
        Just(keys::NONE_SELECTED.to_string()),
        "[a-z0-9 ]{0,6}",
    ]
}

fn key_strategy() -> impl Strategy<Value = String> {
    let mut names: Vec<String> = [
        keys::ROUND_COUNT,
        keys::TOTAL_SCORE,
        keys::ROLLS_LEFT,
        keys::SCORING_MENU_OPEN,
        keys::SELECTED_OPTION,
        keys::USED_OPTIONS,
        keys::LAST_ROUND_SCORE,
    ]
    .iter()
    .map(|k| k.to_string())
    .collect();
    names.extend((0..6).flat_map(|i| [keys::die_value(i), keys::die_held(i)]));
    names.extend(ScoringOption::ALL.iter().map(|o| keys::round_score(o.label())));

    prop_oneof![
        4 => prop::sample::select(names),
        1 => label_strategy().prop_map(|l| keys::round_score(&l)),
    ]
}

fn value_strategy() -> impl Strategy<Value = SnapshotValue> {
    prop_oneof![
        (-2i64..40).prop_map(SnapshotValue::Int),
        any::<i64>().prop_map(SnapshotValue::Int),
        any::<bool>().prop_map(SnapshotValue::Bool),
        label_strategy().prop_map(SnapshotValue::Text),
        prop::collection::vec(label_strategy(), 0..12)
            .prop_map(|v| SnapshotValue::TextSet(v.into_iter().collect::<BTreeSet<_>>())),
    ]
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..40).prop_map(|entries| {
        let mut snapshot = Snapshot::new();
        for (key, value) in entries {
            snapshot.insert(key, value);
        }
        snapshot
    })
}

/// Play `choices.len()` steps, picking among legal actions by index.
fn play(seed: u64, choices: &[usize]) -> ThirtyGame {
    let mut game = ThirtyGame::new(ThirtyConfig::default().with_seed(seed));
    for &choice in choices {
        let actions = game.legal_actions();
        let action = actions[choice % actions.len()];
        game.apply(&action).unwrap();
    }
    game
}

proptest! {
    #[test]
    fn prop_low_is_sum_of_small_dice(dice in dice_strategy()) {
        let expected: u32 = dice.iter().filter(|&&d| d <= 3).map(|&d| u32::from(d)).sum();
        prop_assert_eq!(score(ScoringOption::Low, &dice).unwrap(), expected);
    }

    #[test]
    fn prop_score_is_order_independent(dice in dice_strategy(), option in option_strategy()) {
        let mut reversed = dice.clone();
        reversed.reverse();
        prop_assert_eq!(score(option, &dice), score(option, &reversed));
    }

    #[test]
    fn prop_corrected_score_is_multiple_of_target(dice in dice_strategy(), option in option_strategy()) {
        let total: u32 = dice.iter().map(|&d| u32::from(d)).sum();
        let s = score(option, &dice).unwrap();
        prop_assert!(s <= total);
        if let Some(target) = option.target() {
            prop_assert_eq!(s % target, 0);
        }
    }

    #[test]
    fn prop_reference_matches_corrected_when_shallow(dice in dice_strategy(), option in option_strategy()) {
        let shallow = ScoringConfig::default().with_max_combination_size(4);
        let corrected = ScoringEngine::new(shallow);
        let reference = ScoringEngine::new(shallow.with_mode(ScoringMode::Reference));
        prop_assert_eq!(corrected.score(option, &dice), reference.score(option, &dice));
    }

    #[test]
    fn prop_used_options_never_duplicate(seed in any::<u64>(), choices in prop::collection::vec(any::<usize>(), 0..200)) {
        let game = play(seed, &choices);
        let state = game.state();

        prop_assert!(state.used_options.len() <= 10);
        prop_assert_eq!(state.used_options.len() as u32, state.round_count - 1);
        prop_assert_eq!(state.round_scores.len(), state.used_options.len());
        prop_assert_eq!(state.round_scores.values().sum::<u32>(), state.total_score);
    }

    #[test]
    fn prop_snapshot_round_trip(seed in any::<u64>(), choices in prop::collection::vec(any::<usize>(), 0..200)) {
        let game = play(seed, &choices);
        let snapshot = game.to_snapshot();

        prop_assert_eq!(&from_snapshot(&snapshot), game.state());

        let bytes = snapshot.to_bytes().unwrap();
        let decoded = Snapshot::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &snapshot);
        prop_assert_eq!(&from_snapshot(&decoded), game.state());
    }

    #[test]
    fn prop_hold_rejected_before_first_roll(seed in any::<u64>(), rounds in 0usize..10, index in 0usize..6) {
        let mut game = ThirtyGame::new(ThirtyConfig::default().with_seed(seed));
        for option in ScoringOption::ALL.iter().take(rounds) {
            for _ in 0..3 {
                game.roll().unwrap();
            }
            game.select_option(*option).unwrap();
            game.commit_round().unwrap();
        }

        let before = game.snapshot();
        prop_assert!(game.apply(&Action::ToggleHold(index)).is_err());
        prop_assert_eq!(game.state(), &before);
    }

    #[test]
    fn prop_any_snapshot_is_playable(snapshot in snapshot_strategy(), seed in any::<u64>()) {
        let config = ThirtyConfig::default().with_seed(seed);
        let mut game = ThirtyGame::from_snapshot(config.clone(), &snapshot);
        let mut steps = 0;

        while !game.state().is_over() {
            let actions = game.legal_actions();
            for action in &actions {
                let mut trial = ThirtyGame::with_state(config.clone(), game.snapshot());
                prop_assert!(trial.apply(action).is_ok(), "{} failed on {:?}", action, game.state());
            }

            let action = actions
                .iter()
                .find(|a| matches!(a, Action::Commit))
                .or_else(|| actions.iter().find(|a| matches!(a, Action::Roll)))
                .or_else(|| actions.iter().find(|a| matches!(a, Action::Select(_))))
                .copied();
            prop_assert!(action.is_some(), "no progress from {:?}", game.state());
            if let Some(action) = action {
                game.apply(&action).unwrap();
            }

            steps += 1;
            prop_assert!(steps < 100, "game did not terminate");
        }

        prop_assert!(game.state().summary().is_some());
        prop_assert_eq!(game.legal_actions(), vec![Action::Restart]);
    }
}
