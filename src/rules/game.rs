//! The round/game state machine.
//!
//! `ThirtyGame` owns the only mutable copy of the game. Each transition
//! checks all of its preconditions first and only then mutates, so a rejected
//! action leaves the state exactly as it was.

use log::debug;

use super::action::Action;
use super::event::GameEvent;
use super::state::GameState;
use crate::core::{
    GameRng, GameRngState, IllegalTransition, InvalidInput, Result, ThirtyConfig, DICE_COUNT,
    ROLLS_PER_ROUND,
};
use crate::persistence::{from_snapshot, to_snapshot, Snapshot};
use crate::scoring::{ScoringEngine, ScoringOption};

/// Callback invoked after every successful transition.
pub type Observer = Box<dyn FnMut(&GameEvent, &GameState)>;

/// A single game of Thirty.
pub struct ThirtyGame {
    config: ThirtyConfig,
    engine: ScoringEngine,
    rng: GameRng,
    state: GameState,
    observer: Option<Observer>,
}

impl std::fmt::Debug for ThirtyGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThirtyGame")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ThirtyGame {
    /// Start a new game.
    #[must_use]
    pub fn new(config: ThirtyConfig) -> Self {
        Self::with_state(config, GameState::new())
    }

    /// Resume from an existing state.
    #[must_use]
    pub fn with_state(config: ThirtyConfig, state: GameState) -> Self {
        Self {
            engine: ScoringEngine::new(config.scoring),
            rng: GameRng::new(config.seed),
            config,
            state,
            observer: None,
        }
    }

    /// Resume from a persisted key/value snapshot. Never fails; bad fields
    /// fall back to new-game values.
    #[must_use]
    pub fn from_snapshot(config: ThirtyConfig, snapshot: &Snapshot) -> Self {
        Self::with_state(config, from_snapshot(snapshot))
    }

    // === Accessors ===

    /// Configuration this game was created with.
    #[must_use]
    pub fn config(&self) -> &ThirtyConfig {
        &self.config
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state (O(1) thanks to `im`).
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Encode the current state for the persistence layer.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        to_snapshot(&self.state)
    }

    /// The scoring engine used for commits.
    #[must_use]
    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// RNG position, for resuming a seeded game with identical future rolls.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Continue rolling from a saved RNG position.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Register the callback that receives every event.
    pub fn set_observer(&mut self, observer: impl FnMut(&GameEvent, &GameState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// What `option` would score on the current dice.
    pub fn preview_score(&self, option: ScoringOption) -> Result<u32> {
        self.engine.score(option, &self.state.round.dice.values())
    }

    // === Transitions ===

    /// Re-roll every unheld die and use up one roll.
    pub fn roll(&mut self) -> Result<GameEvent> {
        self.ensure_playing()?;
        if self.state.round.rolls_left == 0 {
            return Err(IllegalTransition::NoRollsLeft.into());
        }

        let round = &mut self.state.round;
        round.dice.roll_unheld(&mut self.rng);
        round.rolls_left -= 1;

        debug!(
            "round {}: rolled {:?}, {} roll(s) left",
            self.state.round_count,
            round.dice.values(),
            round.rolls_left
        );

        let event = GameEvent::Rolled {
            values: round.dice.values(),
            rolls_left: round.rolls_left,
        };
        Ok(self.emit(event))
    }

    /// Flip the hold flag of one die. Only allowed after the first roll.
    pub fn toggle_hold(&mut self, index: usize) -> Result<GameEvent> {
        self.ensure_playing()?;
        if index >= DICE_COUNT {
            return Err(InvalidInput::DieIndex(index).into());
        }
        if !self.state.round.has_rolled() {
            return Err(IllegalTransition::HoldBeforeFirstRoll.into());
        }

        let held = self.state.round.dice.toggle_hold(index)?;
        debug!("round {}: die {} held={}", self.state.round_count, index, held);

        Ok(self.emit(GameEvent::HoldToggled { index, held }))
    }

    /// Choose the option to score this round. Replaces any earlier choice.
    pub fn select_option(&mut self, option: ScoringOption) -> Result<GameEvent> {
        self.ensure_playing()?;
        if !self.state.is_available(option) {
            return Err(IllegalTransition::OptionAlreadyUsed(option).into());
        }

        self.state.round.selected = Some(option);
        self.state.scoring_menu_open = false;
        debug!("round {}: selected {}", self.state.round_count, option);

        Ok(self.emit(GameEvent::OptionSelected(option)))
    }

    /// [`select_option`](Self::select_option) by label.
    pub fn select_label(&mut self, label: &str) -> Result<GameEvent> {
        let option: ScoringOption = label.parse()?;
        self.select_option(option)
    }

    /// Score the round, fold it into the totals and move to the next round.
    pub fn commit_round(&mut self) -> Result<GameEvent> {
        self.ensure_playing()?;
        let rolls_left = self.state.round.rolls_left;
        if rolls_left > 0 {
            return Err(IllegalTransition::RollsRemaining(rolls_left).into());
        }
        let option = self
            .state
            .round
            .selected
            .ok_or(IllegalTransition::NoOptionSelected)?;
        if !self.state.is_available(option) {
            return Err(IllegalTransition::OptionAlreadyUsed(option).into());
        }

        let score = self.engine.score(option, &self.state.round.dice.values())?;
        let total_score = self
            .state
            .total_score
            .checked_add(score)
            .ok_or(IllegalTransition::ScoreOverflow(score))?;
        let round = self.state.round_count;

        self.state.total_score = total_score;
        self.state.round_scores.insert(option, score);
        self.state.used_options.insert(option);
        self.state.last_round_score = score;
        self.state.round_count += 1;

        let game_over = self.state.is_over();
        if game_over {
            self.state.round.selected = None;
            self.state.scoring_menu_open = false;
        } else {
            self.state.start_round();
        }

        debug!(
            "round {}: committed {} for {} (total {}){}",
            round,
            option,
            score,
            self.state.total_score,
            if game_over { ", game over" } else { "" }
        );

        Ok(self.emit(GameEvent::RoundCommitted {
            round,
            option,
            score,
            total_score: self.state.total_score,
            game_over,
        }))
    }

    /// Reset to a new game. Always allowed.
    pub fn restart(&mut self) -> GameEvent {
        self.state = GameState::new();
        debug!("game restarted");
        self.emit(GameEvent::Restarted)
    }

    /// Record whether the option menu is showing. Pass-through for the UI.
    ///
    /// Accepted after the game is over as well: the flag does not affect
    /// scoring, and a finished game may still show its final menu.
    pub fn set_scoring_menu_open(&mut self, open: bool) -> GameEvent {
        self.state.scoring_menu_open = open;
        self.emit(GameEvent::ScoringMenuToggled { open })
    }

    // === Action layer ===

    /// Every action that would currently succeed.
    ///
    /// `Restart` is always accepted by [`apply`](Self::apply) but is only
    /// listed once the game is over, so a random player finishes its game.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.state.is_over() {
            return vec![Action::Restart];
        }

        let round = &self.state.round;
        let mut actions = Vec::new();

        if round.rolls_left > 0 {
            actions.push(Action::Roll);
        }
        if round.rolls_left < ROLLS_PER_ROUND {
            actions.extend((0..DICE_COUNT).map(Action::ToggleHold));
        }
        actions.extend(
            self.state
                .remaining_options()
                .into_iter()
                .filter(|o| round.selected != Some(*o))
                .map(Action::Select),
        );
        if round.rolls_left == 0 && round.selected.is_some() {
            actions.push(Action::Commit);
        }

        actions
    }

    /// Apply one action.
    pub fn apply(&mut self, action: &Action) -> Result<GameEvent> {
        match *action {
            Action::Roll => self.roll(),
            Action::ToggleHold(index) => self.toggle_hold(index),
            Action::Select(option) => self.select_option(option),
            Action::Commit => self.commit_round(),
            Action::Restart => Ok(self.restart()),
        }
    }

    // === Internals ===

    fn ensure_playing(&self) -> Result<()> {
        if self.state.is_over() {
            return Err(IllegalTransition::GameOver.into());
        }
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) -> GameEvent {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event, &self.state);
        }
        event
    }
}
