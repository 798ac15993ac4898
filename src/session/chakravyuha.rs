//! Chakravyuha with guards patrolling on a timer.

use std::sync::Arc;

use crate::core::{EngineConfig, GameRng, TimingConfig};
use crate::driver::AnimationDriver;
use crate::games::chakravyuha::{Chakravyuha, ChakravyuhaState, Direction};
use crate::rules::{Outcome, RulesEngine};

use super::report::{PlayerIdentity, ScoreDispatch, ScoreReporter};

/// The one recurring step: every guard advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrolTick;

/// A Chakravyuha run across levels.
///
/// Player input and patrol ticks both go through the same state, so a guard
/// stepping onto the player and the player stepping onto a guard are caught
/// alike. Patrols stop as soon as a level ends.
#[derive(Debug)]
pub struct ChakravyuhaSession {
    engine: Chakravyuha,
    state: ChakravyuhaState,
    rng: GameRng,
    driver: AnimationDriver<PatrolTick>,
    timing: TimingConfig,
    score: ScoreDispatch,
}

impl ChakravyuhaSession {
    pub fn new(config: &EngineConfig) -> Self {
        let engine = Chakravyuha::new(config.scoring.clone());
        let mut rng = GameRng::new(config.seed);
        let state = engine.initial_state(&mut rng);
        let mut session = Self {
            engine,
            state,
            rng,
            driver: AnimationDriver::new(),
            timing: config.timing.clone(),
            score: ScoreDispatch::default(),
        };
        session.schedule_patrol();
        session
    }

    #[must_use]
    pub fn with_reporter(
        mut self,
        identity: PlayerIdentity,
        reporter: Arc<dyn ScoreReporter>,
    ) -> Self {
        self.score = ScoreDispatch::new(identity, reporter);
        self
    }

    /// Swap in a prepared level, restarting the patrol clock.
    #[must_use]
    pub fn with_state(mut self, state: ChakravyuhaState) -> Self {
        self.state = state;
        self.driver.reset();
        self.schedule_patrol();
        self
    }

    #[must_use]
    pub fn state(&self) -> &ChakravyuhaState {
        &self.state
    }

    /// Patrol interval on the current level.
    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.timing.enemy_tick_ms(self.state.level)
    }

    /// Player input.
    pub fn steer(&mut self, direction: Direction) -> Outcome {
        let outcome = self.engine.apply_move(&mut self.state, &direction);
        self.after(outcome);
        outcome
    }

    /// Move the clock to `now_ms`, running every patrol tick that came due.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(PatrolTick) = self.driver.pop_until(now_ms) {
            let outcome = self.engine.tick(&mut self.state);
            if outcome.is_applied() {
                outcomes.push(outcome);
            }
            self.after(outcome);
            if !outcome.is_game_over() && outcome.is_applied() {
                self.schedule_patrol();
            }
        }
        outcomes
    }

    /// Play again: the next level after a win, the same level after a loss.
    pub fn replay(&mut self) {
        self.driver.reset();
        self.state = self.engine.next_level(&self.state, &mut self.rng);
        self.score.reset();
        tracing::debug!(level = self.state.level, "chakravyuha replay");
        self.schedule_patrol();
    }

    fn after(&mut self, outcome: Outcome) {
        let Some(result) = outcome.result() else { return };
        self.driver.cancel_all();
        if result.winner().is_some() {
            self.score.dispatch(self.engine.points_for(self.state.level));
        }
    }

    fn schedule_patrol(&mut self) {
        if !self.engine.is_finished(&self.state) {
            self.driver.schedule(self.tick_interval_ms(), PatrolTick);
        }
    }
}
