//! Moksha Patam with an animated die.

use std::sync::Arc;

use crate::core::{EngineConfig, GameRng, Side};
use crate::driver::AnimationDriver;
use crate::games::moksha_patam::{MokshaPatam, MokshaState};
use crate::rules::{Outcome, Rejection, RulesEngine};

use super::report::{PlayerIdentity, ScoreDispatch, ScoreReporter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiceStep {
    /// The die stops and the roll is applied.
    Settle,
    /// The computer picks up the die on turn `turn`.
    ComputerRoll { turn: u64 },
}

/// A snakes and ladders game against the clock.
///
/// A roll is a two-stage affair: the die tumbles for `dice_roll_ms`, then
/// the result moves the token. No second roll is accepted while the die is
/// in the air.
#[derive(Debug)]
pub struct MokshaSession {
    engine: MokshaPatam,
    state: MokshaState,
    rng: GameRng,
    driver: AnimationDriver<DiceStep>,
    computer: Option<Side>,
    ai_delay_ms: u64,
    dice_roll_ms: u64,
    win_points: u64,
    rolling: bool,
    score: ScoreDispatch,
}

impl MokshaSession {
    pub fn new(engine: MokshaPatam, config: &EngineConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let state = engine.initial_state(&mut rng);
        Self {
            engine,
            state,
            rng,
            driver: AnimationDriver::new(),
            computer: None,
            ai_delay_ms: config.timing.ai_delay_ms,
            dice_roll_ms: config.timing.dice_roll_ms,
            win_points: config.scoring.win_points,
            rolling: false,
            score: ScoreDispatch::default(),
        }
    }

    #[must_use]
    pub fn with_computer(mut self, side: Side) -> Self {
        self.computer = Some(side);
        self.schedule_computer();
        self
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

    /// Replace the board, e.g. to resume a saved game.
    #[must_use]
    pub fn with_state(mut self, state: MokshaState) -> Self {
        self.state = state;
        self.driver.cancel_all();
        self.rolling = false;
        self.schedule_computer();
        self
    }

    #[must_use]
    pub fn state(&self) -> &MokshaState {
        &self.state
    }

    /// True while the die is tumbling.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.driver.is_busy()
    }

    /// The local player throws the die.
    pub fn roll(&mut self) -> Outcome {
        if self.engine.is_finished(&self.state) {
            return Outcome::Invalid(Rejection::Finished);
        }
        if self.rolling {
            return Outcome::Invalid(Rejection::Busy);
        }
        if self.computer == Some(self.state.side_to_move) {
            return Outcome::Invalid(Rejection::NotYourTurn);
        }
        self.throw();
        Outcome::Continues
    }

    /// Move the clock to `now_ms` and run whatever came due.
    ///
    /// Returns the outcome of each roll that settled.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Outcome> {
        let mut settled = Vec::new();
        while let Some(step) = self.driver.pop_until(now_ms) {
            match step {
                DiceStep::Settle => settled.push(self.settle()),
                DiceStep::ComputerRoll { turn } => {
                    let finished = self.engine.is_finished(&self.state);
                    if turn == self.turn() && !self.rolling && !finished {
                        self.throw();
                    }
                }
            }
        }
        settled
    }

    /// New game; any roll in flight is abandoned.
    pub fn restart(&mut self) {
        self.driver.reset();
        self.rng = self.rng.fork();
        self.state = self.engine.initial_state(&mut self.rng);
        self.rolling = false;
        self.score.reset();
        self.schedule_computer();
    }

    fn turn(&self) -> u64 {
        self.state.log.len() as u64
    }

    fn throw(&mut self) {
        self.rolling = true;
        self.driver.schedule(self.dice_roll_ms, DiceStep::Settle);
    }

    fn settle(&mut self) -> Outcome {
        self.rolling = false;
        let outcome = self.engine.roll(&mut self.state, &mut self.rng);

        if let Some(result) = outcome.result() {
            let local = self.computer.map_or(Side::First, Side::opponent);
            if result.is_winner(local) {
                self.score.dispatch(self.win_points);
            }
        } else {
            self.schedule_computer();
        }
        outcome
    }

    fn schedule_computer(&mut self) {
        if self.computer == Some(self.state.side_to_move) && !self.engine.is_finished(&self.state) {
            self.driver
                .schedule(self.ai_delay_ms, DiceStep::ComputerRoll { turn: self.turn() });
        }
    }
}
