//! Pallanguzhi with seed-by-seed sowing.

use std::sync::Arc;

use crate::core::{EngineConfig, GameRng, Side};
use crate::driver::AnimationDriver;
use crate::games::pallanguzhi::{Pallanguzhi, PallanguzhiState, SowStep};
use crate::policy::{MovePolicy, Strategy};
use crate::rules::{Outcome, Rejection, RulesEngine};

use super::report::{PlayerIdentity, ScoreDispatch, ScoreReporter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SowingStep {
    /// Drop the next seed.
    Seed,
    /// The computer picks a hole on turn `turn`.
    ComputerSow { turn: u64 },
}

/// A Pallanguzhi game animated one seed per `sow_step_ms`.
///
/// Input is refused while seeds are in hand. Restarting abandons any sowing
/// in flight; its remaining steps never touch the new board.
#[derive(Debug)]
pub struct PallanguzhiSession {
    engine: Pallanguzhi,
    state: PallanguzhiState,
    rng: GameRng,
    driver: AnimationDriver<SowingStep>,
    computer: Option<(Side, Strategy)>,
    ai_delay_ms: u64,
    sow_step_ms: u64,
    win_points: u64,
    turn: u64,
    score: ScoreDispatch,
}

impl PallanguzhiSession {
    pub fn new(config: &EngineConfig) -> Self {
        let engine = Pallanguzhi::new(&config.sowing);
        let mut rng = GameRng::new(config.seed);
        let state = engine.initial_state(&mut rng);
        Self {
            engine,
            state,
            rng,
            driver: AnimationDriver::new(),
            computer: None,
            ai_delay_ms: config.timing.ai_delay_ms,
            sow_step_ms: config.timing.sow_step_ms,
            win_points: config.scoring.win_points,
            turn: 0,
            score: ScoreDispatch::default(),
        }
    }

    #[must_use]
    pub fn with_computer(mut self, side: Side, strategy: Strategy) -> Self {
        self.computer = Some((side, strategy));
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

    /// Replace the board, e.g. to resume a saved position.
    ///
    /// A position saved mid-sowing picks up with the next seed.
    #[must_use]
    pub fn with_state(mut self, state: PallanguzhiState) -> Self {
        self.state = state;
        self.driver.cancel_all();
        if self.state.is_sowing() {
            self.driver.schedule(self.sow_step_ms, SowingStep::Seed);
        } else {
            self.schedule_computer();
        }
        self
    }

    #[must_use]
    pub fn state(&self) -> &PallanguzhiState {
        &self.state
    }

    #[must_use]
    pub fn is_sowing(&self) -> bool {
        self.state.is_sowing()
    }

    /// True while any seed or computer turn is still queued.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.driver.is_busy()
    }

    /// The local player picks up `hole`.
    pub fn sow(&mut self, hole: usize) -> Outcome {
        if self.state.is_sowing() {
            return Outcome::Invalid(Rejection::Busy);
        }
        if self.is_computer_turn() && !self.engine.is_finished(&self.state) {
            return Outcome::Invalid(Rejection::NotYourTurn);
        }
        self.start(hole)
    }

    /// Move the clock to `now_ms` and run whatever came due.
    ///
    /// Returns every sowing step taken, in order, for the UI to animate.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SowStep> {
        let mut steps = Vec::new();
        while let Some(step) = self.driver.pop_until(now_ms) {
            match step {
                SowingStep::Seed => {
                    if let Some(sown) = self.engine.advance(&mut self.state) {
                        steps.push(sown);
                        if sown.is_final() {
                            self.turn_over();
                        } else {
                            self.driver.schedule(self.sow_step_ms, SowingStep::Seed);
                        }
                    }
                }
                SowingStep::ComputerSow { turn } => self.computer_sow(turn),
            }
        }
        steps
    }

    /// New game. Seeds still in hand from the old one are forgotten.
    pub fn restart(&mut self) {
        self.driver.reset();
        self.rng = self.rng.fork();
        self.state = self.engine.initial_state(&mut self.rng);
        self.turn = 0;
        self.score.reset();
        self.schedule_computer();
    }

    fn start(&mut self, hole: usize) -> Outcome {
        let outcome = self.engine.start_sowing(&mut self.state, hole);
        if outcome.is_applied() {
            self.driver.schedule(self.sow_step_ms, SowingStep::Seed);
        }
        outcome
    }

    fn is_computer_turn(&self) -> bool {
        self.computer.is_some_and(|(side, _)| side == self.state.side_to_move)
    }

    fn computer_sow(&mut self, turn: u64) {
        if turn != self.turn || !self.is_computer_turn() || self.state.is_sowing() {
            return;
        }
        let Some((_, strategy)) = self.computer else { return };
        if let Some(hole) = strategy.choose_move(&self.engine, &self.state, &mut self.rng) {
            tracing::debug!(hole, "computer sows");
            self.start(hole);
        }
    }

    fn turn_over(&mut self) {
        self.turn += 1;
        if let Some(result) = self.engine.is_terminal(&self.state) {
            let local = self.computer.map_or(Side::First, |(side, _)| side.opponent());
            if result.is_winner(local) {
                self.score.dispatch(self.win_points);
            }
            return;
        }
        self.schedule_computer();
    }

    fn schedule_computer(&mut self) {
        if self.is_computer_turn() && !self.engine.is_finished(&self.state) {
            self.driver
                .schedule(self.ai_delay_ms, SowingStep::ComputerSow { turn: self.turn });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pallanguzhi::HOLE_COUNT;

    fn config() -> EngineConfig {
        EngineConfig::default().with_seed(4)
    }

    #[test]
    fn test_seeds_drop_one_per_tick() {
        let mut session = PallanguzhiSession::new(&config());
        assert_eq!(session.sow(0), Outcome::Continues);
        assert_eq!(session.sow(1), Outcome::Invalid(Rejection::Busy));

        assert_eq!(session.tick(300), vec![SowStep::Deposit { hole: 1 }]);
        assert_eq!(session.tick(600), vec![SowStep::Deposit { hole: 2 }]);
        assert_eq!(session.state().holes[1], 6);
        assert_eq!(session.state().holes[3], 5);
    }

    #[test]
    fn test_restart_discards_stale_sowing() {
        let mut session = PallanguzhiSession::new(&config());
        session.sow(0);
        session.tick(300);
        session.restart();

        assert!(!session.is_sowing());
        assert!(session.tick(100_000).is_empty());
        assert_eq!(session.state().holes, [5; HOLE_COUNT]);
    }

    #[test]
    fn test_capture_runs_to_completion() {
        let mut holes = [5; HOLE_COUNT];
        holes[8] = 0;
        let mut session = PallanguzhiSession::new(&config())
            .with_state(PallanguzhiState::from_holes(holes, Side::First));

        session.sow(3);
        let steps = session.tick(300 * 6);
        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps.last(),
            Some(&SowStep::Capture { hole: 8, opposite: 5, seeds: 7 })
        );
        assert_eq!(session.state().stores[Side::First], 7);
        assert_eq!(session.state().side_to_move, Side::Second);
    }

    #[test]
    fn test_resumes_mid_sowing() {
        let engine = Pallanguzhi::default();
        let mut saved = engine.initial_state(&mut GameRng::new(0));
        engine.start_sowing(&mut saved, 0);
        assert!(saved.is_sowing());

        let mut session = PallanguzhiSession::new(&config()).with_state(saved);
        assert_eq!(session.sow(4), Outcome::Invalid(Rejection::Busy));
        assert_eq!(session.tick(300), vec![SowStep::Deposit { hole: 1 }]);

        session.tick(10_000_000);
        assert!(!session.is_sowing());
        assert!(!session.is_busy());
        assert_eq!(session.state().side_to_move, Side::Second);
        assert_ne!(session.sow(7), Outcome::Invalid(Rejection::Busy));
    }

    #[test]
    fn test_computer_answers() {
        let mut session = PallanguzhiSession::new(&config())
            .with_computer(Side::Second, Strategy::GreedyCapture);
        session.sow(0);
        assert_eq!(session.sow(8), Outcome::Invalid(Rejection::Busy));

        // Run well past the human's sowing, the computer's delay and its sowing
        let mut now = 0;
        while session.state().side_to_move == Side::Second || session.is_sowing() || now == 0 {
            now += 300;
            session.tick(now);
            if now > 1_000_000 {
                break;
            }
        }
        assert_eq!(session.state().side_to_move, Side::First);
        assert!(!session.is_sowing());
    }
}
