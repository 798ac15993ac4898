//! Turn-based session: one human side, an optional computer side.

use std::sync::Arc;

use crate::core::{EngineConfig, GameRng, Side};
use crate::driver::AnimationDriver;
use crate::policy::{MovePolicy, Strategy};
use crate::rules::{Outcome, Rejection, RulesEngine};

use super::report::{Dispatch, PlayerIdentity, ScoreDispatch, ScoreReporter};

/// Computer opponent settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opponent {
    pub side: Side,
    pub strategy: Strategy,
}

/// Steps a turn session schedules on its driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStep {
    /// The computer moves, provided it is still turn `turn`.
    ComputerMove { turn: u64 },
}

/// Drives any [`RulesEngine`] against a UI clock.
///
/// The computer side moves `ai_delay_ms` after its turn begins. Each turn
/// schedules at most one computer move: the step carries the turn number it
/// was scheduled for and is ignored if play has moved on.
#[derive(Debug)]
pub struct TurnSession<E: RulesEngine> {
    engine: E,
    state: E::State,
    rng: GameRng,
    driver: AnimationDriver<TurnStep>,
    opponent: Option<Opponent>,
    ai_delay_ms: u64,
    win_points: u64,
    turn: u64,
    scheduled_for: Option<u64>,
    score: ScoreDispatch,
}

impl<E: RulesEngine> TurnSession<E> {
    /// A hot-seat session with scores going nowhere.
    pub fn new(engine: E, config: &EngineConfig) -> Self {
        let mut rng = GameRng::new(config.seed);
        let state = engine.initial_state(&mut rng);
        Self {
            engine,
            state,
            rng,
            driver: AnimationDriver::new(),
            opponent: None,
            ai_delay_ms: config.timing.ai_delay_ms,
            win_points: config.scoring.win_points,
            turn: 0,
            scheduled_for: None,
            score: ScoreDispatch::default(),
        }
    }

    /// Hand one side to the computer.
    #[must_use]
    pub fn with_opponent(mut self, side: Side, strategy: Strategy) -> Self {
        self.opponent = Some(Opponent { side, strategy });
        self.schedule_computer();
        self
    }

    /// Report wins for `identity` through `reporter`.
    #[must_use]
    pub fn with_reporter(
        mut self,
        identity: PlayerIdentity,
        reporter: Arc<dyn ScoreReporter>,
    ) -> Self {
        self.score = ScoreDispatch::new(identity, reporter);
        self
    }

    /// Replace the starting position.
    #[must_use]
    pub fn with_state(mut self, state: E::State) -> Self {
        self.state = state;
        self.scheduled_for = None;
        self.driver.cancel_all();
        self.schedule_computer();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn state(&self) -> &E::State {
        &self.state
    }

    /// Turns played since the game started.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn now(&self) -> u64 {
        self.driver.now()
    }

    /// The side the local player controls.
    pub fn local_side(&self) -> Side {
        self.opponent.map_or(Side::First, |o| o.side.opponent())
    }

    /// True while the computer's move is pending.
    pub fn is_busy(&self) -> bool {
        self.driver.is_busy()
    }

    /// Play a move for the local player.
    pub fn play(&mut self, mv: &E::Move) -> Outcome {
        self.interact(|engine, state| engine.apply_move(state, mv))
    }

    /// Run a custom input handler for the local player.
    ///
    /// Use this for inputs that are not plain moves, like click selection.
    /// The handler's outcome drives turn bookkeeping exactly as `play` does.
    pub fn interact(&mut self, handler: impl FnOnce(&E, &mut E::State) -> Outcome) -> Outcome {
        if self.engine.is_finished(&self.state) {
            return Outcome::Invalid(Rejection::Finished);
        }
        if self.is_computer_turn() {
            return Outcome::Invalid(Rejection::NotYourTurn);
        }
        let outcome = handler(&self.engine, &mut self.state);
        self.after(outcome);
        outcome
    }

    /// Give up the local player's turn when nothing is playable.
    pub fn pass(&mut self) -> Outcome {
        self.interact(|engine, state| engine.pass_turn(state))
    }

    /// Move the clock to `now_ms` and run whatever came due.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        for step in self.driver.advance_to(now_ms) {
            match step {
                TurnStep::ComputerMove { turn } => {
                    if let Some(outcome) = self.computer_move(turn) {
                        outcomes.push(outcome);
                    }
                }
            }
        }
        outcomes
    }

    /// Start a fresh game. Pending computer moves from the old one are dropped.
    pub fn restart(&mut self) {
        self.driver.reset();
        self.rng = self.rng.fork();
        self.state = self.engine.initial_state(&mut self.rng);
        self.turn = 0;
        self.scheduled_for = None;
        self.score.reset();
        tracing::debug!(generation = %self.driver.generation(), "session restarted");
        self.schedule_computer();
    }

    fn is_computer_turn(&self) -> bool {
        self.opponent
            .is_some_and(|o| o.side == self.engine.side_to_move(&self.state))
    }

    fn computer_move(&mut self, turn: u64) -> Option<Outcome> {
        if turn != self.turn || !self.is_computer_turn() || self.engine.is_finished(&self.state) {
            tracing::debug!(turn, current = self.turn, "computer move no longer wanted");
            return None;
        }
        let strategy = self.opponent?.strategy;

        let outcome = match strategy.choose_move(&self.engine, &self.state, &mut self.rng) {
            Some(mv) => {
                tracing::debug!(?mv, "computer move");
                self.engine.apply_move(&mut self.state, &mv)
            }
            None => self.engine.pass_turn(&mut self.state),
        };
        self.after(outcome);
        Some(outcome)
    }

    fn after(&mut self, outcome: Outcome) {
        if !outcome.is_applied() {
            return;
        }
        self.turn += 1;

        if let Some(result) = outcome.result() {
            if result.is_winner(self.local_side()) {
                self.report_win();
            }
            return;
        }
        self.schedule_computer();
    }

    fn schedule_computer(&mut self) {
        if !self.is_computer_turn() || self.engine.is_finished(&self.state) {
            return;
        }
        if self.scheduled_for == Some(self.turn) {
            return;
        }
        self.scheduled_for = Some(self.turn);
        self.driver
            .schedule(self.ai_delay_ms, TurnStep::ComputerMove { turn: self.turn });
    }

    fn report_win(&mut self) -> Dispatch {
        self.score.dispatch(self.win_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chaturanga::{Chaturanga, ChessMove};
    use crate::board::{Cell, Grid};
    use crate::games::varna_vyuha::{Colour, VarnaState, VarnaVyuha};
    use crate::session::report::RecordingReporter;

    fn config() -> EngineConfig {
        EngineConfig::default().with_seed(3).with_ai_delay(500)
    }

    #[test]
    fn test_computer_replies_after_delay() {
        let mut session = TurnSession::new(Chaturanga, &config())
            .with_opponent(Side::Second, Strategy::GreedyCapture);

        let outcome = session.play(&ChessMove::new(Cell::new(6, 4), Cell::new(4, 4)));
        assert_eq!(outcome, Outcome::Continues);
        assert!(session.is_busy());

        // Human may not move during the computer's turn
        assert_eq!(
            session.play(&ChessMove::new(Cell::new(6, 3), Cell::new(5, 3))),
            Outcome::Invalid(Rejection::NotYourTurn)
        );

        assert!(session.tick(499).is_empty());
        assert_eq!(session.tick(500), vec![Outcome::Continues]);
        assert_eq!(session.turn(), 2);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut session = TurnSession::new(Chaturanga, &config())
            .with_opponent(Side::Second, Strategy::RandomLegal);
        let outcome = session.play(&ChessMove::new(Cell::new(7, 0), Cell::new(3, 0)));
        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert_eq!(session.turn(), 0);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_computer_opens_when_it_moves_first() {
        let mut session = TurnSession::new(Chaturanga, &config())
            .with_opponent(Side::First, Strategy::RandomLegal);
        assert!(session.is_busy());
        assert_eq!(session.tick(500).len(), 1);
        assert_eq!(session.local_side(), Side::Second);
    }

    #[test]
    fn test_restart_drops_pending_computer_move() {
        let mut session = TurnSession::new(Chaturanga, &config())
            .with_opponent(Side::Second, Strategy::RandomLegal);
        session.play(&ChessMove::new(Cell::new(6, 4), Cell::new(4, 4)));
        session.restart();

        assert!(session.tick(10_000).is_empty());
        assert_eq!(session.turn(), 0);
        assert_eq!(session.engine().side_to_move(session.state()), Side::First);
    }

    #[test]
    fn test_solo_win_reports_once() {
        let grid = Grid::new(3, 3, Colour::Saffron);
        let mut target = grid.clone();
        for cell in grid.plus_stamp(Cell::new(1, 1)) {
            target.replace(cell, Colour::Indigo);
        }

        let reporter = Arc::new(RecordingReporter::new());
        let mut session = TurnSession::new(VarnaVyuha::default(), &config())
            .with_state(VarnaState::new(grid, target))
            .with_reporter(PlayerIdentity::signed_in("asha"), reporter.clone());

        assert!(session.play(&Cell::new(1, 1)).is_game_over());
        assert_eq!(reporter.reports(), vec![("asha".to_string(), 1000)]);
        assert_eq!(session.play(&Cell::new(0, 0)), Outcome::Invalid(Rejection::Finished));
        assert_eq!(reporter.reports().len(), 1);
    }

    #[test]
    fn test_click_handler_counts_missed_clicks() {
        let mut session = TurnSession::new(VarnaVyuha::default(), &config());
        let outcome = session.interact(|engine, state| engine.click(state, Cell::new(5, 5)));

        assert_eq!(outcome, Outcome::Invalid(Rejection::OutOfBounds));
        assert_eq!(session.state().moves, 1);
        assert_eq!(session.turn(), 0);
    }
}
