//! Session integration tests.
//!
//! Tests cover:
//! - The animation driver's generation guard
//! - Computer turns against a human over a whole game
//! - Score reporting through a host-supplied reporter
//! - Sessions built from a JSON configuration

use std::sync::{Arc, Mutex};

use kreeda::board::Cell;
use kreeda::games::aadu_puli::{AaduPuli, HuntMove, TIGERS};
use kreeda::games::chaturanga::{empty_board, Chaturanga, ChessMove, ChessState, Piece, PieceKind};
use kreeda::games::moksha_patam::MokshaPatam;
use kreeda::session::Dispatch;
use kreeda::{
    AnimationDriver, EngineConfig, GameResult, GameRng, MokshaSession, MovePolicy, Outcome,
    PallanguzhiSession, PlayerIdentity, RecordingReporter, Rejection, ReportError, RulesEngine,
    ScoreDispatch, ScoreReporter, Side, Strategy, TurnSession,
};

/// Reporter that remembers the last score only.
#[derive(Default)]
struct LastScore(Mutex<Option<u64>>);

impl ScoreReporter for LastScore {
    fn report_score(&self, _user_id: &str, points: u64) -> Result<(), ReportError> {
        if let Ok(mut last) = self.0.lock() {
            *last = Some(points);
        }
        Ok(())
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Test that a reset turns every queued step stale.
#[test]
fn test_driver_reset_invalidates_queue() {
    let mut driver = AnimationDriver::new();
    let old = driver.schedule(100, "old");
    driver.reset();
    let new = driver.schedule(100, "new");

    assert!(!driver.is_current(&old));
    assert!(driver.is_current(&new));
    assert_eq!(driver.advance_to(100), vec!["new"]);
    assert!(!driver.is_busy());
}

// =============================================================================
// Turn Sessions
// =============================================================================

/// Test a whole chess game of random human moves against the computer.
#[test]
fn test_chess_against_computer() {
    let config = EngineConfig::default().with_seed(11).with_ai_delay(800);
    let reporter = Arc::new(RecordingReporter::new());
    let mut session = TurnSession::new(Chaturanga, &config)
        .with_opponent(Side::Second, Strategy::GreedyCapture)
        .with_reporter(PlayerIdentity::signed_in("ravi"), reporter.clone());
    let mut rng = GameRng::new(99);
    let mut now = 0;

    while !session.engine().is_finished(session.state()) && session.turn() < 400 {
        let engine = *session.engine();
        match Strategy::RandomLegal.choose_move(&engine, session.state(), &mut rng) {
            Some(mv) => assert!(session.play(&mv).is_applied()),
            None => assert!(session.pass().is_applied()),
        }
        if session.engine().is_finished(session.state()) {
            break;
        }
        let turn = session.turn();
        now += 800;
        assert_eq!(session.tick(now).len(), 1);
        assert_eq!(session.turn(), turn + 1);
    }

    assert!(reporter.reports().len() <= 1);
}

/// Board with both kings and one queen, the queen's owner to move.
fn queen_strike(queen_side: Side) -> ChessState {
    let mut board = empty_board();
    board.replace(Cell::new(7, 4), Some(Piece::new(PieceKind::King, Side::First)));
    board.replace(Cell::new(0, 4), Some(Piece::new(PieceKind::King, Side::Second)));
    board.replace(Cell::new(4, 0), Some(Piece::new(PieceKind::Queen, queen_side)));
    ChessState::from_board(board, queen_side)
}

/// Test that taking the computer's king reports the win once.
#[test]
fn test_chess_win_reports_score() {
    let reporter = Arc::new(RecordingReporter::new());
    let mut session = TurnSession::new(Chaturanga, &EngineConfig::default())
        .with_opponent(Side::Second, Strategy::GreedyCapture)
        .with_state(queen_strike(Side::First))
        .with_reporter(PlayerIdentity::signed_in("ravi"), reporter.clone());

    let strike = ChessMove::new(Cell::new(4, 0), Cell::new(0, 4));
    assert_eq!(
        session.play(&strike),
        Outcome::GameOver(GameResult::Winner(Side::First))
    );
    assert_eq!(reporter.reports(), vec![("ravi".to_string(), 1000)]);

    assert!(session.tick(10_000).is_empty());
    assert_eq!(reporter.reports().len(), 1);
}

/// Test that losing to the computer reports nothing.
#[test]
fn test_chess_loss_reports_nothing() {
    let reporter = Arc::new(RecordingReporter::new());
    let mut session = TurnSession::new(Chaturanga, &EngineConfig::default())
        .with_opponent(Side::First, Strategy::GreedyCapture)
        .with_state(queen_strike(Side::First))
        .with_reporter(PlayerIdentity::signed_in("ravi"), reporter.clone());

    assert_eq!(
        session.tick(800),
        vec![Outcome::GameOver(GameResult::Winner(Side::First))]
    );
    assert!(reporter.reports().is_empty());
}

/// Test that a greedy computer still throws a fair die.
#[test]
fn test_moksha_computer_rolls_vary() {
    let mut openings = std::collections::BTreeSet::new();
    for seed in 0..20 {
        let config = EngineConfig::default().with_seed(seed);
        let mut session = TurnSession::new(MokshaPatam::default(), &config)
            .with_opponent(Side::First, Strategy::GreedyCapture);
        session.tick(10_000);

        let log = &session.state().log;
        assert_eq!(log.len(), 1);
        openings.insert(log[0].roll);
    }
    assert!(openings.len() > 1);
}

/// Test that the tigers wait out the placement phase as the computer.
#[test]
fn test_tiger_computer_waits_for_placement() {
    let engine = AaduPuli::standard().unwrap();
    let mut session = TurnSession::new(engine, &EngineConfig::default())
        .with_opponent(TIGERS, Strategy::GreedyCapture);

    assert!(!session.is_busy());
    assert_eq!(session.play(&HuntMove::Place(10)), Outcome::Continues);
    assert!(session.tick(10_000).is_empty());
    assert_eq!(session.engine().side_to_move(session.state()), Side::First);
}

/// Test that a host reporter sees a solo win.
#[test]
fn test_custom_reporter_receives_win() {
    use kreeda::board::Grid;
    use kreeda::games::varna_vyuha::{Colour, VarnaState, VarnaVyuha};

    let grid = Grid::new(3, 3, Colour::Emerald);
    let mut target = grid.clone();
    target.replace(Cell::new(0, 0), Colour::Vermilion);
    target.replace(Cell::new(0, 1), Colour::Vermilion);
    target.replace(Cell::new(1, 0), Colour::Vermilion);

    let reporter = Arc::new(LastScore::default());
    let config = EngineConfig::default().with_win_points(250);
    let mut session = TurnSession::new(VarnaVyuha::default(), &config)
        .with_state(VarnaState::new(grid, target))
        .with_reporter(PlayerIdentity::signed_in("devi"), reporter.clone());

    assert!(session.play(&Cell::new(0, 0)).is_game_over());
    assert_eq!(*reporter.0.lock().unwrap(), Some(250));
}

/// Test that a failing reporter is logged and never retried.
#[test]
fn test_failed_report_is_not_retried() {
    let reporter = Arc::new(RecordingReporter::failing(ReportError::Unavailable("offline".into())));
    let mut dispatch = ScoreDispatch::new(PlayerIdentity::signed_in("kavya"), reporter.clone());

    assert_eq!(dispatch.dispatch(1000), Dispatch::Failed);
    reporter.fail_with(None);
    assert_eq!(dispatch.dispatch(1000), Dispatch::AlreadyReported);
    assert!(reporter.reports().is_empty());
}

// =============================================================================
// Animated Sessions
// =============================================================================

/// Test a configured dice animation length.
#[test]
fn test_moksha_session_from_json() {
    let config =
        EngineConfig::from_json(r#"{ "timing": { "dice_roll_ms": 100 }, "seed": 5 }"#).unwrap();
    let mut session = MokshaSession::new(MokshaPatam::default(), &config);

    assert_eq!(session.roll(), Outcome::Continues);
    assert_eq!(session.roll(), Outcome::Invalid(Rejection::Busy));
    assert!(session.is_rolling());
    assert_eq!(session.tick(100).len(), 1);
    assert!(!session.is_rolling());
    assert_eq!(session.state().log.len(), 1);
}

/// Test that the computer only sows on its own turn.
#[test]
fn test_pallanguzhi_turn_guard() {
    let config = EngineConfig::default();
    let mut session =
        PallanguzhiSession::new(&config).with_computer(Side::First, Strategy::RandomLegal);

    assert_eq!(session.sow(2), Outcome::Invalid(Rejection::NotYourTurn));
    session.tick(config.timing.ai_delay_ms);
    assert!(session.is_sowing());
}

/// Test that bad configuration is refused.
#[test]
fn test_config_validation() {
    assert!(EngineConfig::from_json(r#"{ "sowing": { "seeds_per_hole": 0 } }"#).is_err());
    assert!(EngineConfig::from_json("not json").is_err());
}
