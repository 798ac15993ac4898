//! Aadu Puli Aattam integration tests.
//!
//! Tests cover:
//! - Goat accounting over whole seeded games
//! - Board validation at engine construction
//! - A short scripted hunt

use kreeda::board::BoardGraph;
use kreeda::games::aadu_puli::{
    AaduPuli, Animal, HuntMove, HuntState, Phase, CAPTURES_TO_WIN, GOATS, GOAT_COUNT, TIGERS,
    TIGER_START,
};
use kreeda::{BoardError, GameResult, GameRng, MovePolicy, Outcome, RulesEngine, Strategy};

fn goats_accounted(state: &HuntState) -> usize {
    let off_board = usize::from(state.goats_captured) + usize::from(state.goats_to_place);
    state.count(Animal::Goat) + off_board
}

fn play_out(engine: &AaduPuli, seed: u64, max_plies: usize) -> Vec<HuntState> {
    let mut rng = GameRng::new(seed);
    let mut state = engine.initial_state(&mut rng);
    let mut trace = vec![state.clone()];
    for _ in 0..max_plies {
        if engine.is_finished(&state) {
            break;
        }
        match Strategy::GreedyCapture.choose_move(engine, &state, &mut rng) {
            Some(mv) => assert!(engine.apply_move(&mut state, &mv).is_applied()),
            None => assert!(engine.pass_turn(&mut state).is_applied()),
        }
        trace.push(state.clone());
    }
    trace
}

// =============================================================================
// Whole Games
// =============================================================================

/// Test that every goat is on the board, captured or still in hand.
#[test]
fn test_goats_are_conserved() {
    let engine = AaduPuli::standard().unwrap();
    for seed in 0..10 {
        for state in play_out(&engine, seed, 300) {
            assert_eq!(goats_accounted(&state), usize::from(GOAT_COUNT));
            assert_eq!(state.count(Animal::Tiger), TIGER_START.len());
        }
    }
}

/// Test that tigers never move while goats are being placed.
#[test]
fn test_tigers_wait_during_placement() {
    let engine = AaduPuli::standard().unwrap();
    let trace = play_out(&engine, 3, 300);
    for state in trace.iter().filter(|s| s.phase == Phase::Placement) {
        assert_eq!(state.side_to_move, GOATS);
        for &node in &TIGER_START {
            assert_eq!(state.occupant(node), Some(Animal::Tiger));
        }
    }
}

/// Test that a finished game names the side its rule says.
#[test]
fn test_results_follow_rules() {
    let engine = AaduPuli::standard().unwrap();
    for seed in 0..10 {
        let trace = play_out(&engine, seed, 1000);
        let Some(last) = trace.last() else { continue };
        match engine.is_terminal(last) {
            Some(GameResult::Winner(side)) if side == TIGERS => {
                assert!(last.goats_captured >= CAPTURES_TO_WIN);
            }
            Some(GameResult::Winner(side)) => {
                assert_eq!(side, GOATS);
                assert!(last.goats_captured < CAPTURES_TO_WIN);
            }
            Some(other) => panic!("unexpected result {other:?}"),
            None => {}
        }
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Test that bad boards and starts are refused.
#[test]
fn test_invalid_boards_rejected() {
    assert!(matches!(
        BoardGraph::from_lines(4, &[&[0, 1, 1]]),
        Err(BoardError::MalformedLine(0))
    ));
    assert!(matches!(
        BoardGraph::from_lines(4, &[&[0, 1, 2]]),
        Err(BoardError::Disconnected(3))
    ));

    let graph = BoardGraph::from_lines(3, &[&[0, 1, 2]]).unwrap();
    assert!(matches!(
        AaduPuli::with_board(graph.clone(), &[0, 7]),
        Err(BoardError::NodeOutOfRange { node: 7, .. })
    ));
    assert_eq!(
        AaduPuli::with_board(graph, &[1, 1]).unwrap_err(),
        BoardError::DuplicateStart(1)
    );
}

// =============================================================================
// Scripted Hunt
// =============================================================================

/// Test a jump on a small custom board.
#[test]
fn test_jump_on_custom_line() {
    let graph = BoardGraph::from_lines(4, &[&[0, 1, 2, 3]]).unwrap();
    let engine = AaduPuli::with_board(graph, &[0]).unwrap();
    let mut state = engine.initial_state(&mut GameRng::new(0));
    assert_eq!(state.goats_to_place, 3);

    engine.apply_move(&mut state, &HuntMove::Place(1));
    engine.apply_move(&mut state, &HuntMove::Place(3));
    assert_eq!(
        engine.apply_move(&mut state, &HuntMove::Step { from: 1, to: 2 }),
        Outcome::Invalid(kreeda::Rejection::WrongPhase)
    );
    engine.apply_move(&mut state, &HuntMove::Place(2));
    assert_eq!(state.phase, Phase::Movement);

    // The line is full: the tiger cannot step or jump
    assert_eq!(engine.winner(&state), Some(GOATS));
}
