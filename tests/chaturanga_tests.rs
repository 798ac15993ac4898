//! Chaturanga integration tests.
//!
//! Whole-game properties checked over seeded random playouts:
//! - Piece count never increases
//! - Pawns never move backwards
//! - Knights always move in an L
//! - Taking a king ends the game for the taker

use kreeda::board::Cell;
use kreeda::games::chaturanga::{
    empty_board, legal_move, Chaturanga, ChessMove, ChessState, Piece, PieceKind,
};
use kreeda::{GameRng, GameResult, MovePolicy, Outcome, RulesEngine, Side, Strategy};

fn play_out(
    seed: u64,
    strategy: Strategy,
    max_plies: usize,
) -> Vec<(ChessState, ChessMove, ChessState)> {
    let engine = Chaturanga;
    let mut rng = GameRng::new(seed);
    let mut state = engine.initial_state(&mut rng);
    let mut trace = Vec::new();

    for _ in 0..max_plies {
        if engine.is_finished(&state) {
            break;
        }
        let Some(mv) = strategy.choose_move(&engine, &state, &mut rng) else {
            engine.pass_turn(&mut state);
            continue;
        };
        let before = state.clone();
        let outcome = engine.apply_move(&mut state, &mv);
        assert!(outcome.is_applied(), "policy chose an illegal move {mv:?}");
        trace.push((before, mv, state.clone()));
    }
    trace
}

// =============================================================================
// Playout Properties
// =============================================================================

/// Test that no move ever adds a piece to the board.
#[test]
fn test_piece_count_never_increases() {
    for seed in 0..20 {
        for (before, _, after) in play_out(seed, Strategy::RandomLegal, 200) {
            assert!(after.piece_count() <= before.piece_count());
        }
    }
}

/// Test pawn direction and knight geometry over many games.
#[test]
fn test_pawn_and_knight_geometry() {
    for seed in 0..20 {
        for (before, mv, _) in play_out(seed, Strategy::RandomLegal, 200) {
            let piece = before.piece_at(mv.from).expect("moved a piece");
            let (dr, dc) = mv.from.delta(mv.to);
            match piece.kind {
                PieceKind::Pawn => assert_eq!(dr.signum(), piece.forward(), "pawn moved backwards"),
                PieceKind::Knight => {
                    let mut d = [dr.abs(), dc.abs()];
                    d.sort_unstable();
                    assert_eq!(d, [1, 2]);
                }
                _ => {}
            }
        }
    }
}

/// Test that every finished game was finished by taking a king.
#[test]
fn test_games_end_on_king_capture() {
    let engine = Chaturanga;
    for seed in 0..10 {
        let trace = play_out(seed, Strategy::GreedyCapture, 400);
        let Some((_, mv, last)) = trace.last() else { continue };
        if let Some(result) = engine.is_terminal(last) {
            let GameResult::Winner(side) = result else {
                panic!("chess never draws here")
            };
            let loser = side.opponent();
            let kings = (0..8)
                .flat_map(|r| (0..8).map(move |c| Cell::new(r, c)))
                .filter(|&c| last.piece_at(c) == Some(Piece::new(PieceKind::King, loser)))
                .count();
            assert_eq!(kings, 0);
            assert_eq!(last.piece_at(mv.to).map(|p| p.side), Some(side));
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Test a short king hunt with greedy play.
#[test]
fn test_greedy_takes_exposed_king() {
    let engine = Chaturanga;
    let mut board = empty_board();
    board.replace(Cell::new(7, 4), Some(Piece::new(PieceKind::King, Side::First)));
    board.replace(Cell::new(4, 0), Some(Piece::new(PieceKind::Queen, Side::First)));
    board.replace(Cell::new(0, 4), Some(Piece::new(PieceKind::King, Side::Second)));
    board.replace(Cell::new(0, 0), Some(Piece::new(PieceKind::Rook, Side::Second)));
    let mut state = ChessState::from_board(board, Side::First);

    // Queen on (4,0) sees the king on (0,4) along the diagonal
    let mv = Strategy::GreedyCapture
        .choose_move(&engine, &state, &mut GameRng::new(0))
        .unwrap();
    assert_eq!(mv, ChessMove::new(Cell::new(4, 0), Cell::new(0, 4)));
    assert_eq!(
        engine.apply_move(&mut state, &mv),
        Outcome::GameOver(GameResult::Winner(Side::First))
    );
}

/// Test the free-standing move predicate against the engine's move list.
#[test]
fn test_legal_move_agrees_with_engine() {
    let engine = Chaturanga;
    let state = engine.initial_state(&mut GameRng::new(0));
    let moves = engine.legal_moves(&state);
    assert_eq!(moves.len(), 20);

    for mv in moves {
        let piece = state.piece_at(mv.from).unwrap();
        assert!(legal_move(&state.board, mv.from, mv.to, piece));
    }
}
