//! Chaturanga rules.
//!
//! Standard piece geometry on an 8×8 board with a simplified ending: there
//! is no check, castling, en passant or promotion, and capturing the
//! opposing king wins on the spot.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Cell, Grid};
use crate::core::{GameRng, Side};
use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

use super::piece::{Piece, PieceKind};

pub const BOARD_SIZE: usize = 8;

/// Score for a move that takes the opposing king.
pub const KING_CAPTURE_SCORE: i32 = 1000;
/// Score for any other capture.
pub const CAPTURE_SCORE: i32 = 10;

pub type ChessBoard = Grid<Option<Piece>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Cell,
    pub to: Cell,
}

impl ChessMove {
    #[must_use]
    pub const fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }
}

/// A played move with what it took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub side: Side,
    pub mv: ChessMove,
    pub captured: Option<PieceKind>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChessState {
    pub board: ChessBoard,
    pub side_to_move: Side,
    pub winner: Option<Side>,
    pub history: Vector<MoveRecord>,
}

impl ChessState {
    /// A position with an arbitrary board, `side_to_move` to play.
    #[must_use]
    pub fn from_board(board: ChessBoard, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            winner: None,
            history: Vector::new(),
        }
    }

    /// Piece at a square (None when empty or off the board).
    #[must_use]
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.board.get(cell).copied().flatten()
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.board.iter().filter(|(_, p)| p.is_some()).count()
    }
}

/// The standard opening array; `Side::Second` occupies rows 0 and 1.
#[must_use]
pub fn initial_board() -> ChessBoard {
    const BACK_RANK: [PieceKind; BOARD_SIZE] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    Grid::from_fn(BOARD_SIZE, BOARD_SIZE, |cell| match cell.row {
        0 => Some(Piece::new(BACK_RANK[cell.col], Side::Second)),
        1 => Some(Piece::new(PieceKind::Pawn, Side::Second)),
        6 => Some(Piece::new(PieceKind::Pawn, Side::First)),
        7 => Some(Piece::new(BACK_RANK[cell.col], Side::First)),
        _ => None,
    })
}

/// An empty board for composing test positions.
#[must_use]
pub fn empty_board() -> ChessBoard {
    Grid::new(BOARD_SIZE, BOARD_SIZE, None)
}

fn pawn_start_row(side: Side) -> usize {
    match side {
        Side::First => 6,
        Side::Second => 1,
    }
}

/// True when every square strictly between `from` and `to` is empty.
///
/// Only meaningful for straight or diagonal lines.
fn path_clear(board: &ChessBoard, from: Cell, to: Cell) -> bool {
    let (dr, dc) = from.delta(to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut current = from;
    loop {
        current = match board.offset(current, step_r, step_c) {
            Some(next) => next,
            None => return false,
        };
        if current == to {
            return true;
        }
        if board.get(current).copied().flatten().is_some() {
            return false;
        }
    }
}

/// Geometric legality of moving `piece` from `from` to `to`.
///
/// The destination must be on the board and empty or held by the opponent.
#[must_use]
pub fn legal_move(board: &ChessBoard, from: Cell, to: Cell, piece: Piece) -> bool {
    if from == to || !board.contains(from) || !board.contains(to) {
        return false;
    }
    let target = board.get(to).copied().flatten();
    if target.is_some_and(|t| t.side == piece.side) {
        return false;
    }

    let (dr, dc) = from.delta(to);
    let (adr, adc) = (dr.abs(), dc.abs());

    match piece.kind {
        PieceKind::Pawn => {
            let forward = piece.forward();
            if dc == 0 && dr == forward {
                target.is_none()
            } else if dc == 0 && dr == 2 * forward {
                from.row == pawn_start_row(piece.side)
                    && target.is_none()
                    && path_clear(board, from, to)
            } else if adc == 1 && dr == forward {
                target.is_some()
            } else {
                false
            }
        }
        PieceKind::Rook => (dr == 0) != (dc == 0) && path_clear(board, from, to),
        PieceKind::Knight => (adr == 1 && adc == 2) || (adr == 2 && adc == 1),
        PieceKind::Bishop => adr == adc && path_clear(board, from, to),
        PieceKind::Queen => {
            ((dr == 0) != (dc == 0) || adr == adc) && path_clear(board, from, to)
        }
        PieceKind::King => adr.max(adc) == 1,
    }
}

/// Chess rule book.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chaturanga;

impl Chaturanga {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Legal moves for one side regardless of whose turn it is.
    #[must_use]
    pub fn moves_for(&self, state: &ChessState, side: Side) -> Vec<ChessMove> {
        let board = &state.board;
        let mut moves = Vec::new();
        for (from, piece) in board.iter() {
            let Some(piece) = (*piece).filter(|p| p.side == side) else {
                continue;
            };
            for to in board.cells() {
                if legal_move(board, from, to, piece) {
                    moves.push(ChessMove::new(from, to));
                }
            }
        }
        moves
    }
}

impl RulesEngine for Chaturanga {
    type State = ChessState;
    type Move = ChessMove;

    fn initial_state(&self, _rng: &mut GameRng) -> ChessState {
        ChessState::from_board(initial_board(), Side::First)
    }

    fn side_to_move(&self, state: &ChessState) -> Side {
        state.side_to_move
    }

    fn legal_moves(&self, state: &ChessState) -> Vec<ChessMove> {
        if state.winner.is_some() {
            return Vec::new();
        }
        self.moves_for(state, state.side_to_move)
    }

    fn apply_move(&self, state: &mut ChessState, mv: &ChessMove) -> Outcome {
        if state.winner.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        if !state.board.contains(mv.from) || !state.board.contains(mv.to) {
            return Outcome::Invalid(Rejection::OutOfBounds);
        }
        let Some(piece) = state.piece_at(mv.from) else {
            return Outcome::Invalid(Rejection::NoPiece);
        };
        if piece.side != state.side_to_move {
            return Outcome::Invalid(Rejection::NotYourTurn);
        }
        if !legal_move(&state.board, mv.from, mv.to, piece) {
            return Outcome::Invalid(Rejection::IllegalMove);
        }

        let captured = state.board.replace(mv.to, Some(piece)).flatten();
        state.board.replace(mv.from, None);
        state.history.push_back(MoveRecord {
            side: piece.side,
            mv: *mv,
            captured: captured.map(|p| p.kind),
        });
        tracing::debug!(side = %piece.side, from = %mv.from, to = %mv.to, ?captured, "chess move");

        if captured.is_some_and(|p| p.kind == PieceKind::King) {
            state.winner = Some(piece.side);
            tracing::info!(winner = %piece.side, "king captured");
            return Outcome::GameOver(GameResult::Winner(piece.side));
        }

        state.side_to_move = piece.side.opponent();
        Outcome::Continues
    }

    fn is_terminal(&self, state: &ChessState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }

    fn score_move(&self, state: &ChessState, mv: &ChessMove) -> i32 {
        match state.piece_at(mv.to) {
            Some(p) if p.kind == PieceKind::King => KING_CAPTURE_SCORE,
            Some(_) => CAPTURE_SCORE,
            None => 0,
        }
    }

    fn pass_turn(&self, state: &mut ChessState) -> Outcome {
        if state.winner.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        if !self.legal_moves(state).is_empty() {
            return Outcome::Invalid(Rejection::IllegalMove);
        }
        tracing::debug!(side = %state.side_to_move, "no legal chess move, passing");
        state.side_to_move = state.side_to_move.opponent();
        Outcome::Continues
    }
}
