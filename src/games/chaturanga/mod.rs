//! Chaturanga: chess with a king-capture ending.
//!
//! - Standard piece movement, sliding pieces blocked by anything in the way
//! - No check detection: the game ends when a king is taken
//! - Greedy computer play through
//!   [`RulesEngine::score_move`](crate::rules::RulesEngine::score_move)

mod game;
mod piece;
mod selection;

pub use game::{
    empty_board, initial_board, legal_move, Chaturanga, ChessBoard, ChessMove, ChessState,
    MoveRecord, BOARD_SIZE, CAPTURE_SCORE, KING_CAPTURE_SCORE,
};
pub use piece::{Piece, PieceKind};
pub use selection::{ClickResult, Selection};
