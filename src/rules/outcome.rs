//! Results of applying a move.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Side),
    /// Draw (no winner).
    Draw,
    /// A solo game ended without a win (caught in the labyrinth).
    Defeat,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }

    /// The winning side, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::Winner(side) => Some(*side),
            GameResult::Draw | GameResult::Defeat => None,
        }
    }
}

/// Why a move was refused. The state is untouched whenever one of these
/// comes back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// The game is already over.
    Finished,
    /// It is the other side's turn.
    NotYourTurn,
    /// The source holds nothing the mover may move.
    NoPiece,
    /// The chosen pit holds no seeds.
    EmptyHole,
    /// The move breaks the game's movement rules.
    IllegalMove,
    /// A coordinate or index lies outside the board.
    OutOfBounds,
    /// The move belongs to a different phase of the game.
    WrongPhase,
    /// A timed sequence is still running.
    Busy,
}

/// Outcome of a single move application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Move applied, game goes on.
    Continues,
    /// Move refused, nothing changed.
    Invalid(Rejection),
    /// Move applied and ended the game.
    GameOver(GameResult),
}

impl Outcome {
    /// Did the move change the state?
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !matches!(self, Outcome::Invalid(_))
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, Outcome::GameOver(_))
    }

    /// The final result, when this outcome ended the game.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self {
            Outcome::GameOver(result) => Some(*result),
            _ => None,
        }
    }
}
