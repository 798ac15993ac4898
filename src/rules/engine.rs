//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - The starting position
//! - What moves are legal
//! - How moves modify state
//! - Win/loss conditions

use std::fmt::Debug;

use crate::core::{GameRng, Side};

use super::outcome::{GameResult, Outcome, Rejection};

/// Rules engine trait.
///
/// Engines are immutable rule books: all game data lives in `State`, so one
/// engine value can serve any number of games.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Moves for the side to move; empty when it cannot act
/// - `apply_move`: Must leave the state untouched when it returns `Invalid`
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Snapshot of one game in progress.
    type State: Clone + Debug;

    /// A single move for this game.
    type Move: Clone + Debug + PartialEq;

    /// Build the starting state. Games with random setup draw from `rng`.
    fn initial_state(&self, rng: &mut GameRng) -> Self::State;

    /// The side whose turn it is.
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// Enumerate legal moves for the side to move.
    fn legal_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply a move in place.
    fn apply_move(&self, state: &mut Self::State, mv: &Self::Move) -> Outcome;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;

    /// Heuristic value of a move for greedy play. Higher is better.
    fn score_move(&self, _state: &Self::State, _mv: &Self::Move) -> i32 {
        0
    }

    /// Give up the turn because no legal move exists.
    ///
    /// Games without a pass rule refuse.
    fn pass_turn(&self, _state: &mut Self::State) -> Outcome {
        Outcome::Invalid(Rejection::IllegalMove)
    }

    // === Convenience Methods ===

    /// Pure form of `apply_move`: returns the next state alongside the outcome.
    fn apply(&self, state: &Self::State, mv: &Self::Move) -> (Self::State, Outcome) {
        let mut next = state.clone();
        let outcome = self.apply_move(&mut next, mv);
        (next, outcome)
    }

    /// The winning side, if the game is over and was not drawn.
    fn winner(&self, state: &Self::State) -> Option<Side> {
        self.is_terminal(state).and_then(|result| result.winner())
    }

    /// Shorthand for `is_terminal(state).is_some()`.
    fn is_finished(&self, state: &Self::State) -> bool {
        self.is_terminal(state).is_some()
    }
}
