//! Move-choice policies for computer-controlled sides.
//!
//! Policies are trait-based so a stronger player can be dropped in without
//! touching any rule engine:
//! - `GreedyCapture`: best `score_move` value, ties broken at random
//! - `RandomLegal`: uniform over legal moves
//!
//! `Strategy` is the tagged form sessions store in their configuration.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::rules::RulesEngine;

/// Policy for choosing a move for the side to move.
pub trait MovePolicy<E: RulesEngine> {
    /// Choose a move.
    ///
    /// Returns `None` if no legal moves exist.
    fn choose_move(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Option<E::Move>;
}

/// Single-ply greedy policy.
///
/// Scores every legal move with [`RulesEngine::score_move`] and picks one of
/// the highest-scoring moves uniformly at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyCapture;

impl<E: RulesEngine> MovePolicy<E> for GreedyCapture {
    fn choose_move(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Option<E::Move> {
        let scored: Vec<(i32, E::Move)> = engine
            .legal_moves(state)
            .into_iter()
            .map(|mv| (engine.score_move(state, &mv), mv))
            .collect();

        let best = scored.iter().map(|(score, _)| *score).max()?;
        let top: Vec<&E::Move> = scored
            .iter()
            .filter(|(score, _)| *score == best)
            .map(|(_, mv)| mv)
            .collect();

        rng.choose(&top).map(|mv| (*mv).clone())
    }
}

/// Uniform random policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomLegal;

impl<E: RulesEngine> MovePolicy<E> for RandomLegal {
    fn choose_move(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Option<E::Move> {
        let moves = engine.legal_moves(state);
        rng.choose(&moves).cloned()
    }
}

/// Tagged policy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    GreedyCapture,
    RandomLegal,
}

impl<E: RulesEngine> MovePolicy<E> for Strategy {
    fn choose_move(&self, engine: &E, state: &E::State, rng: &mut GameRng) -> Option<E::Move> {
        match self {
            Strategy::GreedyCapture => GreedyCapture.choose_move(engine, state, rng),
            Strategy::RandomLegal => RandomLegal.choose_move(engine, state, rng),
        }
    }
}
