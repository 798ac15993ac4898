//! Aadu Puli Aattam rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{BoardGraph, NodeId};
use crate::core::{BoardError, GameRng, Side};
use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

use super::board::{standard_board, TIGER_START};

/// Goats in a full game.
pub const GOAT_COUNT: u8 = 15;

/// Captures that win the game for the tigers.
pub const CAPTURES_TO_WIN: u8 = 5;

/// Goats play `Side::First`.
pub const GOATS: Side = Side::First;

/// Tigers play `Side::Second`.
pub const TIGERS: Side = Side::Second;

pub const JUMP_SCORE: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animal {
    Tiger,
    Goat,
}

impl Animal {
    #[must_use]
    pub fn side(self) -> Side {
        match self {
            Animal::Tiger => TIGERS,
            Animal::Goat => GOATS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Goats enter the board one at a time; tigers wait.
    Placement,
    Movement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HuntMove {
    Place(NodeId),
    Step { from: NodeId, to: NodeId },
    Jump { from: NodeId, over: NodeId, to: NodeId },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntState {
    pub nodes: Vec<Option<Animal>>,
    pub phase: Phase,
    pub goats_to_place: u8,
    pub goats_captured: u8,
    pub side_to_move: Side,
    pub winner: Option<Side>,
}

impl HuntState {
    #[must_use]
    pub fn occupant(&self, node: NodeId) -> Option<Animal> {
        self.nodes.get(node).copied().flatten()
    }

    #[must_use]
    pub fn is_empty(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node), Some(None))
    }

    /// Count of `animal` on the board.
    #[must_use]
    pub fn count(&self, animal: Animal) -> usize {
        self.nodes.iter().filter(|n| **n == Some(animal)).count()
    }
}

/// Aadu Puli Aattam rule book over a validated board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AaduPuli {
    graph: BoardGraph,
    tiger_start: SmallVec<[NodeId; 4]>,
}

impl AaduPuli {
    /// The standard 23-point board with three tigers.
    pub fn standard() -> Result<Self, BoardError> {
        Self::with_board(standard_board()?, &TIGER_START)
    }

    /// A custom board. Tiger starting points must be distinct nodes of `graph`.
    pub fn with_board(graph: BoardGraph, tiger_start: &[NodeId]) -> Result<Self, BoardError> {
        for (i, &node) in tiger_start.iter().enumerate() {
            if node >= graph.node_count() {
                return Err(BoardError::NodeOutOfRange {
                    node,
                    node_count: graph.node_count(),
                });
            }
            if tiger_start[..i].contains(&node) {
                return Err(BoardError::DuplicateStart(node));
            }
        }
        Ok(Self {
            graph,
            tiger_start: tiger_start.iter().copied().collect(),
        })
    }

    #[must_use]
    pub fn graph(&self) -> &BoardGraph {
        &self.graph
    }

    /// Goats can never be placed if the board has fewer free points than goats.
    fn goats_for_board(&self) -> u8 {
        let free = self.graph.node_count().saturating_sub(self.tiger_start.len());
        GOAT_COUNT.min(u8::try_from(free).unwrap_or(u8::MAX))
    }

    fn moves_for(&self, state: &HuntState, side: Side) -> Vec<HuntMove> {
        let mut moves = Vec::new();
        for from in self.graph.nodes() {
            let Some(animal) = state.occupant(from) else { continue };
            if animal.side() != side {
                continue;
            }
            for &to in self.graph.neighbors(from) {
                if state.is_empty(to) {
                    moves.push(HuntMove::Step { from, to });
                }
            }
            if animal == Animal::Tiger {
                for jump in self.graph.jumps_from(from) {
                    if state.occupant(jump.over) == Some(Animal::Goat) && state.is_empty(jump.end) {
                        moves.push(HuntMove::Jump {
                            from,
                            over: jump.over,
                            to: jump.end,
                        });
                    }
                }
            }
        }
        moves
    }

    fn validate(&self, state: &HuntState, mv: &HuntMove) -> Result<(), Rejection> {
        if state.winner.is_some() {
            return Err(Rejection::Finished);
        }
        let mover = state.side_to_move;
        match *mv {
            HuntMove::Place(node) => {
                if state.phase != Phase::Placement {
                    return Err(Rejection::WrongPhase);
                }
                if node >= self.graph.node_count() {
                    return Err(Rejection::OutOfBounds);
                }
                if !state.is_empty(node) {
                    return Err(Rejection::IllegalMove);
                }
                Ok(())
            }
            HuntMove::Step { from, to } | HuntMove::Jump { from, to, .. } => {
                if state.phase != Phase::Movement {
                    return Err(Rejection::WrongPhase);
                }
                if from >= self.graph.node_count() || to >= self.graph.node_count() {
                    return Err(Rejection::OutOfBounds);
                }
                let animal = state.occupant(from).ok_or(Rejection::NoPiece)?;
                if animal.side() != mover {
                    return Err(Rejection::NotYourTurn);
                }
                if !state.is_empty(to) {
                    return Err(Rejection::IllegalMove);
                }
                let geometry_ok = match *mv {
                    HuntMove::Step { .. } => self.graph.are_adjacent(from, to),
                    HuntMove::Jump { over, .. } => {
                        animal == Animal::Tiger
                            && state.occupant(over) == Some(Animal::Goat)
                            && self
                                .graph
                                .jump_between(from, to)
                                .is_some_and(|j| j.over == over)
                    }
                    HuntMove::Place(_) => false,
                };
                if geometry_ok {
                    Ok(())
                } else {
                    Err(Rejection::IllegalMove)
                }
            }
        }
    }

    fn settle(&self, state: &mut HuntState) -> Outcome {
        if state.goats_captured >= CAPTURES_TO_WIN {
            return self.finish(state, TIGERS);
        }
        if state.side_to_move == TIGERS && self.moves_for(state, TIGERS).is_empty() {
            return self.finish(state, GOATS);
        }
        Outcome::Continues
    }

    fn finish(&self, state: &mut HuntState, winner: Side) -> Outcome {
        tracing::info!(%winner, captured = state.goats_captured, "aadu puli finished");
        state.winner = Some(winner);
        Outcome::GameOver(GameResult::Winner(winner))
    }
}

impl RulesEngine for AaduPuli {
    type State = HuntState;
    type Move = HuntMove;

    fn initial_state(&self, _rng: &mut GameRng) -> HuntState {
        let mut nodes = vec![None; self.graph.node_count()];
        for &node in &self.tiger_start {
            nodes[node] = Some(Animal::Tiger);
        }
        HuntState {
            nodes,
            phase: Phase::Placement,
            goats_to_place: self.goats_for_board(),
            goats_captured: 0,
            side_to_move: GOATS,
            winner: None,
        }
    }

    fn side_to_move(&self, state: &HuntState) -> Side {
        state.side_to_move
    }

    fn legal_moves(&self, state: &HuntState) -> Vec<HuntMove> {
        if state.winner.is_some() {
            return Vec::new();
        }
        match state.phase {
            Phase::Placement => self
                .graph
                .nodes()
                .filter(|&n| state.is_empty(n))
                .map(HuntMove::Place)
                .collect(),
            Phase::Movement => self.moves_for(state, state.side_to_move),
        }
    }

    fn apply_move(&self, state: &mut HuntState, mv: &HuntMove) -> Outcome {
        if let Err(rejection) = self.validate(state, mv) {
            return Outcome::Invalid(rejection);
        }

        match *mv {
            HuntMove::Place(node) => {
                state.nodes[node] = Some(Animal::Goat);
                state.goats_to_place -= 1;
                if state.goats_to_place == 0 {
                    tracing::debug!("all goats placed, movement begins");
                    state.phase = Phase::Movement;
                    state.side_to_move = TIGERS;
                }
            }
            HuntMove::Step { from, to } => {
                state.nodes[to] = state.nodes[from].take();
                state.side_to_move = state.side_to_move.opponent();
            }
            HuntMove::Jump { from, over, to } => {
                state.nodes[to] = state.nodes[from].take();
                state.nodes[over] = None;
                state.goats_captured += 1;
                tracing::debug!(from, over, to, captured = state.goats_captured, "goat captured");
                state.side_to_move = state.side_to_move.opponent();
            }
        }

        self.settle(state)
    }

    fn is_terminal(&self, state: &HuntState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }

    fn score_move(&self, _state: &HuntState, mv: &HuntMove) -> i32 {
        match mv {
            HuntMove::Jump { .. } => JUMP_SCORE,
            _ => 0,
        }
    }

    /// Goats with no step hand the move back to the tigers.
    fn pass_turn(&self, state: &mut HuntState) -> Outcome {
        if state.winner.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        if state.phase != Phase::Movement || state.side_to_move != GOATS {
            return Outcome::Invalid(Rejection::IllegalMove);
        }
        if !self.moves_for(state, GOATS).is_empty() {
            return Outcome::Invalid(Rejection::IllegalMove);
        }
        tracing::debug!("goats blocked, passing");
        state.side_to_move = TIGERS;
        self.settle(state)
    }
}
