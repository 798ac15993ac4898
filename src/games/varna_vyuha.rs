//! Varna Vyuha: a 3×3 colour toggle puzzle.
//!
//! Clicking a tile advances its colour and the colours of its orthogonal
//! neighbours by one step through a four-colour palette. The puzzle is
//! solved when the board matches a randomly drawn target. Targets are drawn
//! independently of the start, so not every deal is solvable.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Grid};
use crate::core::{GameRng, ScoringConfig, Side};
use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

pub const GRID_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Saffron,
    Indigo,
    Emerald,
    Vermilion,
}

impl Colour {
    /// The palette in cycling order.
    pub const PALETTE: [Colour; 4] =
        [Colour::Saffron, Colour::Indigo, Colour::Emerald, Colour::Vermilion];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next colour in the palette, wrapping at the end.
    #[must_use]
    pub fn next(self) -> Colour {
        Self::PALETTE[(self.index() + 1) % Self::PALETTE.len()]
    }

    fn random(rng: &mut GameRng) -> Colour {
        Self::PALETTE[rng.gen_range_usize(0..Self::PALETTE.len())]
    }
}

pub type ColourGrid = Grid<Colour>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarnaState {
    pub grid: ColourGrid,
    pub target: ColourGrid,
    /// Clicks made so far.
    pub moves: u32,
    pub solved: bool,
    pub score: u64,
}

impl VarnaState {
    #[must_use]
    pub fn new(grid: ColourGrid, target: ColourGrid) -> Self {
        Self {
            grid,
            target,
            moves: 0,
            solved: false,
            score: 0,
        }
    }
}

/// Varna Vyuha rule book. A move is the clicked cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarnaVyuha {
    scoring: ScoringConfig,
}

impl VarnaVyuha {
    #[must_use]
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    /// Handle a click from the player.
    ///
    /// Every click after the puzzle is dealt counts as a move, including one
    /// that misses the board. Clicks after it is solved are ignored.
    pub fn click(&self, state: &mut VarnaState, cell: Cell) -> Outcome {
        if state.solved {
            return Outcome::Invalid(Rejection::Finished);
        }
        if !state.grid.contains(cell) {
            state.moves += 1;
            return Outcome::Invalid(Rejection::OutOfBounds);
        }
        self.apply_move(state, &cell)
    }

    fn random_grid(rng: &mut GameRng) -> ColourGrid {
        Grid::from_fn(GRID_SIZE, GRID_SIZE, |_| Colour::random(rng))
    }
}

impl RulesEngine for VarnaVyuha {
    type State = VarnaState;
    type Move = Cell;

    fn initial_state(&self, rng: &mut GameRng) -> VarnaState {
        let grid = Self::random_grid(rng);
        let mut target = Self::random_grid(rng);
        while target == grid {
            target = Self::random_grid(rng);
        }
        VarnaState::new(grid, target)
    }

    fn side_to_move(&self, _state: &VarnaState) -> Side {
        Side::First
    }

    fn legal_moves(&self, state: &VarnaState) -> Vec<Cell> {
        if state.solved {
            return Vec::new();
        }
        state.grid.cells().collect()
    }

    fn apply_move(&self, state: &mut VarnaState, cell: &Cell) -> Outcome {
        if state.solved {
            return Outcome::Invalid(Rejection::Finished);
        }
        let stamp = state.grid.plus_stamp(*cell);
        if stamp.is_empty() {
            return Outcome::Invalid(Rejection::OutOfBounds);
        }

        for c in stamp {
            if let Some(colour) = state.grid.get_mut(c) {
                *colour = colour.next();
            }
        }
        state.moves += 1;

        if state.grid == state.target {
            state.solved = true;
            state.score += self.scoring.win_points;
            tracing::info!(moves = state.moves, "varna vyuha solved");
            return Outcome::GameOver(GameResult::Winner(Side::First));
        }
        Outcome::Continues
    }

    fn is_terminal(&self, state: &VarnaState) -> Option<GameResult> {
        state.solved.then_some(GameResult::Winner(Side::First))
    }

    /// Tiles the click brings into agreement with the target, minus those it breaks.
    fn score_move(&self, state: &VarnaState, cell: &Cell) -> i32 {
        state
            .grid
            .plus_stamp(*cell)
            .into_iter()
            .filter_map(|c| Some((*state.grid.get(c)?, *state.target.get(c)?)))
            .map(|(current, wanted)| match (current == wanted, current.next() == wanted) {
                (_, true) => 1,
                (true, _) => -1,
                _ => 0,
            })
            .sum()
    }
}
