//! Aadu Puli Aattam: tigers hunt goats on a line board.
//!
//! ## Phases
//!
//! - Placement: goats enter one at a time on empty points while the tigers wait
//! - Movement: tigers step or jump a goat along a line; goats only step
//!
//! Tigers win on the fifth capture. Goats win when the tigers cannot move.
//! The board is checked when the engine is built, so a broken adjacency or
//! jump table is refused up front.

mod board;
mod game;

pub use board::{standard_board, LINES, NODE_COUNT, TIGER_START};
pub use game::{
    AaduPuli, Animal, HuntMove, HuntState, Phase, CAPTURES_TO_WIN, GOATS, GOAT_COUNT, JUMP_SCORE,
    TIGERS,
};
