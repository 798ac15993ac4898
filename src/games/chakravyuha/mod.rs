//! Chakravyuha: a ring-and-sector labyrinth.
//!
//! The player starts on the outer ring and steps inward to the centre while
//! guards patrol rings 1 to 5. Guards advance on [`Chakravyuha::tick`], which
//! a session drives from its clock; each level fields more and faster guards.

mod arena;
mod game;

pub use arena::{Direction, Enemy, Position, ENEMY_RINGS, OUTER_RING, RINGS, SECTORS};
pub use game::{enemy_count, enemy_speed, Chakravyuha, ChakravyuhaState, MAX_ENEMIES};
