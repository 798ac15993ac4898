//! Moksha Patam: snakes and ladders for two players.
//!
//! Tokens start on square 1 and race to exactly 100. A roll that would pass
//! 100 is forfeited. Ladder bottoms and snake heads come from a
//! [`TeleportTable`], validated when it is built.

mod board;
mod game;

pub use board::{Teleport, TeleportKind, TeleportTable, FIRST_SQUARE, LADDERS, LAST_SQUARE, SNAKES};
pub use game::{MokshaPatam, MokshaState, MoveKind, MoveRecord};
