//! Pallanguzhi: fourteen-hole sowing game.
//!
//! ## Rules
//!
//! - Each side owns seven holes; sowing runs counter-clockwise around all 14
//! - A last seed landing on a non-empty hole relays its contents onward
//! - A last seed landing in an empty hole captures the opposite hole plus itself
//! - The game ends when either side's holes are all empty
//!
//! Sowing can be run atomically through
//! [`RulesEngine::apply_move`](crate::rules::RulesEngine::apply_move) or a step
//! at a time through [`Pallanguzhi::start_sowing`] and [`Pallanguzhi::advance`].

mod game;
mod sowing;

pub use game::{Pallanguzhi, PallanguzhiState};
pub use sowing::{opposite, owner, side_holes, Holes, SowStep, Sowing, HOLES_PER_SIDE, HOLE_COUNT};
