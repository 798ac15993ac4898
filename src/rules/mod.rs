//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - The starting position
//! - Legal moves for each game state
//! - How moves modify state
//! - Win/loss conditions
//!
//! Sessions and AI policies call into `RulesEngine` but never interpret
//! game-specific concepts directly.

pub mod engine;
pub mod outcome;

pub use engine::RulesEngine;
pub use outcome::{GameResult, Outcome, Rejection};
