//! Core engine types: sides, RNG, errors, configuration.
//!
//! Everything here is game-agnostic. Games build on these types rather than
//! extending them.

pub mod side;
pub mod rng;
pub mod error;
pub mod config;

pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use error::{BoardError, ConfigError};
pub use config::{EngineConfig, ScoringConfig, SowingConfig, TimingConfig};
