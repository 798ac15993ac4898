//! # kreeda
//!
//! Rule engines for six traditional Indian games, with a thin session layer
//! for driving them from a UI.
//!
//! ## Design Principles
//!
//! 1. **Engines are pure**: every game is a [`RulesEngine`] over a plain,
//!    cloneable state. A refused move comes back as
//!    [`Outcome::Invalid`] and leaves the state untouched.
//!
//! 2. **No wall clock in the rules**: dice tumbles, seed-by-seed sowing,
//!    computer pauses and guard patrols are steps on an
//!    [`AnimationDriver`](driver::AnimationDriver), advanced by the host.
//!
//! 3. **Bad data fails at load time**: board graphs and teleport tables are
//!    validated when built and rejected with a [`BoardError`].
//!
//! ## Modules
//!
//! - `core`: sides, RNG, errors, configuration
//! - `board`: grids and validated point-and-line graphs
//! - `rules`: the `RulesEngine` trait and move outcomes
//! - `policy`: computer move choice (`GreedyCapture`, `RandomLegal`)
//! - `games`: Chaturanga, Pallanguzhi, Moksha Patam, Chakravyuha,
//!   Varna Vyuha, Aadu Puli Aattam
//! - `driver`: generation-guarded timed steps
//! - `session`: per-game controllers, player identity, score reporting
//!
//! ## Example
//!
//! ```
//! use kreeda::games::moksha_patam::{MokshaPatam, MokshaState};
//! use kreeda::{Outcome, RulesEngine, Side};
//!
//! let engine = MokshaPatam::default();
//! let mut state = MokshaState::default();
//!
//! // A 3 from square 1 lands on the ladder at 4
//! assert_eq!(engine.apply_move(&mut state, &3), Outcome::Continues);
//! assert_eq!(state.position(Side::First), 14);
//! ```

pub mod board;
pub mod core;
pub mod driver;
pub mod games;
pub mod policy;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BoardError, ConfigError, EngineConfig, GameRng, ScoringConfig, Side, SideMap, SowingConfig,
    TimingConfig,
};

pub use crate::board::{BoardGraph, Cell, Grid, JumpTriple, NodeId};

pub use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

pub use crate::policy::{GreedyCapture, MovePolicy, RandomLegal, Strategy};

pub use crate::driver::{AnimationDriver, Generation, Ticket};

pub use crate::session::{
    ChakravyuhaSession, MokshaSession, NoopReporter, PallanguzhiSession, PlayerIdentity,
    RecordingReporter, ReportError, ScoreDispatch, ScoreReporter, TurnSession,
};
