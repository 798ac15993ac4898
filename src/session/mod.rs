//! Sessions: rule engines wired to a clock and a score reporter.
//!
//! A session owns one game's state, an [`AnimationDriver`](crate::driver::AnimationDriver)
//! for its timed steps and a [`ScoreDispatch`]. The host calls the session's
//! input methods from UI events and `tick(now_ms)` from its frame or timer
//! loop; everything else happens inside.
//!
//! - [`TurnSession`]: any turn-based engine, optional computer opponent
//! - [`MokshaSession`]: dice rolls with a tumble animation
//! - [`PallanguzhiSession`]: sowing one seed per step
//! - [`ChakravyuhaSession`]: timed guard patrols and level progression

mod chakravyuha;
mod moksha;
mod pallanguzhi;
mod report;
mod turn;

pub use chakravyuha::{ChakravyuhaSession, PatrolTick};
pub use moksha::{DiceStep, MokshaSession};
pub use pallanguzhi::{PallanguzhiSession, SowingStep};
pub use report::{
    Dispatch, NoopReporter, PlayerIdentity, RecordingReporter, ReportError, ScoreDispatch,
    ScoreReporter,
};
pub use turn::{Opponent, TurnSession, TurnStep};
