//! Timed sequences driven by an external clock.
//!
//! Dice rolls, seed-by-seed sowing, computer "thinking" pauses and enemy
//! patrols are all a series of delayed steps. Rather than chaining timers,
//! sessions queue steps on an [`AnimationDriver`] and the host feeds it the
//! current time. Rules never see wall-clock time.
//!
//! ## Generations
//!
//! Every step is stamped with the driver's [`Generation`]. Restarting a game
//! calls [`AnimationDriver::reset`], which moves to a new generation; steps
//! queued before the reset are dropped when they come due instead of
//! mutating the new game.
//!
//! ```
//! use kreeda::driver::AnimationDriver;
//!
//! let mut driver = AnimationDriver::new();
//! driver.schedule(100, "old");
//! driver.reset();
//! driver.schedule(50, "new");
//!
//! assert_eq!(driver.advance_to(200), vec!["new"]);
//! ```

mod animation;

pub use animation::{AnimationDriver, Ticket};

use serde::{Deserialize, Serialize};

/// Identifies one game instance within a driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u32);

impl Generation {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen{}", self.0)
    }
}
