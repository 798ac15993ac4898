//! One sowing, advanced a seed at a time.
//!
//! A `Sowing` owns the seeds in hand. Each [`Sowing::step`] either drops one
//! seed, picks up a relay, or resolves the end of the sowing. The atomic
//! engine move simply steps until done; an animated session steps once per
//! clock tick.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SideMap};

pub const HOLE_COUNT: usize = 14;
pub const HOLES_PER_SIDE: usize = HOLE_COUNT / 2;

pub type Holes = [u32; HOLE_COUNT];

/// The hole across the board from `hole`.
#[must_use]
pub const fn opposite(hole: usize) -> usize {
    HOLE_COUNT - 1 - hole
}

/// The side that owns `hole`.
#[must_use]
pub const fn owner(hole: usize) -> Side {
    if hole < HOLES_PER_SIDE {
        Side::First
    } else {
        Side::Second
    }
}

/// Hole indices belonging to `side`.
pub fn side_holes(side: Side) -> std::ops::Range<usize> {
    match side {
        Side::First => 0..HOLES_PER_SIDE,
        Side::Second => HOLES_PER_SIDE..HOLE_COUNT,
    }
}

/// What a single step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SowStep {
    /// One seed dropped into `hole`.
    Deposit { hole: usize },
    /// Last seed landed on a non-empty hole; its `seeds` are picked up.
    Relay { hole: usize, seeds: u32 },
    /// Last seed landed in an empty hole facing seeds; `seeds` went to the store.
    Capture { hole: usize, opposite: usize, seeds: u32 },
    /// Sowing ended with nothing to capture.
    Finished,
}

impl SowStep {
    /// True for the step that ends a sowing.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, SowStep::Capture { .. } | SowStep::Finished)
    }
}

/// An in-flight sowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sowing {
    side: Side,
    position: usize,
    in_hand: u32,
    relays: u32,
    max_relays: u32,
}

impl Sowing {
    /// Pick up every seed in `hole` and start sowing from the next hole.
    pub fn begin(holes: &mut Holes, hole: usize, side: Side, max_relays: u32) -> Self {
        let in_hand = std::mem::take(&mut holes[hole]);
        Self {
            side,
            position: hole,
            in_hand,
            relays: 0,
            max_relays,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn in_hand(&self) -> u32 {
        self.in_hand
    }

    /// Hole the last seed went into (or the starting hole before any drop).
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance by one step.
    pub fn step(&mut self, holes: &mut Holes, stores: &mut SideMap<u32>) -> SowStep {
        if self.in_hand > 0 {
            self.position = (self.position + 1) % HOLE_COUNT;
            holes[self.position] += 1;
            self.in_hand -= 1;
            return SowStep::Deposit { hole: self.position };
        }

        let end = self.position;
        if holes[end] > 1 {
            if self.relays >= self.max_relays {
                tracing::warn!(
                    hole = end,
                    relays = self.relays,
                    "relay limit reached, ending sowing"
                );
                return SowStep::Finished;
            }
            let seeds = std::mem::take(&mut holes[end]);
            self.in_hand = seeds;
            self.relays += 1;
            return SowStep::Relay { hole: end, seeds };
        }

        let across = opposite(end);
        if holes[across] == 0 {
            return SowStep::Finished;
        }
        let seeds = std::mem::take(&mut holes[across]) + std::mem::take(&mut holes[end]);
        stores[self.side] += seeds;
        SowStep::Capture {
            hole: end,
            opposite: across,
            seeds,
        }
    }
}
