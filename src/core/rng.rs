//! Deterministic random number generation for dice, layouts and AI tie-breaks.
//!
//! Every random draw in the crate goes through [`GameRng`], so a seed fixes
//! a whole game: dice rolls, Chakravyuha guard layouts, Varna Vyuha deals and
//! the computer's choice between equally good moves.
//!
//! ```
//! use kreeda::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_die(), b.roll_die());
//!
//! // Each restart draws from its own reproducible stream
//! let next_game = a.fork();
//! assert_ne!(next_game.seed(), a.seed());
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment spreading fork seeds apart.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the stream for the next game.
    ///
    /// The n-th fork of a given seed is always the same stream, and it does
    /// not consume draws from `self`.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// A fair six-sided die.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// True with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
