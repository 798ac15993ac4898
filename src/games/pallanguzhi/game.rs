//! Pallanguzhi rules.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Side, SideMap, SowingConfig};
use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

use super::sowing::{owner, side_holes, Holes, SowStep, Sowing, HOLE_COUNT};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PallanguzhiState {
    pub holes: Holes,
    pub stores: SideMap<u32>,
    pub side_to_move: Side,
    pub result: Option<GameResult>,
    /// The sowing currently being animated, if any.
    pub sowing: Option<Sowing>,
}

impl PallanguzhiState {
    /// Every hole filled with `seeds_per_hole`, `Side::First` to move.
    #[must_use]
    pub fn new(seeds_per_hole: u32) -> Self {
        Self::from_holes([seeds_per_hole; HOLE_COUNT], Side::First)
    }

    /// An arbitrary position with empty stores.
    #[must_use]
    pub fn from_holes(holes: Holes, side_to_move: Side) -> Self {
        Self {
            holes,
            stores: SideMap::with_value(0),
            side_to_move,
            result: None,
            sowing: None,
        }
    }

    /// Seeds on the board plus both stores plus any seeds in hand.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        let in_hand = self.sowing.map_or(0, |s| s.in_hand());
        let stored = self.stores[Side::First] + self.stores[Side::Second];
        self.holes.iter().sum::<u32>() + stored + in_hand
    }

    /// Seeds remaining in `side`'s holes.
    #[must_use]
    pub fn side_seeds(&self, side: Side) -> u32 {
        self.holes[side_holes(side)].iter().sum()
    }

    #[must_use]
    pub fn is_sowing(&self) -> bool {
        self.sowing.is_some()
    }
}

/// Pallanguzhi rule book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pallanguzhi {
    seeds_per_hole: u32,
    max_relays: u32,
}

impl Default for Pallanguzhi {
    fn default() -> Self {
        Self::new(&SowingConfig::default())
    }
}

impl Pallanguzhi {
    #[must_use]
    pub fn new(config: &SowingConfig) -> Self {
        Self {
            seeds_per_hole: config.seeds_per_hole,
            max_relays: config.max_relays,
        }
    }

    /// Pick up a hole and start an animated sowing.
    ///
    /// Refused while another sowing is in flight.
    pub fn start_sowing(&self, state: &mut PallanguzhiState, hole: usize) -> Outcome {
        if state.result.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        if state.sowing.is_some() {
            return Outcome::Invalid(Rejection::Busy);
        }
        if hole >= HOLE_COUNT {
            return Outcome::Invalid(Rejection::OutOfBounds);
        }
        if owner(hole) != state.side_to_move {
            return Outcome::Invalid(Rejection::NotYourTurn);
        }
        if state.holes[hole] == 0 {
            return Outcome::Invalid(Rejection::EmptyHole);
        }

        tracing::debug!(side = %state.side_to_move, hole, seeds = state.holes[hole], "sowing");
        let sowing = Sowing::begin(&mut state.holes, hole, state.side_to_move, self.max_relays);
        state.sowing = Some(sowing);
        Outcome::Continues
    }

    /// Advance the in-flight sowing by one step.
    ///
    /// The final step hands the turn over and settles the game if a side has
    /// run dry. Returns `None` when nothing is being sown.
    pub fn advance(&self, state: &mut PallanguzhiState) -> Option<SowStep> {
        let mut sowing = state.sowing?;
        let step = sowing.step(&mut state.holes, &mut state.stores);

        if let SowStep::Capture { hole, opposite, seeds } = step {
            tracing::debug!(side = %sowing.side(), hole, opposite, seeds, "seeds captured");
        }

        if step.is_final() {
            state.sowing = None;
            self.end_turn(state);
        } else {
            state.sowing = Some(sowing);
        }
        Some(step)
    }

    fn end_turn(&self, state: &mut PallanguzhiState) {
        state.side_to_move = state.side_to_move.opponent();

        let exhausted = Side::all().any(|side| state.side_seeds(side) == 0);
        if !exhausted {
            return;
        }

        for side in Side::all() {
            let remaining: u32 = side_holes(side)
                .map(|h| std::mem::take(&mut state.holes[h]))
                .sum();
            state.stores[side] += remaining;
        }

        let (first, second) = (state.stores[Side::First], state.stores[Side::Second]);
        let result = match first.cmp(&second) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::First),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Second),
            std::cmp::Ordering::Equal => GameResult::Draw,
        };
        tracing::info!(first, second, ?result, "pallanguzhi finished");
        state.result = Some(result);
    }
}

impl RulesEngine for Pallanguzhi {
    type State = PallanguzhiState;
    type Move = usize;

    fn initial_state(&self, _rng: &mut GameRng) -> PallanguzhiState {
        PallanguzhiState::new(self.seeds_per_hole)
    }

    fn side_to_move(&self, state: &PallanguzhiState) -> Side {
        state.side_to_move
    }

    fn legal_moves(&self, state: &PallanguzhiState) -> Vec<usize> {
        if state.result.is_some() || state.sowing.is_some() {
            return Vec::new();
        }
        side_holes(state.side_to_move)
            .filter(|&h| state.holes[h] > 0)
            .collect()
    }

    /// Sow `hole` to completion in one call.
    fn apply_move(&self, state: &mut PallanguzhiState, hole: &usize) -> Outcome {
        let outcome = self.start_sowing(state, *hole);
        if !outcome.is_applied() {
            return outcome;
        }
        while self.advance(state).is_some() {}

        match state.result {
            Some(result) => Outcome::GameOver(result),
            None => Outcome::Continues,
        }
    }

    fn is_terminal(&self, state: &PallanguzhiState) -> Option<GameResult> {
        state.result
    }

    /// Seeds the move adds to the mover's store.
    fn score_move(&self, state: &PallanguzhiState, hole: &usize) -> i32 {
        let mover = state.side_to_move;
        let (next, outcome) = self.apply(state, hole);
        if !outcome.is_applied() {
            return i32::MIN;
        }
        (next.stores[mover] - state.stores[mover]) as i32
    }
}
