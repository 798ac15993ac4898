//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! Every game in this crate is played by at most two sides. Games give the
//! sides their own meaning (White/Black, Goats/Tigers, Human/Computer) but
//! the engine only ever sees `Side::First` and `Side::Second`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
///
/// `First` always moves first in a fresh game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// 0-based index (`First` = 0).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Both sides in turn order.
    ///
    /// ```
    /// use kreeda::core::Side;
    ///
    /// let sides: Vec<_> = Side::all().collect();
    /// assert_eq!(sides, vec![Side::First, Side::Second]);
    /// ```
    pub fn all() -> impl Iterator<Item = Side> {
        [Side::First, Side::Second].into_iter()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "First"),
            Side::Second => write!(f, "Second"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use kreeda::core::{Side, SideMap};
///
/// let mut stores: SideMap<u32> = SideMap::with_value(0);
/// stores[Side::Second] += 6;
///
/// assert_eq!(stores[Side::First], 0);
/// assert_eq!(stores[Side::Second], 6);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::First), factory(Side::Second)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::all().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::First.index(), 0);
        assert_eq!(Side::Second.index(), 1);
        assert_eq!(Side::First.opponent(), Side::Second);
        assert_eq!(Side::Second.opponent(), Side::First);
        assert_eq!(format!("{}", Side::Second), "Second");
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::First], 0);
        assert_eq!(map[Side::Second], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);

        map[Side::First] = 3;
        *map.get_mut(Side::Second) += 4;

        assert_eq!(map[Side::First], 3);
        assert_eq!(map[Side::Second], 4);
    }

    #[test]
    fn test_side_map_iter() {
        let map: SideMap<i32> = SideMap::new(|s| s.index() as i32 + 1);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::First, &1), (Side::Second, &2)]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map: SideMap<u32> = SideMap::new(|s| s.index() as u32 + 7);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
