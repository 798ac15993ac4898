//! Snakes and ladders teleport table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::BoardError;

pub const FIRST_SQUARE: u8 = 1;
pub const LAST_SQUARE: u8 = 100;

/// Ladders as `(bottom, top)`.
pub const LADDERS: &[(u8, u8)] = &[
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (80, 100),
];

/// Snakes as `(head, tail)`.
pub const SNAKES: &[(u8, u8)] = &[
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeleportKind {
    Ladder,
    Snake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teleport {
    pub to: u8,
    pub kind: TeleportKind,
}

/// Validated map from ladder bottoms and snake heads to where they lead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeleportTable {
    entries: FxHashMap<u8, Teleport>,
}

impl Default for TeleportTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TeleportTable {
    /// Build a table, rejecting anything a token could not sensibly follow.
    ///
    /// Squares must lie in `2..=99` (sources) and `1..=100` (destinations),
    /// ladders must climb, snakes must fall, no square may be both a ladder
    /// bottom and a snake head, and no destination may itself teleport.
    pub fn new(ladders: &[(u8, u8)], snakes: &[(u8, u8)]) -> Result<Self, BoardError> {
        let mut entries = FxHashMap::default();

        let tagged = ladders
            .iter()
            .map(|&(from, to)| (from, to, TeleportKind::Ladder))
            .chain(snakes.iter().map(|&(from, to)| (from, to, TeleportKind::Snake)));

        for (from, to, kind) in tagged {
            let invalid = |reason| BoardError::InvalidTeleport { from, to, reason };

            if !(FIRST_SQUARE + 1..LAST_SQUARE).contains(&from) {
                return Err(invalid("source must lie strictly between the first and last square"));
            }
            if !(FIRST_SQUARE..=LAST_SQUARE).contains(&to) {
                return Err(invalid("destination is off the board"));
            }
            match kind {
                TeleportKind::Ladder if to <= from => return Err(invalid("ladder must lead up")),
                TeleportKind::Snake if to >= from => return Err(invalid("snake must lead down")),
                _ => {}
            }
            if entries.insert(from, Teleport { to, kind }).is_some() {
                return Err(invalid("square already starts a ladder or snake"));
            }
        }

        for (&from, teleport) in &entries {
            if entries.contains_key(&teleport.to) {
                return Err(BoardError::InvalidTeleport {
                    from,
                    to: teleport.to,
                    reason: "destination starts another ladder or snake",
                });
            }
        }

        Ok(Self { entries })
    }

    /// The fixed board used by default.
    #[must_use]
    pub fn standard() -> Self {
        let entries = LADDERS
            .iter()
            .map(|&(from, to)| (from, Teleport { to, kind: TeleportKind::Ladder }))
            .chain(
                SNAKES
                    .iter()
                    .map(|&(from, to)| (from, Teleport { to, kind: TeleportKind::Snake })),
            )
            .collect();
        Self { entries }
    }

    /// Where a token landing on `square` ends up, if it moves at all.
    #[must_use]
    pub fn get(&self, square: u8) -> Option<Teleport> {
        self.entries.get(&square).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
