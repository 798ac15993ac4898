//! Polar arena geometry: rings, sectors and patrolling enemies.

use serde::{Deserialize, Serialize};

/// Rings are numbered from the centre (0) outwards.
pub const RINGS: u8 = 7;
pub const SECTORS: u8 = 12;
pub const OUTER_RING: u8 = RINGS - 1;

/// Rings enemies may patrol.
pub const ENEMY_RINGS: std::ops::RangeInclusive<u8> = 1..=5;

/// Player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Inward,
    Outward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Inward,
        Direction::Outward,
        Direction::Left,
        Direction::Right,
    ];
}

/// A cell of the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub ring: u8,
    pub sector: u8,
}

impl Position {
    /// Builds a position, clamping the ring and wrapping the sector.
    #[must_use]
    pub fn new(ring: u8, sector: u8) -> Self {
        Self {
            ring: ring.min(OUTER_RING),
            sector: sector % SECTORS,
        }
    }

    /// Where the player starts each level.
    #[must_use]
    pub fn start() -> Self {
        Self::new(OUTER_RING, 0)
    }

    #[must_use]
    pub fn is_center(&self) -> bool {
        self.ring == 0
    }

    /// One step in `direction`. Rings clamp at the edges, sectors wrap.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Inward => Self { ring: self.ring.saturating_sub(1), ..self },
            Direction::Outward => Self { ring: (self.ring + 1).min(OUTER_RING), ..self },
            Direction::Left => self.rotate(-1),
            Direction::Right => self.rotate(1),
        }
    }

    /// Move around the ring by `delta` sectors.
    #[must_use]
    pub fn rotate(self, delta: i8) -> Self {
        let sector = (i16::from(self.sector) + i16::from(delta)).rem_euclid(i16::from(SECTORS));
        Self {
            sector: sector as u8,
            ..self
        }
    }
}

/// A guard patrolling one ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Position,
    /// +1 or -1 sectors per advance.
    pub direction: i8,
    /// Ticks between advances.
    pub speed: u32,
    cooldown: u32,
}

impl Enemy {
    #[must_use]
    pub fn new(position: Position, direction: i8, speed: u32) -> Self {
        let speed = speed.max(1);
        Self {
            position,
            direction: direction.signum(),
            speed,
            cooldown: speed,
        }
    }

    /// Count one tick down; advance when the cooldown runs out.
    ///
    /// Returns whether the enemy moved.
    pub fn tick(&mut self) -> bool {
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 {
            return false;
        }
        self.cooldown = self.speed;
        self.position = self.position.rotate(self.direction);
        true
    }
}
