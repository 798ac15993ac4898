//! Chakravyuha rules: reach the centre without meeting a guard.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, ScoringConfig, Side};
use crate::rules::{GameResult, Outcome, Rejection, RulesEngine};

use super::arena::{Direction, Enemy, Position, ENEMY_RINGS, SECTORS};

/// Most guards a level can field.
pub const MAX_ENEMIES: usize = 8;

/// Guards on a level.
#[must_use]
pub fn enemy_count(level: u32) -> usize {
    (2 + level as usize).min(MAX_ENEMIES)
}

/// Ticks between guard advances on a level.
#[must_use]
pub fn enemy_speed(level: u32) -> u32 {
    if level <= 1 {
        2
    } else {
        1
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChakravyuhaState {
    pub player: Position,
    pub enemies: Vec<Enemy>,
    /// Starts at 1.
    pub level: u32,
    /// Points banked across cleared levels.
    pub score: u64,
    pub result: Option<GameResult>,
    /// Enemy ticks elapsed on this level.
    pub ticks: u64,
}

impl ChakravyuhaState {
    /// A level with the given guards and the player at the start.
    #[must_use]
    pub fn with_enemies(level: u32, enemies: Vec<Enemy>) -> Self {
        Self {
            player: Position::start(),
            enemies,
            level: level.max(1),
            score: 0,
            result: None,
            ticks: 0,
        }
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        matches!(self.result, Some(GameResult::Winner(_)))
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.result == Some(GameResult::Defeat)
    }

    fn collides(&self) -> bool {
        self.enemies.iter().any(|e| e.position == self.player)
    }
}

/// Chakravyuha rule book. Single player: the player is always `Side::First`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chakravyuha {
    scoring: ScoringConfig,
}

impl Chakravyuha {
    #[must_use]
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    /// Points awarded for clearing `level`.
    #[must_use]
    pub fn points_for(&self, level: u32) -> u64 {
        if self.scoring.scale_by_level {
            self.scoring.win_points * u64::from(level.max(1))
        } else {
            self.scoring.win_points
        }
    }

    /// Lay out a fresh level with guards on distinct cells of rings 1..=5.
    #[must_use]
    pub fn new_level(&self, level: u32, rng: &mut GameRng) -> ChakravyuhaState {
        let level = level.max(1);
        let start = Position::start();

        let mut cells: Vec<Position> = ENEMY_RINGS
            .flat_map(|ring| (0..SECTORS).map(move |sector| Position::new(ring, sector)))
            .filter(|&p| p != start)
            .collect();
        rng.shuffle(&mut cells);

        let speed = enemy_speed(level);
        let enemies = cells
            .into_iter()
            .take(enemy_count(level))
            .map(|position| {
                let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
                Enemy::new(position, direction, speed)
            })
            .collect();

        tracing::debug!(level, "chakravyuha level laid out");
        ChakravyuhaState::with_enemies(level, enemies)
    }

    /// The following level after a win, keeping the banked score.
    #[must_use]
    pub fn next_level(&self, state: &ChakravyuhaState, rng: &mut GameRng) -> ChakravyuhaState {
        let level = if state.is_won() { state.level + 1 } else { state.level };
        let mut next = self.new_level(level, rng);
        next.score = state.score;
        next
    }

    /// Advance every guard by one patrol tick.
    pub fn tick(&self, state: &mut ChakravyuhaState) -> Outcome {
        if state.result.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        state.ticks += 1;
        for enemy in &mut state.enemies {
            enemy.tick();
        }
        self.settle(state)
    }

    fn settle(&self, state: &mut ChakravyuhaState) -> Outcome {
        if state.collides() {
            tracing::info!(
                level = state.level,
                ring = state.player.ring,
                sector = state.player.sector,
                "caught"
            );
            state.result = Some(GameResult::Defeat);
            return Outcome::GameOver(GameResult::Defeat);
        }
        if state.player.is_center() {
            let points = self.points_for(state.level);
            state.score += points;
            tracing::info!(level = state.level, points, "reached the centre");
            let result = GameResult::Winner(Side::First);
            state.result = Some(result);
            return Outcome::GameOver(result);
        }
        Outcome::Continues
    }
}

impl RulesEngine for Chakravyuha {
    type State = ChakravyuhaState;
    type Move = Direction;

    fn initial_state(&self, rng: &mut GameRng) -> ChakravyuhaState {
        self.new_level(1, rng)
    }

    fn side_to_move(&self, _state: &ChakravyuhaState) -> Side {
        Side::First
    }

    fn legal_moves(&self, state: &ChakravyuhaState) -> Vec<Direction> {
        if state.result.is_some() {
            return Vec::new();
        }
        Direction::ALL.to_vec()
    }

    fn apply_move(&self, state: &mut ChakravyuhaState, direction: &Direction) -> Outcome {
        if state.result.is_some() {
            return Outcome::Invalid(Rejection::Finished);
        }
        state.player = state.player.step(*direction);
        self.settle(state)
    }

    fn is_terminal(&self, state: &ChakravyuhaState) -> Option<GameResult> {
        state.result
    }
}
