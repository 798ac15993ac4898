//! Engine configuration.
//!
//! Sessions read their timing, scoring and per-game knobs from an
//! `EngineConfig`. Every field has a default, so a JSON document only needs
//! to name what it overrides:
//!
//! ```
//! use kreeda::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "timing": { "ai_delay_ms": 250 } }"#).unwrap();
//! assert_eq!(config.timing.ai_delay_ms, 250);
//! assert_eq!(config.scoring.win_points, 1000);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Delays for timed sequences, in milliseconds of the session clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pause before the computer side moves.
    pub ai_delay_ms: u64,

    /// Duration of the dice-roll animation before the roll resolves.
    pub dice_roll_ms: u64,

    /// Interval between individual seeds while sowing.
    pub sow_step_ms: u64,

    /// Enemy patrol interval on level 1.
    pub enemy_tick_base_ms: u64,

    /// Interval reduction per level above 1.
    pub enemy_tick_step_ms: u64,

    /// Fastest allowed patrol interval.
    pub enemy_tick_min_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ai_delay_ms: 800,
            dice_roll_ms: 600,
            sow_step_ms: 300,
            enemy_tick_base_ms: 1000,
            enemy_tick_step_ms: 100,
            enemy_tick_min_ms: 250,
        }
    }
}

impl TimingConfig {
    /// Patrol interval for a Chakravyuha level (levels start at 1).
    #[must_use]
    pub fn enemy_tick_ms(&self, level: u32) -> u64 {
        let reduction = self
            .enemy_tick_step_ms
            .saturating_mul(u64::from(level.saturating_sub(1)));
        self.enemy_tick_base_ms
            .saturating_sub(reduction)
            .max(self.enemy_tick_min_ms)
    }
}

/// Points awarded on a win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Flat award for winning a game.
    pub win_points: u64,

    /// Chakravyuha awards `win_points × level` when enabled.
    pub scale_by_level: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_points: 1000,
            scale_by_level: true,
        }
    }
}

/// Pallanguzhi setup knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SowingConfig {
    /// Seeds placed in every hole at the start.
    pub seeds_per_hole: u32,

    /// Relay pickups allowed in one sowing before it is cut short.
    pub max_relays: u32,
}

impl Default for SowingConfig {
    fn default() -> Self {
        Self {
            seeds_per_hole: 5,
            max_relays: 200,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub sowing: SowingConfig,

    /// Seed for the session RNG.
    pub seed: u64,
}

impl EngineConfig {
    /// Parse a configuration from JSON, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no engine can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sowing.seeds_per_hole == 0 {
            return Err(ConfigError::Invalid("seeds_per_hole must be positive".into()));
        }
        if self.timing.enemy_tick_min_ms == 0 {
            return Err(ConfigError::Invalid("enemy_tick_min_ms must be positive".into()));
        }
        Ok(())
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the computer move delay.
    #[must_use]
    pub fn with_ai_delay(mut self, ms: u64) -> Self {
        self.timing.ai_delay_ms = ms;
        self
    }

    /// Set the flat win award.
    #[must_use]
    pub fn with_win_points(mut self, points: u64) -> Self {
        self.scoring.win_points = points;
        self
    }

    /// Set Pallanguzhi's starting seeds per hole.
    #[must_use]
    pub fn with_seeds_per_hole(mut self, seeds: u32) -> Self {
        self.sowing.seeds_per_hole = seeds;
        self
    }
}
