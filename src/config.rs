//! Configuration constants and the validated per-match configuration.

use crate::error::ConfigError;

// Grid
pub const GRID_WIDTH_CELLS: u32 = 40; // 800px at the default cell size
pub const GRID_HEIGHT_CELLS: u32 = 30; // 600px at the default cell size
pub const CELL_SIZE: u32 = 20; // Pixels per cell edge
pub const MAX_GRID_CELLS: u64 = 250_000; // Upper bound on width * height

// Movement
pub const BASE_MOVE_INTERVAL: f64 = 0.1; // Seconds between steps at 1.0x speed
pub const BOT_DECISION_INTERVAL: f64 = 0.1; // Minimum seconds between bot path searches

// Match length presets (seconds)
pub const MATCH_SHORT: f64 = 60.0;
pub const MATCH_MEDIUM: f64 = 120.0;
pub const MATCH_LONG: f64 = 180.0;

// Speed power-up
pub const SPEED_SPAWN_AFTER: f64 = 10.0; // Elapsed match time before the first spawn
pub const SPEED_EFFECT_DURATION: f64 = 5.0;
pub const SPEED_MULTIPLIER: f64 = 1.3;
pub const SPEED_FOOTPRINT: i32 = 3; // Footprint edge in cells

// Freeze power-up
pub const FREEZE_SPAWN_AFTER: f64 = 15.0;
pub const FREEZE_COOLDOWN: f64 = 10.0; // Seconds after a pickup before the next spawn
pub const FREEZE_DURATION: f64 = 3.0; // How long the opponent stays frozen
pub const FREEZE_FOOTPRINT: i32 = 2;

// Power-ups spawn on this cell pitch
pub const POWERUP_SPAWN_PITCH: i32 = 3;

// Presentation
pub const WINDOW_WIDTH: i32 = GRID_WIDTH_CELLS as i32 * CELL_SIZE as i32;
pub const WINDOW_HEIGHT: i32 = GRID_HEIGHT_CELLS as i32 * CELL_SIZE as i32;
pub const PREPARATION_SECONDS: f64 = 10.0;
pub const MUSIC_VOLUME: f32 = 0.5;
pub const EFFECT_VOLUME: f32 = 0.7;

/// Everything a `MatchLoop` needs at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: u32,
    pub base_move_interval: f64,
    pub duration_secs: f64,
    /// Player 2 is driven by the pathfinder instead of the keyboard.
    pub bot_enabled: bool,
    pub bot_decision_interval: f64,
    /// Fixed RNG seed for reproducible matches; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            grid_width: GRID_WIDTH_CELLS,
            grid_height: GRID_HEIGHT_CELLS,
            cell_size: CELL_SIZE,
            base_move_interval: BASE_MOVE_INTERVAL,
            duration_secs: MATCH_SHORT,
            bot_enabled: true,
            bot_decision_interval: BOT_DECISION_INTERVAL,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn with_duration(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_bot(mut self, bot_enabled: bool) -> Self {
        self.bot_enabled = bot_enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 1 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let cells = u64::from(self.grid_width) * u64::from(self.grid_height);
        if cells > MAX_GRID_CELLS {
            return Err(ConfigError::TooManyCells {
                cells,
                max: MAX_GRID_CELLS,
            });
        }
        let fits = |cells: u32| {
            cells
                .checked_mul(self.cell_size)
                .is_some_and(|px| px <= i32::MAX as u32)
        };
        if !fits(self.grid_width) || !fits(self.grid_height) {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                cell_size: self.cell_size,
            });
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(ConfigError::NonPositiveDuration(self.duration_secs));
        }
        if !(self.base_move_interval.is_finite() && self.base_move_interval > 0.0) {
            return Err(ConfigError::NonPositiveMoveInterval(self.base_move_interval));
        }
        if !(self.bot_decision_interval.is_finite() && self.bot_decision_interval > 0.0) {
            return Err(ConfigError::NonPositiveDecisionInterval(
                self.bot_decision_interval,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_width * config.cell_size, 800);
        assert_eq!(config.grid_height * config.cell_size, 600);
    }

    #[test]
    fn test_rejects_bad_grid() {
        let config = MatchConfig::default().with_grid(0, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 0,
                height: 10
            })
        );
        let config = MatchConfig::default().with_grid(10, 0);
        assert!(config.validate().is_err());

        let config = MatchConfig {
            cell_size: 0,
            ..MatchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));

        let config = MatchConfig {
            cell_size: u32::MAX,
            ..MatchConfig::default()
        }
        .with_grid(10, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let config = MatchConfig {
            cell_size: 1,
            ..MatchConfig::default()
        }
        .with_grid(6000, 6000);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyCells {
                cells: 36_000_000,
                max: MAX_GRID_CELLS
            })
        );

        let config = MatchConfig::default().with_grid(500, 500);
        assert!(config.validate().is_ok());
        let config = MatchConfig::default().with_grid(500, 501);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyCells { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_timings() {
        let config = MatchConfig::default().with_duration(0.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveDuration(0.0)));

        let config = MatchConfig::default().with_duration(f64::NAN);
        assert!(config.validate().is_err());

        let config = MatchConfig {
            base_move_interval: -0.1,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveMoveInterval(-0.1))
        );

        let config = MatchConfig {
            bot_decision_interval: 0.0,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDecisionInterval(0.0))
        );
    }
}
