use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Largest board the terminal renderer can redraw every frame
pub const MAX_BOARD_SIZE: usize = 100;

/// Reasons a [`GameConfig`] can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board_size must be at least 2, got {0}")]
    BoardTooSmall(usize),
    #[error("board_size must be at most {max}, got {size}")]
    BoardTooLarge { size: usize, max: usize },
    #[error("score_per_food must be positive")]
    ZeroFoodScore,
    #[error("speed_milestone must be positive")]
    ZeroMilestone,
    #[error("speedup_divisor must be positive")]
    ZeroSpeedupDivisor,
    #[error("min_tick_ms must be positive")]
    ZeroMinTick,
    #[error("min_tick_ms ({min}) cannot exceed base_tick_ms ({base})")]
    FloorAboveBase { min: u64, base: u64 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Points awarded per food eaten
    pub score_per_food: u32,
    /// The tick interval is recomputed whenever the score hits a multiple of this
    pub speed_milestone: u32,
    /// Tick interval at the start of a game, in milliseconds
    pub base_tick_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_tick_ms: u64,
    /// Score points per millisecond shaved off the base interval
    pub speedup_divisor: u32,
    /// Seed for food placement; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            score_per_food: 10,
            speed_milestone: 50,
            base_tick_ms: 200,
            min_tick_ms: 50,
            speedup_divisor: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file and validate it.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Check that every parameter is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardTooSmall(self.board_size));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.score_per_food == 0 {
            return Err(ConfigError::ZeroFoodScore);
        }
        if self.speed_milestone == 0 {
            return Err(ConfigError::ZeroMilestone);
        }
        if self.speedup_divisor == 0 {
            return Err(ConfigError::ZeroSpeedupDivisor);
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroMinTick);
        }
        if self.min_tick_ms > self.base_tick_ms {
            return Err(ConfigError::FloorAboveBase {
                min: self.min_tick_ms,
                base: self.base_tick_ms,
            });
        }
        Ok(())
    }

    /// Tick interval at the start of a game
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    /// Tick interval for a given score: `max(min, base - score / divisor)`
    pub fn interval_for_score(&self, score: u32) -> Duration {
        let speedup = u64::from(score / self.speedup_divisor);
        let ms = self.base_tick_ms.saturating_sub(speedup).max(self.min_tick_ms);
        Duration::from_millis(ms)
    }

    /// Whether reaching this score triggers a speed recomputation
    pub fn is_speed_milestone(&self, score: u32) -> bool {
        score > 0 && score % self.speed_milestone == 0
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }
}
