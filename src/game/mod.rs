//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A host drives it by calling [`SnakeEngine::advance`] on its own clock.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, GameConfig, MAX_BOARD_SIZE};
pub use engine::{GameEvent, SnakeEngine, StepResult, TickOutcome};
pub use state::{GameSnapshot, GameStatus, Position, Snake};
