//! Grid Snake - a grid-based snake simulation with a terminal front end
//!
//! This library provides:
//! - The simulation engine (game module): state, tick rule, collisions, food, scoring, speed
//! - Terminal input mapping (input module)
//! - TUI rendering of engine snapshots (render module)
//! - Session metrics (metrics module)
//! - The interactive host loop and its tick clock (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
