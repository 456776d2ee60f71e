//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The presentation layer reads the state and feeds directions and ticks back in.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, MAX_CELLS_PER_SIDE};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{GameState, LossCause, Position, RoundStatus, Snake};
