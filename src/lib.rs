//! Grid Snake - the classic snake arcade game in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Round lifecycle and highscore persistence (session, highscore modules)
//! - Texture loading (assets module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Execution modes (modes module)

pub mod assets;
pub mod game;
pub mod highscore;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod session;
