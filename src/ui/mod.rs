//! Passive display components
//!
//! These only observe the simulation; nothing here feeds back into it.

pub mod game_over;

pub use game_over::GameOverWindow;
