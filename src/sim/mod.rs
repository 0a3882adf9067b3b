//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (one stream per run)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod difficulty;
pub mod level;
pub mod obstacle;
pub mod physics;
pub mod player;
pub mod state;
pub mod tick;

pub use body::{BodyArena, BodyFactory, BodyHandle, BodyPart, BodySpec};
pub use collision::Aabb;
pub use difficulty::{Difficulty, DifficultyTable, DifficultyTier};
pub use level::Level;
pub use obstacle::{Obstacle, ObstacleSet, gap_center_range, gap_heights};
pub use physics::{BodyKind, PlayerBody};
pub use player::{Listener, ListenerId, Player};
pub use state::{LevelState, PlayerEvent, PlayerState, RngState, RunCounters};
pub use tick::{Run, TickInput, tick};
