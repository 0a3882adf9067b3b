//! Pipe Dash - side-scrolling pipe dodging game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, difficulty)
//! - `session`: Run lifecycle and restarts
//! - `settings`: Data-driven tuning loaded from JSON
//! - `ui`: Passive observers such as the game-over window

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{ConfigError, InvariantViolation};
pub use session::Session;
pub use settings::Settings;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
