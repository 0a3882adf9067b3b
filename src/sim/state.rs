//! Shared simulation types
//!
//! Control states, the notifications that keep them in step, and per-run
//! counters.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Player control state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Body frozen, waiting for the first jump
    #[default]
    GetReady,
    /// Body simulated, jumps apply impulses
    Playing,
    /// Terminal for the run
    GameOver,
}

/// Level's copy of the player state.
///
/// Derived state: only ever written from a [`PlayerEvent`], never by the
/// level's own logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelState {
    GetReady,
    Playing,
    GameOver,
}

impl LevelState {
    /// The state a notification moves the level into
    pub fn from_event(event: PlayerEvent) -> Self {
        match event {
            PlayerEvent::Waiting => LevelState::GetReady,
            PlayerEvent::Started => LevelState::Playing,
            PlayerEvent::Died => LevelState::GameOver,
        }
    }
}

/// Notifications raised by the player.
///
/// `Waiting` repeats every tick in GetReady; `Started` and `Died` fire once
/// at their transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerEvent {
    Waiting,
    Started,
    Died,
}

/// Monotonic counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Gaps created
    pub spawned: u32,
    /// Gaps the player has flown through
    pub passed: u32,
}

/// RNG seed wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
