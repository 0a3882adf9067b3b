//! Error types
//!
//! Configuration problems are caught once at startup. Invariant violations
//! indicate a bug in the simulation itself.

use thiserror::Error;

use crate::sim::Difficulty;

/// Invalid or unreadable settings. Reported before any run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("difficulty table is empty")]
    EmptyDifficultyTable,

    #[error("first difficulty tier must start at 0 spawned obstacles, found {0}")]
    FirstTierNotZero(u32),

    #[error("difficulty tier {index} threshold {threshold} does not exceed previous threshold {previous}")]
    ThresholdNotIncreasing {
        index: usize,
        threshold: u32,
        previous: u32,
    },

    #[error("difficulty tier {index} is {difficulty:?}, which is not harder than {previous:?}")]
    DifficultyNotIncreasing {
        index: usize,
        difficulty: Difficulty,
        previous: Difficulty,
    },

    #[error("difficulty tier {index}: {field} must be positive, got {value}")]
    NonPositive {
        index: usize,
        field: &'static str,
        value: f32,
    },

    #[error("difficulty tier {index}: {field} increases from {previous} to {value}")]
    NotMonotonic {
        index: usize,
        field: &'static str,
        previous: f32,
        value: f32,
    },

    #[error("difficulty tier {index}: gap {gap_size} plus edge margins does not fit a span of {span}")]
    GapTooLarge {
        index: usize,
        gap_size: f32,
        span: f32,
    },

    #[error("invalid world setting `{field}`: {reason}")]
    World {
        field: &'static str,
        reason: String,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// A simulation invariant that should never break.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("obstacle at x={x} is past the destroy threshold {destroy_x} after the tick")]
    ObstacleNotCulled { x: f32, destroy_x: f32 },

    #[error("score queried while no run exists")]
    NoActiveRun,
}
