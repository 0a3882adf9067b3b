//! Difficulty ramp
//!
//! Difficulty is a step function of how many gaps have been spawned in the
//! current run. Each tier fixes the gap size and the spawn interval.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named difficulty tiers, easiest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
    Extreme,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
            Difficulty::Extreme => "Extreme",
        }
    }
}

/// One row of the difficulty table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub difficulty: Difficulty,
    /// Tier applies once at least this many gaps have been spawned
    pub min_spawned: u32,
    /// Vertical opening between the two halves of a gap
    pub gap_size: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

/// Difficulty tiers ordered by threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub tiers: Vec<DifficultyTier>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        let tier = |difficulty, min_spawned, gap_size, spawn_interval| DifficultyTier {
            difficulty,
            min_spawned,
            gap_size,
            spawn_interval,
        };
        Self {
            tiers: vec![
                tier(Difficulty::Easy, 0, 50.0, 1.2),
                tier(Difficulty::Medium, 25, 45.0, 1.1),
                tier(Difficulty::Hard, 50, 35.0, 1.0),
                tier(Difficulty::Impossible, 80, 25.0, 0.9),
                tier(Difficulty::Extreme, 100, 15.0, 0.8),
            ],
        }
    }
}

impl DifficultyTable {
    /// The tier in effect after `spawned` gaps.
    ///
    /// Thresholds are increasing, so the result never gets easier as
    /// `spawned` grows.
    pub fn tier_for(&self, spawned: u32) -> &DifficultyTier {
        self.tiers
            .iter()
            .rev()
            .find(|t| spawned >= t.min_spawned)
            .unwrap_or(&self.tiers[0])
    }

    /// The first (easiest) tier
    pub fn initial(&self) -> &DifficultyTier {
        &self.tiers[0]
    }

    /// Check ordering and that every gap fits inside `span` with `edge_margin`
    /// kept free at both ends.
    pub fn validate(&self, span: f32, edge_margin: f32) -> Result<(), ConfigError> {
        let first = self.tiers.first().ok_or(ConfigError::EmptyDifficultyTable)?;
        if first.min_spawned != 0 {
            return Err(ConfigError::FirstTierNotZero(first.min_spawned));
        }

        for (index, tier) in self.tiers.iter().enumerate() {
            if !(tier.gap_size > 0.0) {
                return Err(ConfigError::NonPositive {
                    index,
                    field: "gap_size",
                    value: tier.gap_size,
                });
            }
            if !(tier.spawn_interval > 0.0) {
                return Err(ConfigError::NonPositive {
                    index,
                    field: "spawn_interval",
                    value: tier.spawn_interval,
                });
            }
            if tier.gap_size + 2.0 * edge_margin > span {
                return Err(ConfigError::GapTooLarge {
                    index,
                    gap_size: tier.gap_size,
                    span,
                });
            }

            if index == 0 {
                continue;
            }
            let prev = &self.tiers[index - 1];
            if tier.min_spawned <= prev.min_spawned {
                return Err(ConfigError::ThresholdNotIncreasing {
                    index,
                    threshold: tier.min_spawned,
                    previous: prev.min_spawned,
                });
            }
            if tier.difficulty <= prev.difficulty {
                return Err(ConfigError::DifficultyNotIncreasing {
                    index,
                    difficulty: tier.difficulty,
                    previous: prev.difficulty,
                });
            }
            if tier.gap_size > prev.gap_size {
                return Err(ConfigError::NotMonotonic {
                    index,
                    field: "gap_size",
                    previous: prev.gap_size,
                    value: tier.gap_size,
                });
            }
            if tier.spawn_interval > prev.spawn_interval {
                return Err(ConfigError::NotMonotonic {
                    index,
                    field: "spawn_interval",
                    previous: prev.spawn_interval,
                    value: tier.spawn_interval,
                });
            }
        }
        Ok(())
    }
}
