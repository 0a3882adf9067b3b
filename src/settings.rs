//! Game settings and tuning
//!
//! Loaded from JSON once at startup and validated before a run is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::DifficultyTable;

/// World geometry and scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Half of the visible vertical span (the world spans `-camera_size..=camera_size`)
    pub camera_size: f32,
    pub pipe_body_width: f32,
    pub pipe_head_height: f32,
    /// Horizontal obstacle speed (units/sec, leftward)
    pub scroll_speed: f32,
    pub spawn_x: f32,
    pub destroy_x: f32,
    /// Fixed horizontal position of the player
    pub player_x: f32,
    /// Space kept free between a gap and the top/bottom edge
    pub edge_margin: f32,
    /// Half extent of the player's square collider
    pub player_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            camera_size: 50.0,
            pipe_body_width: 7.8,
            pipe_head_height: 3.75,
            scroll_speed: 30.0,
            spawn_x: 100.0,
            destroy_x: -100.0,
            player_x: 0.0,
            edge_margin: 10.0,
            player_radius: 2.5,
        }
    }
}

impl WorldConfig {
    /// Total vertical span
    pub fn span(&self) -> f32 {
        self.camera_size * 2.0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("camera_size", self.camera_size),
            ("pipe_body_width", self.pipe_body_width),
            ("pipe_head_height", self.pipe_head_height),
            ("scroll_speed", self.scroll_speed),
            ("player_radius", self.player_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::World {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        if self.edge_margin < 0.0 {
            return Err(ConfigError::World {
                field: "edge_margin",
                reason: format!("must not be negative, got {}", self.edge_margin),
            });
        }
        if self.destroy_x >= self.spawn_x {
            return Err(ConfigError::World {
                field: "destroy_x",
                reason: format!("{} is not left of spawn_x {}", self.destroy_x, self.spawn_x),
            });
        }
        if self.player_x <= self.destroy_x || self.player_x >= self.spawn_x {
            return Err(ConfigError::World {
                field: "player_x",
                reason: format!(
                    "{} lies outside ({}, {})",
                    self.player_x, self.destroy_x, self.spawn_x
                ),
            });
        }
        Ok(())
    }
}

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Upward velocity set by each jump
    pub strength: f32,
    /// Downward acceleration applied while the body is dynamic
    pub gravity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            strength: 80.0,
            gravity: 200.0,
        }
    }
}

/// All tunable settings for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub difficulty: DifficultyTable,
    /// Start the level scrolling before the first jump
    pub instant_start: bool,
    /// Seed for the first run; later runs derive theirs from it
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            difficulty: DifficultyTable::default(),
            instant_start: false,
            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like [`Settings::load`], falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if !(self.player.strength > 0.0) {
            return Err(ConfigError::World {
                field: "player.strength",
                reason: format!("must be positive, got {}", self.player.strength),
            });
        }
        self.difficulty
            .validate(self.world.span(), self.world.edge_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "instant_start": true, "seed": 7 }"#).unwrap();
        assert!(settings.instant_start);
        assert_eq!(settings.seed, 7);
        assert!((settings.world.scroll_speed - 30.0).abs() < f32::EPSILON);
        assert_eq!(settings.difficulty.tiers.len(), 5);
    }

    #[test]
    fn test_json_roundtrip_keeps_table() {
        let json = Settings::default().to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed.difficulty, DifficultyTable::default());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let json = r#"{ "world": { "spawn_x": -200.0 } }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(ConfigError::World {
                field: "destroy_x",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_difficulty_table() {
        let mut settings = Settings::default();
        settings.difficulty.tiers[1].spawn_interval = 3.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Settings::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
