use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::ConfigError;

/// Environment variable naming a TOML file to load mutators from.
pub const MUTATOR_CONFIG_ENV: &str = "BALLSIM_MUTATOR_CONFIG";
/// Fallback path used when the environment variable is unset.
pub const DEFAULT_MUTATOR_CONFIG_PATH: &str = "config/mutators.toml";

/// Read-only simulation parameters that shape the ball's body and the
/// post-tick limits. Missing TOML keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutatorConfig {
    /// World gravity (UU/s^2).
    pub gravity: Vec3,
    pub ball_mass: f32,
    /// Linear speed cap enforced after every tick (UU/s).
    pub ball_max_speed: f32,
    /// Linear damping handed to the engine.
    pub ball_drag: f32,
    pub ball_world_friction: f32,
    pub ball_world_restitution: f32,
    pub ball_radius: f32,
    /// Snap position and velocities to a fixed grid after every tick.
    pub enable_physics_rounding: bool,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, consts::GRAVITY_Z),
            ball_mass: consts::BALL_MASS,
            ball_max_speed: consts::BALL_MAX_SPEED,
            ball_drag: consts::BALL_DRAG,
            ball_world_friction: consts::BALL_WORLD_FRICTION,
            ball_world_restitution: consts::BALL_WORLD_RESTITUTION,
            ball_radius: consts::BALL_RADIUS,
            enable_physics_rounding: true,
        }
    }
}

impl MutatorConfig {
    /// Load from `BALLSIM_MUTATOR_CONFIG` or `config/mutators.toml`, falling
    /// back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var(MUTATOR_CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_MUTATOR_CONFIG_PATH.to_string());
        match Self::from_file(&path) {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
