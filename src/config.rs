//! Tuning data for the field, ship and camera
//!
//! Every struct defaults to the values in [`crate::consts`], so a JSON file
//! only needs the keys it wants to override.

use std::path::Path;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Asteroid field configuration (immutable once the field is built)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of reusable asteroid slots
    pub pool_size: usize,
    /// Seconds between spawns while playing
    pub spawn_interval: f32,
    /// Distance ahead of the player where asteroids appear
    pub spawn_distance: f32,
    /// Max lateral jitter on each axis perpendicular to forward
    pub spread: f32,
    /// Uniform scale range (min, max)
    pub scale_range: (f32, f32),
    /// Play the scale-in tween on spawn
    pub animate_spawn: bool,
    /// Seconds spent exploding before the field resets
    pub explode_duration: f32,
    /// Unit-scale collider radius of an asteroid
    pub asteroid_radius: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pool_size: POOL_SIZE,
            spawn_interval: SPAWN_INTERVAL,
            spawn_distance: SPAWN_DISTANCE,
            spread: SPAWN_SPREAD,
            scale_range: SCALE_RANGE,
            animate_spawn: true,
            explode_duration: EXPLODE_DURATION,
            asteroid_radius: ASTEROID_RADIUS,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval.is_finite() && self.spawn_interval > 0.0) {
            return Err(ConfigError::invalid(
                "spawn_interval",
                format!("must be > 0, got {}", self.spawn_interval),
            ));
        }
        if !self.spawn_distance.is_finite() {
            return Err(ConfigError::invalid("spawn_distance", "must be finite"));
        }
        if !(self.spread.is_finite() && self.spread >= 0.0) {
            return Err(ConfigError::invalid(
                "spread",
                format!("must be >= 0, got {}", self.spread),
            ));
        }
        let (min, max) = self.scale_range;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::invalid(
                "scale_range",
                format!("need 0 < min <= max, got ({min}, {max})"),
            ));
        }
        if !(self.explode_duration.is_finite() && self.explode_duration >= 0.0) {
            return Err(ConfigError::invalid(
                "explode_duration",
                format!("must be >= 0, got {}", self.explode_duration),
            ));
        }
        if !(self.asteroid_radius.is_finite() && self.asteroid_radius >= 0.0) {
            return Err(ConfigError::invalid(
                "asteroid_radius",
                format!("must be >= 0, got {}", self.asteroid_radius),
            ));
        }
        Ok(())
    }
}

/// Player ship configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Name other entities use to find the ship
    pub name: String,
    /// Initial forward speed (units/s)
    pub speed: f32,
    /// Forward acceleration (units/s²)
    pub acceleration: f32,
    /// Turn rate (radians/s)
    pub maneuverability: f32,
    pub collider_radius: f32,
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            name: "ship".to_string(),
            speed: SHIP_SPEED,
            acceleration: SHIP_ACCELERATION,
            maneuverability: SHIP_MANEUVERABILITY,
            collider_radius: SHIP_COLLIDER_RADIUS,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl ShipConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.collider_radius.is_finite() && self.collider_radius >= 0.0) {
            return Err(ConfigError::invalid(
                "ship.collider_radius",
                format!("must be >= 0, got {}", self.collider_radius),
            ));
        }
        if !(self.speed.is_finite()
            && self.acceleration.is_finite()
            && self.maneuverability.is_finite())
        {
            return Err(ConfigError::invalid(
                "ship",
                "speed, acceleration and maneuverability must be finite",
            ));
        }
        if !self.position.is_finite() {
            return Err(ConfigError::invalid("ship.position", "must be finite"));
        }
        if !self.orientation.is_finite() || self.orientation.length_squared() == 0.0 {
            return Err(ConfigError::invalid(
                "ship.orientation",
                "must be a finite, non-zero quaternion",
            ));
        }
        Ok(())
    }
}

/// Follow camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Name of the entity to follow
    pub target: Option<String>,
    /// Lerp toward the target instead of snapping
    pub smooth: bool,
    /// Also copy the target's orientation
    pub follow_rotation: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: Some("ship".to_string()),
            smooth: true,
            follow_rotation: true,
        }
    }
}

/// Everything needed to build a [`crate::sim::Scene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Run seed for reproducibility
    pub seed: u64,
    pub field: FieldConfig,
    pub ship: ShipConfig,
    pub camera: CameraConfig,
    /// Name of the entity the field treats as the player
    pub player: Option<String>,
    /// Name of the entity the field uses as its explosion effect
    pub explosion: Option<String>,
    /// Name given to the scene's explosion entity
    pub explosion_name: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            field: FieldConfig::default(),
            ship: ShipConfig::default(),
            camera: CameraConfig::default(),
            player: Some("ship".to_string()),
            explosion: Some("explosion".to_string()),
            explosion_name: "explosion".to_string(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.ship.validate()
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Scene config saved to {}", path.display());
        Ok(())
    }
}
