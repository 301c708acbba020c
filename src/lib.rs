//! Asteroid Field - fly a ship through an endless asteroid field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (asteroid pool, ship, camera, collisions)
//! - `config`: Data-driven tuning loaded from JSON
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::{CameraConfig, FieldConfig, SceneConfig, ShipConfig};
pub use error::ConfigError;

use glam::{EulerRot, Quat, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the demo loop (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Seconds between a collision and the field resetting
    pub const EXPLODE_DURATION: f32 = 3.0;
    /// Distance ahead of the ship where asteroids appear
    pub const SPAWN_DISTANCE: f32 = 1000.0;
    /// Default lateral jitter around the spawn point
    pub const SPAWN_SPREAD: f32 = 400.0;
    /// Default seconds between asteroid spawns
    pub const SPAWN_INTERVAL: f32 = 0.5;
    /// Default asteroid pool size
    pub const POOL_SIZE: usize = 20;
    /// Default uniform scale range for spawned asteroids
    pub const SCALE_RANGE: (f32, f32) = (30.0, 80.0);
    /// Unit-scale asteroid collider radius
    pub const ASTEROID_RADIUS: f32 = 1.0;

    /// Spin rates are drawn as an integer in this range times `SPIN_STEP`
    pub const SPIN_STEPS: i32 = 100;
    pub const SPIN_STEP: f32 = 0.01;

    /// Scale-in tween: lerp factor applied per reference frame
    pub const SPAWN_LERP_PER_FRAME: f32 = 0.005;
    pub const SPAWN_REFERENCE_FPS: f32 = 60.0;
    /// Tween snaps to target once within this fraction of it
    pub const SPAWN_SNAP_FRACTION: f32 = 0.001;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 300.0;
    pub const SHIP_ACCELERATION: f32 = 5.0;
    pub const SHIP_MANEUVERABILITY: f32 = 1.5;
    pub const SHIP_COLLIDER_RADIUS: f32 = 10.0;

    /// Smooth camera follow rate (lerp factor per second, capped at 1)
    pub const CAMERA_FOLLOW_RATE: f32 = 10.0;
}

/// Local forward axis of every oriented body
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// World-space forward vector for an orientation
#[inline]
pub fn forward_of(orientation: Quat) -> Vec3 {
    orientation * FORWARD
}

/// Build a rotation from yaw (around Y), pitch (around X) and roll (around Z)
#[inline]
pub fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll)
}

/// Two unit axes perpendicular to `forward` and to each other
///
/// Falls back to the world X/Y axes when `forward` is degenerate.
#[inline]
pub fn lateral_axes(forward: Vec3) -> (Vec3, Vec3) {
    match forward.try_normalize() {
        Some(dir) => dir.any_orthonormal_pair(),
        None => (Vec3::X, Vec3::Y),
    }
}
